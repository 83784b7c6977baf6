// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use crate::value::{ArgType, ValueType};

/// Outcome of registering a function on a connection
pub type Result<T> = std::result::Result<T, RegistrationError>;

/// Result of user code running inside a native function
pub type FunctionResult<T> = std::result::Result<T, FunctionError>;

/// Failure to turn an engine value into a typed argument
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	#[error("unexpected NULL for non-nullable {expected} argument")]
	UnexpectedNull {
		expected: ArgType,
	},

	#[error("expected {expected} argument, found {found}")]
	TypeMismatch {
		expected: ArgType,
		found: ValueType,
	},

	#[error("integer {value} is out of range for {expected} argument")]
	OutOfRange {
		expected: ArgType,
		value: i64,
	},

	#[error("text argument is not valid UTF-8")]
	InvalidUtf8,

	#[error("expected {expected} arguments, received {actual}")]
	ArityMismatch {
		expected: usize,
		actual: usize,
	},

	/// The engine could not materialise a non-empty text or blob
	#[error("out of memory reading {found} argument")]
	OutOfMemory {
		found: ValueType,
	},
}

/// Rejection of a function registration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
	#[error("failed to register function `{name}`: {message} (code {code})")]
	Engine {
		name: String,
		code: i32,
		message: String,
	},

	#[error("aggregate `{name}` provides {present} without {missing}; window functions need both")]
	PartialWindow {
		name: String,
		present: WindowMethod,
		missing: WindowMethod,
	},

	#[error("function name `{name}` is not a valid engine identifier")]
	InvalidName {
		name: String,
	},

	#[error("arity {arity} of function `{name}` is below -1")]
	InvalidArity {
		name: String,
		arity: i32,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMethod {
	Value,
	Inverse,
}

impl Display for WindowMethod {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			WindowMethod::Value => f.write_str("value"),
			WindowMethod::Inverse => f.write_str("inverse"),
		}
	}
}

/// Advisory only: the engine handed out no accumulator memory.
///
/// Either no row was stepped in this cycle or the allocation failed. Both are
/// valid aggregate semantics and are answered with NULL or a no-op, never
/// reported to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
	#[error("engine returned no accumulator memory")]
	MissingAccumulator,
}

/// Error raised by user code inside a native function
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FunctionError {
	message: String,
}

impl FunctionError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

impl From<&str> for FunctionError {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}

impl From<String> for FunctionError {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}
