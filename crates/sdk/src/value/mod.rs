// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Value codec between engine values and typed native values

use std::fmt::{self, Display, Formatter};

use crate::error::DecodeError;

pub mod codec;
pub mod convert;
pub mod handle;

pub use codec::{decode, encode, report_error, report_out_of_memory};
pub use handle::{ContextHandle, ValueHandle};

/// Largest integer magnitude an `f64` represents exactly
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Dynamic value as produced by the engine for a function argument
///
/// Always an owned copy: nothing here points into engine memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Integer(i64),
	Float(f64),
	Text(Vec<u8>),
	Blob(Vec<u8>),
}

impl Value {
	pub fn value_type(&self) -> ValueType {
		match self {
			Value::Null => ValueType::Null,
			Value::Integer(_) => ValueType::Integer,
			Value::Float(_) => ValueType::Float,
			Value::Text(_) => ValueType::Text,
			Value::Blob(_) => ValueType::Blob,
		}
	}
}

/// Storage class tag of a dynamic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Null,
	Integer,
	Float,
	Text,
	Blob,
}

impl Display for ValueType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ValueType::Null => f.write_str("NULL"),
			ValueType::Integer => f.write_str("INTEGER"),
			ValueType::Float => f.write_str("REAL"),
			ValueType::Text => f.write_str("TEXT"),
			ValueType::Blob => f.write_str("BLOB"),
		}
	}
}

/// Static type of a native parameter or result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
	I32,
	I64,
	F64,
	Text,
	Blob,
}

impl Display for ArgType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ArgType::I32 => f.write_str("i32"),
			ArgType::I64 => f.write_str("i64"),
			ArgType::F64 => f.write_str("f64"),
			ArgType::Text => f.write_str("text"),
			ArgType::Blob => f.write_str("blob"),
		}
	}
}

/// Declared type and nullability of one native parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgumentSlot {
	pub ty: ArgType,
	pub nullable: bool,
}

impl ArgumentSlot {
	pub const fn required(ty: ArgType) -> Self {
		Self {
			ty,
			nullable: false,
		}
	}

	pub const fn nullable(ty: ArgType) -> Self {
		Self {
			ty,
			nullable: true,
		}
	}
}

/// Native value of one of the supported static types
///
/// SQL NULL is represented outside this enum as `Option::None`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
	I32(i32),
	I64(i64),
	F64(f64),
	Text(String),
	Blob(Vec<u8>),
}

impl TypedValue {
	pub fn arg_type(&self) -> ArgType {
		match self {
			TypedValue::I32(_) => ArgType::I32,
			TypedValue::I64(_) => ArgType::I64,
			TypedValue::F64(_) => ArgType::F64,
			TypedValue::Text(_) => ArgType::Text,
			TypedValue::Blob(_) => ArgType::Blob,
		}
	}

	/// Storage class the engine uses for this value
	pub fn value_type(&self) -> ValueType {
		match self {
			TypedValue::I32(_) | TypedValue::I64(_) => ValueType::Integer,
			TypedValue::F64(_) => ValueType::Float,
			TypedValue::Text(_) => ValueType::Text,
			TypedValue::Blob(_) => ValueType::Blob,
		}
	}
}

/// Check a dynamic value against a slot and convert it.
///
/// NULL is only accepted by nullable slots. Integers convert to narrower or
/// floating types only when no information is lost; nothing else is coerced.
pub fn decode_value(value: Value, slot: ArgumentSlot) -> Result<Option<TypedValue>, DecodeError> {
	let expected = slot.ty;
	let typed = match (value, expected) {
		(Value::Null, _) => {
			return if slot.nullable {
				Ok(None)
			} else {
				Err(DecodeError::UnexpectedNull {
					expected,
				})
			};
		}
		(Value::Integer(v), ArgType::I64) => TypedValue::I64(v),
		(Value::Integer(v), ArgType::I32) => TypedValue::I32(i32::try_from(v).map_err(|_| {
			DecodeError::OutOfRange {
				expected,
				value: v,
			}
		})?),
		(Value::Integer(v), ArgType::F64) => {
			if v.unsigned_abs() > MAX_EXACT_INTEGER {
				return Err(DecodeError::OutOfRange {
					expected,
					value: v,
				});
			}
			TypedValue::F64(v as f64)
		}
		(Value::Float(v), ArgType::F64) => TypedValue::F64(v),
		(Value::Text(bytes), ArgType::Text) => {
			TypedValue::Text(String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?)
		}
		(Value::Blob(bytes), ArgType::Blob) => TypedValue::Blob(bytes),
		(value, expected) => {
			return Err(DecodeError::TypeMismatch {
				expected,
				found: value.value_type(),
			});
		}
	};
	Ok(Some(typed))
}
