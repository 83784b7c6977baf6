// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use nativefn_abi::FunctionFlags;

/// Registration-time hints for a native function.
///
/// All options default to off. Text is always exchanged as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionOptions {
	/// Same input always yields the same output, letting the query planner
	/// factor calls out of loops and use the function in indexes.
	///
	/// Default: false
	pub deterministic: bool,
	/// The function has no side effects and may be used from schema objects
	/// even when the schema is untrusted.
	///
	/// Default: false
	pub innocuous: bool,
	/// The function may only be invoked from top-level SQL, never from views,
	/// triggers, CHECK constraints or index expressions.
	///
	/// Default: false
	pub direct_only: bool,
}

impl FunctionOptions {
	/// Create options with default values.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn deterministic(mut self, deterministic: bool) -> Self {
		self.deterministic = deterministic;
		self
	}

	pub fn innocuous(mut self, innocuous: bool) -> Self {
		self.innocuous = innocuous;
		self
	}

	pub fn direct_only(mut self, direct_only: bool) -> Self {
		self.direct_only = direct_only;
		self
	}

	/// Encoding and behaviour bits for the registration call
	pub fn flags(&self) -> FunctionFlags {
		let mut flags = FunctionFlags::utf8();
		if self.deterministic {
			flags = flags.with_deterministic();
		}
		if self.innocuous {
			flags = flags.with_innocuous();
		}
		if self.direct_only {
			flags = flags.with_direct_only();
		}
		flags
	}
}
