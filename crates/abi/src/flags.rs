// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Text encoding and behaviour flags for function registration
//!
//! The values mirror `sqlite3.h` and are passed as the `eTextRep` argument of
//! the registration calls.

/// Text encoding: UTF-8
pub const ENCODING_UTF8: i32 = 0x0000_0001;

/// Flag: same input always yields the same output within a statement
pub const FLAG_DETERMINISTIC: i32 = 0x0000_0800; // 2048

/// Flag: may only be invoked from top-level SQL, not from schema objects
pub const FLAG_DIRECTONLY: i32 = 0x0008_0000; // 524288

/// Flag: free of side effects, safe to use from schema objects
pub const FLAG_INNOCUOUS: i32 = 0x0020_0000; // 2097152

/// Bit set handed to the engine when registering a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionFlags(i32);

impl FunctionFlags {
	/// UTF-8 encoding with no behaviour flags
	pub const fn utf8() -> Self {
		Self(ENCODING_UTF8)
	}

	pub const fn with_deterministic(self) -> Self {
		Self(self.0 | FLAG_DETERMINISTIC)
	}

	pub const fn with_direct_only(self) -> Self {
		Self(self.0 | FLAG_DIRECTONLY)
	}

	pub const fn with_innocuous(self) -> Self {
		Self(self.0 | FLAG_INNOCUOUS)
	}

	/// Check whether every bit of `flag` is set
	///
	/// # Example
	/// ```
	/// use nativefn_abi::flags::*;
	///
	/// let flags = FunctionFlags::utf8().with_deterministic();
	/// assert!(flags.contains(FLAG_DETERMINISTIC));
	/// assert!(!flags.contains(FLAG_DIRECTONLY));
	/// ```
	#[inline]
	pub const fn contains(self, flag: i32) -> bool {
		(self.0 & flag) == flag
	}

	/// Raw value for the `eTextRep` argument
	#[inline]
	pub const fn bits(self) -> i32 {
		self.0
	}
}

impl Default for FunctionFlags {
	fn default() -> Self {
		Self::utf8()
	}
}
