// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Borrowed handles to engine-owned call state

use std::{
	ffi::{c_int, c_void},
	marker::PhantomData,
	ptr::NonNull,
	slice,
};

use nativefn_abi::ffi;

use crate::{
	error::DecodeError,
	value::{Value, ValueType},
};

/// One argument of the current call
///
/// Valid only for the duration of the callback that received it.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct ValueHandle<'call> {
	raw: NonNull<ffi::sqlite3_value>,
	_call: PhantomData<&'call ffi::sqlite3_value>,
}

impl<'call> ValueHandle<'call> {
	/// View the engine's argument array as handles
	///
	/// # Safety
	/// `argv` must point to `argc` non-null value pointers that stay valid for
	/// `'call`, as guaranteed by the engine for the callback receiving them.
	pub unsafe fn slice(argc: c_int, argv: *mut *mut ffi::sqlite3_value) -> &'call [ValueHandle<'call>] {
		let len = usize::try_from(argc).unwrap_or(0);
		if len == 0 || argv.is_null() {
			return &[];
		}
		unsafe { slice::from_raw_parts(argv as *const ValueHandle<'call>, len) }
	}

	pub fn as_ptr(self) -> *mut ffi::sqlite3_value {
		self.raw.as_ptr()
	}

	pub fn value_type(self) -> ValueType {
		match unsafe { ffi::sqlite3_value_type(self.as_ptr()) } {
			ffi::SQLITE_INTEGER => ValueType::Integer,
			ffi::SQLITE_FLOAT => ValueType::Float,
			ffi::SQLITE_TEXT => ValueType::Text,
			ffi::SQLITE_BLOB => ValueType::Blob,
			_ => ValueType::Null,
		}
	}

	/// Copy the value out of engine memory
	///
	/// Text and blobs are copied using the explicit byte count reported by the
	/// engine; text is never scanned for a terminator. A non-empty value whose
	/// bytes the engine could not produce is `OutOfMemory`.
	pub fn read(self) -> Result<Value, DecodeError> {
		let raw = self.as_ptr();
		let found = self.value_type();
		let value = match found {
			ValueType::Null => Value::Null,
			ValueType::Integer => Value::Integer(unsafe { ffi::sqlite3_value_int64(raw) }),
			ValueType::Float => Value::Float(unsafe { ffi::sqlite3_value_double(raw) }),
			ValueType::Text => {
				// text must be fetched before its length
				let data = unsafe { ffi::sqlite3_value_text(raw) };
				let len = unsafe { ffi::sqlite3_value_bytes(raw) };
				Value::Text(unsafe { copy_bytes(data, len) }.ok_or(DecodeError::OutOfMemory {
					found,
				})?)
			}
			ValueType::Blob => {
				let data = unsafe { ffi::sqlite3_value_blob(raw) };
				let len = unsafe { ffi::sqlite3_value_bytes(raw) };
				Value::Blob(unsafe { copy_bytes(data.cast(), len) }.ok_or(DecodeError::OutOfMemory {
					found,
				})?)
			}
		};
		Ok(value)
	}
}

/// `None` when the engine reports bytes but hands out no buffer
unsafe fn copy_bytes(data: *const u8, len: c_int) -> Option<Vec<u8>> {
	let len = usize::try_from(len).unwrap_or(0);
	match (len, data.is_null()) {
		(0, _) => Some(Vec::new()),
		(_, true) => None,
		(len, false) => Some(unsafe { slice::from_raw_parts(data, len) }.to_vec()),
	}
}

/// Result slot and per-call context of the current invocation
#[derive(Clone, Copy)]
pub struct ContextHandle<'call> {
	raw: NonNull<ffi::sqlite3_context>,
	_call: PhantomData<&'call ffi::sqlite3_context>,
}

impl<'call> ContextHandle<'call> {
	/// # Safety
	/// `ctx` must be null or the context the engine passed to the running
	/// callback, valid for `'call`.
	pub unsafe fn from_raw(ctx: *mut ffi::sqlite3_context) -> Option<Self> {
		NonNull::new(ctx).map(|raw| Self {
			raw,
			_call: PhantomData,
		})
	}

	pub fn as_ptr(self) -> *mut ffi::sqlite3_context {
		self.raw.as_ptr()
	}

	/// Opaque pointer registered alongside the function
	pub fn user_data(self) -> *mut c_void {
		unsafe { ffi::sqlite3_user_data(self.as_ptr()) }
	}

	/// Engine-owned aggregate memory for the current group
	///
	/// The first request with a positive size allocates `bytes` zeroed bytes;
	/// later requests return the same block. A request for zero bytes never
	/// allocates and yields null if nothing was allocated yet.
	pub fn aggregate_context(self, bytes: c_int) -> *mut c_void {
		unsafe { ffi::sqlite3_aggregate_context(self.as_ptr(), bytes) }
	}
}
