// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ffi::{c_char, c_int};

use nativefn_abi::ffi;

use crate::{
	error::DecodeError,
	value::{ArgumentSlot, ContextHandle, TypedValue, ValueHandle, decode_value},
};

/// Decode one engine argument against its declared slot
pub fn decode(value: ValueHandle<'_>, slot: ArgumentSlot) -> Result<Option<TypedValue>, DecodeError> {
	decode_value(value.read()?, slot)
}

/// Write a result into the engine's result slot
///
/// Text and blobs are handed over as transient: the engine copies them before
/// this call returns.
pub fn encode(ctx: ContextHandle<'_>, value: Option<TypedValue>) {
	let raw = ctx.as_ptr();
	let Some(value) = value else {
		unsafe { ffi::sqlite3_result_null(raw) };
		return;
	};

	match value {
		TypedValue::I32(v) => unsafe { ffi::sqlite3_result_int(raw, v) },
		TypedValue::I64(v) => unsafe { ffi::sqlite3_result_int64(raw, v) },
		TypedValue::F64(v) => unsafe { ffi::sqlite3_result_double(raw, v) },
		TypedValue::Text(text) => unsafe {
			ffi::sqlite3_result_text64(
				raw,
				text.as_ptr() as *const c_char,
				text.len() as ffi::sqlite3_uint64,
				ffi::SQLITE_TRANSIENT(),
				ffi::SQLITE_UTF8 as u8,
			)
		},
		TypedValue::Blob(bytes) => unsafe {
			ffi::sqlite3_result_blob64(
				raw,
				bytes.as_ptr().cast(),
				bytes.len() as ffi::sqlite3_uint64,
				ffi::SQLITE_TRANSIENT(),
			)
		},
	}
}

/// Fail the current call with `message`; the engine copies the text
pub fn report_error(ctx: ContextHandle<'_>, message: &str) {
	let len = c_int::try_from(message.len()).unwrap_or(c_int::MAX);
	unsafe { ffi::sqlite3_result_error(ctx.as_ptr(), message.as_ptr() as *const c_char, len) };
}

/// Fail the current call with the engine's out-of-memory error
pub fn report_out_of_memory(ctx: ContextHandle<'_>) {
	unsafe { ffi::sqlite3_result_error_nomem(ctx.as_ptr()) };
}
