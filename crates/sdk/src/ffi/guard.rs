// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Panic and error boundary shared by all entry points
//!
//! Unwinding across the C ABI is undefined behaviour, so every trampoline runs
//! its body through [`run_guarded`]. A panic fails only the current call.

use std::{
	any::Any,
	fmt::Display,
	panic::{AssertUnwindSafe, catch_unwind},
};

use nativefn_abi::ffi;
use tracing::{debug, error};

use crate::{
	error::DecodeError,
	ffi::FunctionState,
	value::{ContextHandle, report_error, report_out_of_memory},
};

pub(crate) fn run_guarded<F>(ctx: *mut ffi::sqlite3_context, entry: &'static str, body: F)
where
	F: FnOnce(ContextHandle<'_>),
{
	let Some(handle) = (unsafe { ContextHandle::from_raw(ctx) }) else {
		error!(entry, "engine passed a null context");
		return;
	};

	if let Err(payload) = catch_unwind(AssertUnwindSafe(|| body(handle))) {
		let message = panic_message(&*payload);
		let name = function_name(handle);
		error!(entry, function = name, message, "Panic in native function");
		report_error(handle, &format!("{name}: panicked: {message}"));
	}
}

/// Report a decode or user error as the failure of the current call
pub(crate) fn fail(ctx: ContextHandle<'_>, entry: &'static str, err: &dyn Display) {
	let name = function_name(ctx);
	debug!(entry, function = name, error = %err, "native function failed");
	report_error(ctx, &format!("{name}: {err}"));
}

/// Report an argument that could not be decoded
///
/// Engine allocation failures surface as the engine's own out-of-memory error.
pub(crate) fn reject(ctx: ContextHandle<'_>, entry: &'static str, err: &DecodeError) {
	match err {
		DecodeError::OutOfMemory {
			..
		} => {
			error!(entry, function = function_name(ctx), "out of memory reading argument");
			report_out_of_memory(ctx);
		}
		_ => fail(ctx, entry, err),
	}
}

fn function_name(ctx: ContextHandle<'_>) -> &str {
	unsafe { FunctionState::from_context(ctx) }.map(FunctionState::name).unwrap_or("<unnamed>")
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.as_str()
	} else {
		"unknown panic payload"
	}
}
