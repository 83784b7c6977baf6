// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Window extension for aggregates
//!
//! A window aggregate reuses the step/finalize lifecycle and adds two calls:
//! `value` reads the result for the current frame without ending the cycle,
//! and `inverse` removes a row that left the frame.

use std::ffi::c_int;

use nativefn_abi::ffi;
use tracing::trace;

use super::{
	Aggregate,
	accumulator::{Accumulator, Request},
	fold,
};
use crate::{
	error::FunctionResult,
	ffi::guard::{fail, run_guarded},
	value::{convert::IntoResult, encode},
};

pub trait WindowAggregate: Aggregate {
	/// Result for the current frame; the cycle continues afterwards
	fn value(&mut self) -> FunctionResult<Self::Output>;

	fn inverse(&mut self, args: Self::Args) -> FunctionResult<()>;
}

/// # Safety
/// Must only be registered for a window aggregate whose accumulator type is `A`.
pub unsafe extern "C" fn value_trampoline<A: WindowAggregate>(ctx: *mut ffi::sqlite3_context) {
	run_guarded(ctx, "value", |ctx| {
		let accumulator = match unsafe { Accumulator::<A>::resolve(ctx, Request::Existing) } {
			Ok(accumulator) => accumulator,
			Err(err) => {
				trace!(%err, "value over empty frame");
				return encode(ctx, None);
			}
		};

		match accumulator.current().map(A::value) {
			None => encode(ctx, None),
			Some(Ok(output)) => encode(ctx, output.into_result()),
			Some(Err(err)) => fail(ctx, "value", &err),
		}
	});
}

/// # Safety
/// Must only be registered for a window aggregate whose accumulator type is `A`.
pub unsafe extern "C" fn inverse_trampoline<A: WindowAggregate>(
	ctx: *mut ffi::sqlite3_context,
	argc: c_int,
	argv: *mut *mut ffi::sqlite3_value,
) {
	run_guarded(ctx, "inverse", |ctx| unsafe { fold::<A, _>(ctx, "inverse", argc, argv, A::inverse) });
}
