// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Aggregate functions and their lifecycle
//!
//! An aggregation cycle moves through three states:
//!
//! - Uninitialized: no accumulator exists, or the last cycle was finalized
//! - Active: the first step constructed the accumulator with [`Aggregate::init`]
//! - Finalized: [`Aggregate::finalize`] produced the result and re-armed the
//!   next cycle
//!
//! Accumulators live in memory owned by the engine. They are never dropped,
//! which is why aggregate state must be `Copy`.

mod accumulator;
pub mod window;

use std::ffi::c_int;

use nativefn_abi::ffi;
use tracing::trace;

use self::accumulator::{Accumulator, Request};
use crate::{
	args::Arguments,
	error::FunctionResult,
	ffi::{
		FunctionState,
		guard::{fail, reject, run_guarded},
	},
	value::{ContextHandle, ValueHandle, convert::IntoResult, encode},
};

/// A native aggregate folding rows into an accumulator
pub trait Aggregate: Copy + 'static {
	type Args: Arguments;
	type Output: IntoResult;

	/// Fresh accumulator for a new cycle; must not fail
	fn init() -> Self;

	fn step(&mut self, args: Self::Args) -> FunctionResult<()>;

	fn finalize(&mut self) -> FunctionResult<Self::Output>;
}

/// Shared body of step and inverse
///
/// Arguments are assembled before the accumulator is touched, so a rejected
/// row leaves it as it was.
///
/// # Safety
/// `argc` and `argv` must be the engine's arguments for the running callback,
/// and the function must have been registered for accumulator type `A`.
pub(crate) unsafe fn fold<A, F>(
	ctx: ContextHandle<'_>,
	entry: &'static str,
	argc: c_int,
	argv: *mut *mut ffi::sqlite3_value,
	apply: F,
) where
	A: Aggregate,
	F: FnOnce(&mut A, A::Args) -> FunctionResult<()>,
{
	let argv = unsafe { ValueHandle::slice(argc, argv) };
	let args = match A::Args::from_handles(argv) {
		Ok(args) => args,
		Err(err) => return reject(ctx, entry, &err),
	};

	let accumulator = match unsafe { Accumulator::<A>::resolve(ctx, Request::Allocate) } {
		Ok(accumulator) => accumulator,
		Err(err) => {
			trace!(entry, %err, "row skipped");
			return;
		}
	};

	let state = unsafe { FunctionState::from_context(ctx) };
	if let Err(err) = apply(accumulator.activate(state), args) {
		fail(ctx, entry, &err);
	}
}

/// # Safety
/// Must only be registered for an aggregate whose accumulator type is `A`.
pub unsafe extern "C" fn step_trampoline<A: Aggregate>(
	ctx: *mut ffi::sqlite3_context,
	argc: c_int,
	argv: *mut *mut ffi::sqlite3_value,
) {
	run_guarded(ctx, "step", |ctx| unsafe { fold::<A, _>(ctx, "step", argc, argv, A::step) });
}

/// # Safety
/// Must only be registered for an aggregate whose accumulator type is `A`.
pub unsafe extern "C" fn finalize_trampoline<A: Aggregate>(ctx: *mut ffi::sqlite3_context) {
	run_guarded(ctx, "finalize", |ctx| {
		let state = unsafe { FunctionState::from_context(ctx) };
		let accumulator = match unsafe { Accumulator::<A>::resolve(ctx, Request::Existing) } {
			Ok(accumulator) => accumulator,
			Err(err) => {
				trace!(%err, "finalize over empty input");
				return encode(ctx, None);
			}
		};

		// the cycle is closed before user finalize runs, even if it panics
		let current = accumulator.current().copied();
		accumulator.finish(state);
		let result = current.map(|mut acc| acc.finalize());

		match result {
			None => encode(ctx, None),
			Some(Ok(output)) => encode(ctx, output.into_result()),
			Some(Err(err)) => fail(ctx, "finalize", &err),
		}
	});
}
