// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scalar functions

use std::ffi::c_int;

use nativefn_abi::{ScalarFn, ffi};

use crate::{
	args::Arguments,
	error::FunctionResult,
	ffi::guard::{fail, reject, run_guarded},
	value::{ValueHandle, convert::IntoResult, encode},
};

/// A native function producing one value per row
pub trait ScalarFunction: 'static {
	type Args: Arguments;
	type Output: IntoResult;

	fn call(args: Self::Args) -> FunctionResult<Self::Output>;
}

/// Entry point the engine calls for every row
///
/// # Safety
/// Must only be registered with a `FunctionState` as user data and called by
/// the engine with its own context and argument array.
pub unsafe extern "C" fn scalar_trampoline<F: ScalarFunction>(
	ctx: *mut ffi::sqlite3_context,
	argc: c_int,
	argv: *mut *mut ffi::sqlite3_value,
) {
	run_guarded(ctx, "scalar", |ctx| {
		let argv = unsafe { ValueHandle::slice(argc, argv) };
		let args = match F::Args::from_handles(argv) {
			Ok(args) => args,
			Err(err) => return reject(ctx, "scalar", &err),
		};

		match F::call(args) {
			Ok(output) => encode(ctx, output.into_result()),
			Err(err) => fail(ctx, "scalar", &err),
		}
	});
}

/// Address of the monomorphised entry point for `F`
pub fn scalar_entry_point<F: ScalarFunction>() -> ScalarFn {
	scalar_trampoline::<F>
}
