// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registration of native functions in the engine's function catalog

mod descriptor;

use std::{
	ffi::{CStr, CString, c_int},
	sync::Arc,
};

pub use descriptor::{AggregateDescriptor, AggregateKind, EntryPoints, FunctionDescriptor};
use nativefn_abi::{
	DestroyFn, ScalarFn,
	constants::{MAX_FUNCTION_NAME_BYTES, VARIADIC_ARITY},
	ffi,
};
use rusqlite::Connection;
use tracing::{debug, instrument, warn};

use crate::{
	config::FunctionOptions,
	error::{RegistrationError, Result},
	ffi::{FunctionState, destroy_function_state},
};

/// Register `descriptor` on `conn`
///
/// Replaces any function with the same name and arity. The engine refuses the
/// replacement while a statement on the connection is running.
#[instrument(name = "function::register", level = "debug", skip(conn, descriptor), fields(name = %descriptor.name, arity = descriptor.arity))]
pub fn register(conn: &Connection, descriptor: &FunctionDescriptor) -> Result<()> {
	unsafe { register_raw(conn.handle(), descriptor) }
}

/// Register `descriptor` on a raw connection handle
///
/// # Safety
/// `db` must be an open connection used only from the calling thread for the
/// duration of the call.
pub unsafe fn register_raw(
	db: *mut ffi::sqlite3,
	descriptor: &FunctionDescriptor,
) -> Result<()> {
	let state = Arc::new(FunctionState::new(descriptor.name.as_str()));
	unsafe { register_with_state(db, descriptor, state) }
}

unsafe fn register_with_state(
	db: *mut ffi::sqlite3,
	descriptor: &FunctionDescriptor,
	state: Arc<FunctionState>,
) -> Result<()> {
	let name = descriptor.name.as_str();
	if descriptor.arity < VARIADIC_ARITY {
		return Err(RegistrationError::InvalidArity {
			name: name.to_string(),
			arity: descriptor.arity,
		});
	}
	if name.len() > MAX_FUNCTION_NAME_BYTES {
		return Err(RegistrationError::InvalidName {
			name: name.to_string(),
		});
	}
	let c_name = CString::new(name).map_err(|_| RegistrationError::InvalidName {
		name: name.to_string(),
	})?;

	let flags = descriptor.options.flags().bits();
	let destroy: DestroyFn = destroy_function_state;
	let user_data = FunctionState::share(&state);

	let rc = match descriptor.entry_points {
		EntryPoints::Scalar(scalar) => unsafe {
			ffi::sqlite3_create_function_v2(
				db,
				c_name.as_ptr(),
				descriptor.arity,
				flags,
				user_data,
				Some(scalar),
				None,
				None,
				Some(destroy),
			)
		},
		EntryPoints::Aggregate(AggregateKind::Plain {
			step,
			finalize,
		}) => unsafe {
			ffi::sqlite3_create_function_v2(
				db,
				c_name.as_ptr(),
				descriptor.arity,
				flags,
				user_data,
				None,
				Some(step),
				Some(finalize),
				Some(destroy),
			)
		},
		EntryPoints::Aggregate(AggregateKind::Windowed {
			step,
			finalize,
			value,
			inverse,
		}) => unsafe {
			ffi::sqlite3_create_window_function(
				db,
				c_name.as_ptr(),
				descriptor.arity,
				flags,
				user_data,
				Some(step),
				Some(finalize),
				Some(value),
				Some(inverse),
				Some(destroy),
			)
		},
	};

	if rc != ffi::SQLITE_OK {
		// the engine runs the destroy callback on most failures itself
		unsafe { FunctionState::reclaim(&state, user_data) };
		let err = RegistrationError::Engine {
			name: name.to_string(),
			code: rc,
			message: unsafe { engine_message(db, rc) },
		};
		warn!(%err, "engine rejected function");
		return Err(err);
	}

	debug!(kind = descriptor.entry_points.kind_name(), "function registered");
	Ok(())
}

/// Error text for a failed call that returned `rc`
///
/// Prefers the connection's message, which carries detail such as active
/// statements, and falls back to the generic text for the code when the
/// connection's error state belongs to an earlier call.
unsafe fn engine_message(db: *mut ffi::sqlite3, rc: c_int) -> String {
	unsafe {
		if !db.is_null() && ffi::sqlite3_errcode(db) == rc {
			let message = ffi::sqlite3_errmsg(db);
			if !message.is_null() {
				return CStr::from_ptr(message).to_string_lossy().into_owned();
			}
		}
		let message = ffi::sqlite3_errstr(rc);
		if message.is_null() {
			return format!("error code {rc}");
		}
		CStr::from_ptr(message).to_string_lossy().into_owned()
	}
}

/// Register a scalar entry point under `name`
pub fn create_scalar(
	conn: &Connection,
	name: &str,
	arity: i32,
	entry_point: ScalarFn,
	deterministic: bool,
) -> Result<()> {
	let descriptor = FunctionDescriptor::scalar(name, arity, entry_point)
		.with_options(FunctionOptions::new().deterministic(deterministic));
	register(conn, &descriptor)
}

/// Register an aggregate, as a window function when it has value and inverse
pub fn create_aggregate(
	conn: &Connection,
	name: &str,
	arity: i32,
	entry_points: AggregateDescriptor,
	deterministic: bool,
) -> Result<()> {
	let descriptor = FunctionDescriptor::aggregate(name, arity, entry_points.kind(name)?)
		.with_options(FunctionOptions::new().deterministic(deterministic));
	register(conn, &descriptor)
}
