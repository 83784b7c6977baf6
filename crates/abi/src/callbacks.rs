// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Callback signatures invoked by the host engine
//!
//! Every entry point handed to the engine must match these bit for bit. The
//! engine owns `ctx` and every `sqlite3_value` in `argv` for the duration of
//! the call only; nothing reachable through them may be retained afterwards.

use core::ffi::{c_int, c_void};

use rusqlite::ffi::{sqlite3_context, sqlite3_value};

/// Scalar function body
///
/// # Parameters
/// - `ctx`: Result slot and per-call context
/// - `argc`: Number of arguments in `argv`
/// - `argv`: Argument value handles, `argc` entries long
pub type ScalarFn = unsafe extern "C" fn(ctx: *mut sqlite3_context, argc: c_int, argv: *mut *mut sqlite3_value);

/// Aggregate step: fold one row into the accumulator
pub type StepFn = unsafe extern "C" fn(ctx: *mut sqlite3_context, argc: c_int, argv: *mut *mut sqlite3_value);

/// Aggregate finalize: produce the result and end the aggregation cycle
pub type FinalizeFn = unsafe extern "C" fn(ctx: *mut sqlite3_context);

/// Window value: produce the current result without ending the cycle
pub type ValueFn = unsafe extern "C" fn(ctx: *mut sqlite3_context);

/// Window inverse: remove one row's contribution from the accumulator
pub type InverseFn = unsafe extern "C" fn(ctx: *mut sqlite3_context, argc: c_int, argv: *mut *mut sqlite3_value);

/// Release the user data registered alongside a function
///
/// # Safety
/// - Invoked by the engine when the function is redefined, deleted, when the
///   connection closes, or when registration fails
/// - Must tolerate a null pointer
pub type DestroyFn = unsafe extern "C" fn(user_data: *mut c_void);
