// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::c_void,
	panic::{AssertUnwindSafe, catch_unwind},
	process::abort,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};

use tracing::{error, trace};

use crate::value::ContextHandle;

/// Per-registration state handed to the engine as user data
///
/// Lives as long as the function stays registered on its connection. The
/// engine holds one `Arc` share through the user-data pointer and gives it back
/// exactly once through [`destroy_function_state`].
///
/// The initialization flag is connection scoped. The engine serialises
/// statement execution on a connection, so relaxed ordering is enough; code
/// that drives one connection from several threads at once is outside what
/// this flag can protect.
#[derive(Debug)]
pub struct FunctionState {
	name: String,
	initialized: AtomicBool,
}

impl FunctionState {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			initialized: AtomicBool::new(false),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Has an accumulator been constructed since the last finalize
	pub fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Relaxed)
	}

	pub fn mark_initialized(&self) {
		self.initialized.store(true, Ordering::Relaxed);
	}

	pub fn reset(&self) {
		self.initialized.store(false, Ordering::Relaxed);
	}

	/// Hand one share to the engine
	pub(crate) fn share(state: &Arc<Self>) -> *mut c_void {
		Arc::into_raw(Arc::clone(state)) as *mut c_void
	}

	/// Give back the engine's share if the engine did not already do so
	///
	/// # Safety
	/// `raw` must come from [`FunctionState::share`] on `state`, and the engine
	/// must no longer hold it.
	pub(crate) unsafe fn reclaim(state: &Arc<Self>, raw: *mut c_void) {
		if Arc::strong_count(state) > 1 {
			unsafe { Arc::decrement_strong_count(raw as *const Self) };
		}
	}

	/// State of the function the running callback belongs to
	///
	/// # Safety
	/// The function must have been registered with a `FunctionState` as its
	/// user data, which every registration in this crate does.
	pub(crate) unsafe fn from_context<'call>(ctx: ContextHandle<'call>) -> Option<&'call FunctionState> {
		unsafe { (ctx.user_data() as *const FunctionState).as_ref() }
	}
}

/// Destroy callback for the engine's share of a [`FunctionState`]
///
/// A null pointer is ignored.
///
/// # Safety
/// `data` must be null or a pointer produced by [`FunctionState::share`] that
/// has not been released yet.
pub unsafe extern "C" fn destroy_function_state(data: *mut c_void) {
	if data.is_null() {
		trace!("destroy called without user data");
		return;
	}

	let result = catch_unwind(AssertUnwindSafe(|| {
		let state = unsafe { Arc::from_raw(data as *const FunctionState) };
		trace!(name = state.name(), "releasing function state");
	}));

	if let Err(e) = result {
		error!(?e, "Panic in destroy_function_state - aborting");
		abort();
	}
}
