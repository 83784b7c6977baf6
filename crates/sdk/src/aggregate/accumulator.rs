// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::{c_int, c_void},
	mem::{MaybeUninit, align_of, size_of},
};

use nativefn_abi::constants::{ACCUMULATOR_ALIGN, MAX_ACCUMULATOR_BYTES};
use tracing::trace;

use crate::{aggregate::Aggregate, error::LifecycleError, ffi::FunctionState, value::ContextHandle};

/// How much memory a callback asks the engine for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
	/// Full accumulator size; allocates on first use
	Allocate,
	/// Zero bytes; only returns a block a previous step allocated
	Existing,
}

/// Layout of the aggregate memory block owned by the engine
///
/// The engine zero-fills the block when it first hands it out, so
/// `constructed` starts false and `state` starts uninitialised.
#[repr(C)]
pub(crate) struct Accumulator<A> {
	constructed: bool,
	state: MaybeUninit<A>,
}

impl<A: Aggregate> Accumulator<A> {
	const SIZE: c_int = {
		assert!(align_of::<Self>() <= ACCUMULATOR_ALIGN, "accumulator alignment exceeds the engine's allocation alignment");
		assert!(size_of::<Self>() <= MAX_ACCUMULATOR_BYTES, "accumulator is larger than the engine can allocate");
		size_of::<Self>() as c_int
	};

	/// # Safety
	/// `ctx` must be the context of an aggregate callback of a function whose
	/// accumulator type is `A`.
	pub(crate) unsafe fn resolve<'call>(
		ctx: ContextHandle<'call>,
		request: Request,
	) -> Result<&'call mut Self, LifecycleError> {
		let bytes = match request {
			Request::Allocate => Self::SIZE,
			Request::Existing => 0,
		};
		unsafe { borrow_accumulator(ctx.aggregate_context(bytes)) }.ok_or(LifecycleError::MissingAccumulator)
	}

	/// User state of the current cycle, constructed on first use
	///
	/// The marker in the block decides whether `A::init` runs; the connection
	/// flag follows it so that it reads true between the first step and the
	/// finalize of a cycle.
	pub(crate) fn activate(&mut self, state: Option<&FunctionState>) -> &mut A {
		if !self.constructed {
			trace!(
				function = state.map(FunctionState::name),
				first_in_cycle = !state.is_some_and(FunctionState::is_initialized),
				"constructing accumulator"
			);
			self.state.write(A::init());
			self.constructed = true;
			if let Some(state) = state {
				state.mark_initialized();
			}
		}
		unsafe { self.state.assume_init_mut() }
	}

	/// User state if a step of this cycle constructed it
	pub(crate) fn current(&mut self) -> Option<&mut A> {
		if self.constructed {
			Some(unsafe { self.state.assume_init_mut() })
		} else {
			None
		}
	}

	/// End the cycle; the next step constructs from scratch
	pub(crate) fn finish(&mut self, state: Option<&FunctionState>) {
		self.constructed = false;
		if let Some(state) = state {
			state.reset();
		}
	}
}

/// Reinterpret engine aggregate memory as an accumulator.
///
/// # Safety
/// `raw` must be null or point to a block returned by
/// `sqlite3_aggregate_context` for this function that is at least
/// `size_of::<Accumulator<A>>()` bytes long, aligned to `ACCUMULATOR_ALIGN`,
/// and zero-filled at allocation. No other reference to the block may exist
/// for `'call`.
///
/// The block is borrowed from the engine: it is never dropped here and must
/// never reach a deallocator. `A: Copy` guarantees there is no drop glue to
/// run.
unsafe fn borrow_accumulator<'call, A: Aggregate>(raw: *mut c_void) -> Option<&'call mut Accumulator<A>> {
	unsafe { raw.cast::<Accumulator<A>>().as_mut() }
}
