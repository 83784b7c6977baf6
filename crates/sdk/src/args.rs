// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Argument assembly from engine values into typed tuples

use crate::{
	error::DecodeError,
	value::{ArgumentSlot, TypedValue, ValueHandle, convert::FromArgument, decode},
};

/// Decoded arguments of one call, in declaration order
pub type ArgumentTuple = Vec<Option<TypedValue>>;

/// Decode `argv` against `slots`, stopping at the first failure.
///
/// Reads the handles and nothing else. A handle count that differs from the
/// declared slots fails with `ArityMismatch` before any value is read.
pub fn assemble(slots: &[ArgumentSlot], argv: &[ValueHandle<'_>]) -> Result<ArgumentTuple, DecodeError> {
	check_arity(slots.len(), argv.len())?;
	slots.iter().zip(argv).map(|(slot, handle)| decode(*handle, *slot)).collect()
}

/// Tuple of native parameters a function is called with
pub trait Arguments: Sized {
	const ARITY: usize;
	const SLOTS: &'static [ArgumentSlot];

	fn from_tuple(tuple: ArgumentTuple) -> Result<Self, DecodeError>;

	fn from_handles(argv: &[ValueHandle<'_>]) -> Result<Self, DecodeError> {
		Self::from_tuple(assemble(Self::SLOTS, argv)?)
	}
}

fn check_arity(expected: usize, actual: usize) -> Result<(), DecodeError> {
	if actual != expected {
		return Err(DecodeError::ArityMismatch {
			expected,
			actual,
		});
	}
	Ok(())
}

macro_rules! impl_arguments {
	($len:expr; $($name:ident),*) => {
		impl<$($name: FromArgument),*> Arguments for ($($name,)*) {
			const ARITY: usize = $len;
			const SLOTS: &'static [ArgumentSlot] = &[$($name::SLOT),*];

			#[allow(unused_mut, unused_variables)]
			fn from_tuple(tuple: ArgumentTuple) -> Result<Self, DecodeError> {
				check_arity($len, tuple.len())?;
				let mut values = tuple.into_iter();
				Ok(($($name::from_typed(values.next().flatten())?,)*))
			}
		}
	};
}

impl_arguments!(0;);
impl_arguments!(1; A);
impl_arguments!(2; A, B);
impl_arguments!(3; A, B, C);
impl_arguments!(4; A, B, C, D);
impl_arguments!(5; A, B, C, D, E);
impl_arguments!(6; A, B, C, D, E, F);
impl_arguments!(7; A, B, C, D, E, F, G);
impl_arguments!(8; A, B, C, D, E, F, G, H);
