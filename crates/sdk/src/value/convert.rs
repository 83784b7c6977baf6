// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Conversions between typed values and native Rust types

use crate::{
	error::DecodeError,
	value::{ArgType, ArgumentSlot, TypedValue},
};

/// Native type usable as a function parameter
///
/// `SLOT` declares the static type and nullability the argument assembler
/// checks engine values against before `from_typed` is called.
pub trait FromArgument: Sized {
	const SLOT: ArgumentSlot;

	fn from_typed(value: Option<TypedValue>) -> Result<Self, DecodeError>;
}

/// Native type usable as a function result; `None` becomes SQL NULL
pub trait IntoResult {
	fn into_result(self) -> Option<TypedValue>;
}

macro_rules! impl_from_argument {
	($ty:ty, $arg:ident) => {
		impl FromArgument for $ty {
			const SLOT: ArgumentSlot = ArgumentSlot::required(ArgType::$arg);

			fn from_typed(value: Option<TypedValue>) -> Result<Self, DecodeError> {
				match value {
					Some(TypedValue::$arg(v)) => Ok(v),
					Some(other) => Err(DecodeError::TypeMismatch {
						expected: ArgType::$arg,
						found: other.value_type(),
					}),
					None => Err(DecodeError::UnexpectedNull {
						expected: ArgType::$arg,
					}),
				}
			}
		}
	};
}

impl_from_argument!(i32, I32);
impl_from_argument!(i64, I64);
impl_from_argument!(f64, F64);
impl_from_argument!(String, Text);
impl_from_argument!(Vec<u8>, Blob);

impl<T: FromArgument> FromArgument for Option<T> {
	const SLOT: ArgumentSlot = ArgumentSlot::nullable(T::SLOT.ty);

	fn from_typed(value: Option<TypedValue>) -> Result<Self, DecodeError> {
		match value {
			None => Ok(None),
			value => T::from_typed(value).map(Some),
		}
	}
}

macro_rules! impl_into_result {
	($ty:ty, $variant:ident) => {
		impl IntoResult for $ty {
			fn into_result(self) -> Option<TypedValue> {
				Some(TypedValue::$variant(self.into()))
			}
		}
	};
}

impl_into_result!(i32, I32);
impl_into_result!(i64, I64);
impl_into_result!(f64, F64);
impl_into_result!(String, Text);
impl_into_result!(&str, Text);
impl_into_result!(Vec<u8>, Blob);

impl IntoResult for bool {
	fn into_result(self) -> Option<TypedValue> {
		Some(TypedValue::I32(self as i32))
	}
}

impl IntoResult for () {
	fn into_result(self) -> Option<TypedValue> {
		None
	}
}

impl IntoResult for TypedValue {
	fn into_result(self) -> Option<TypedValue> {
		Some(self)
	}
}

impl<T: IntoResult> IntoResult for Option<T> {
	fn into_result(self) -> Option<TypedValue> {
		self.and_then(IntoResult::into_result)
	}
}
