// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use nativefn_abi::{FinalizeFn, InverseFn, ScalarFn, StepFn, ValueFn};

use crate::{
	aggregate::{
		Aggregate, finalize_trampoline, step_trampoline,
		window::{WindowAggregate, inverse_trampoline, value_trampoline},
	},
	config::FunctionOptions,
	error::{RegistrationError, WindowMethod},
};

/// Everything the engine needs to add one function to its catalog
#[derive(Debug, Clone)]
pub struct FunctionDescriptor {
	pub name: String,
	/// Number of arguments, or -1 for any number
	pub arity: i32,
	pub entry_points: EntryPoints,
	pub options: FunctionOptions,
}

impl FunctionDescriptor {
	pub fn scalar(name: impl Into<String>, arity: i32, entry_point: ScalarFn) -> Self {
		Self {
			name: name.into(),
			arity,
			entry_points: EntryPoints::Scalar(entry_point),
			options: FunctionOptions::default(),
		}
	}

	pub fn aggregate(name: impl Into<String>, arity: i32, kind: AggregateKind) -> Self {
		Self {
			name: name.into(),
			arity,
			entry_points: EntryPoints::Aggregate(kind),
			options: FunctionOptions::default(),
		}
	}

	pub fn with_options(mut self, options: FunctionOptions) -> Self {
		self.options = options;
		self
	}
}

#[derive(Debug, Clone, Copy)]
pub enum EntryPoints {
	Scalar(ScalarFn),
	Aggregate(AggregateKind),
}

impl EntryPoints {
	pub fn kind_name(&self) -> &'static str {
		match self {
			EntryPoints::Scalar(_) => "scalar",
			EntryPoints::Aggregate(AggregateKind::Plain {
				..
			}) => "aggregate",
			EntryPoints::Aggregate(AggregateKind::Windowed {
				..
			}) => "window",
		}
	}
}

/// Aggregate entry points after window detection
#[derive(Debug, Clone, Copy)]
pub enum AggregateKind {
	Plain {
		step: StepFn,
		finalize: FinalizeFn,
	},
	Windowed {
		step: StepFn,
		finalize: FinalizeFn,
		value: ValueFn,
		inverse: InverseFn,
	},
}

/// Aggregate entry points as supplied, before window detection
#[derive(Debug, Clone, Copy)]
pub struct AggregateDescriptor {
	pub step: StepFn,
	pub finalize: FinalizeFn,
	pub value: Option<ValueFn>,
	pub inverse: Option<InverseFn>,
}

impl AggregateDescriptor {
	/// Entry points of a plain aggregate
	pub fn of<A: Aggregate>() -> Self {
		Self {
			step: step_trampoline::<A>,
			finalize: finalize_trampoline::<A>,
			value: None,
			inverse: None,
		}
	}

	/// Entry points of a window aggregate
	pub fn window<A: WindowAggregate>() -> Self {
		Self {
			step: step_trampoline::<A>,
			finalize: finalize_trampoline::<A>,
			value: Some(value_trampoline::<A>),
			inverse: Some(inverse_trampoline::<A>),
		}
	}

	/// Windowed when both value and inverse are present, plain when neither is
	pub fn kind(&self, name: &str) -> Result<AggregateKind, RegistrationError> {
		match (self.value, self.inverse) {
			(None, None) => Ok(AggregateKind::Plain {
				step: self.step,
				finalize: self.finalize,
			}),
			(Some(value), Some(inverse)) => Ok(AggregateKind::Windowed {
				step: self.step,
				finalize: self.finalize,
				value,
				inverse,
			}),
			(Some(_), None) => Err(RegistrationError::PartialWindow {
				name: name.to_string(),
				present: WindowMethod::Value,
				missing: WindowMethod::Inverse,
			}),
			(None, Some(_)) => Err(RegistrationError::PartialWindow {
				name: name.to_string(),
				present: WindowMethod::Inverse,
				missing: WindowMethod::Value,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FunctionResult;

	#[derive(Clone, Copy)]
	struct Count(i64);

	impl Aggregate for Count {
		type Args = ();
		type Output = i64;

		fn init() -> Self {
			Count(0)
		}

		fn step(&mut self, _: ()) -> FunctionResult<()> {
			self.0 += 1;
			Ok(())
		}

		fn finalize(&mut self) -> FunctionResult<i64> {
			Ok(self.0)
		}
	}

	impl WindowAggregate for Count {
		fn value(&mut self) -> FunctionResult<i64> {
			Ok(self.0)
		}

		fn inverse(&mut self, _: ()) -> FunctionResult<()> {
			self.0 -= 1;
			Ok(())
		}
	}

	#[test]
	fn test_plain_aggregate() {
		let kind = AggregateDescriptor::of::<Count>().kind("count").unwrap();
		assert!(matches!(kind, AggregateKind::Plain { .. }));
	}

	#[test]
	fn test_window_aggregate() {
		let kind = AggregateDescriptor::window::<Count>().kind("count").unwrap();
		assert!(matches!(kind, AggregateKind::Windowed { .. }));
		assert_eq!(EntryPoints::Aggregate(kind).kind_name(), "window");
	}

	#[test]
	fn test_partial_window_rejected() {
		let mut descriptor = AggregateDescriptor::window::<Count>();
		descriptor.inverse = None;
		assert_eq!(
			descriptor.kind("count").unwrap_err(),
			RegistrationError::PartialWindow {
				name: "count".to_string(),
				present: WindowMethod::Value,
				missing: WindowMethod::Inverse,
			}
		);

		let mut descriptor = AggregateDescriptor::window::<Count>();
		descriptor.value = None;
		assert!(matches!(
			descriptor.kind("count"),
			Err(RegistrationError::PartialWindow {
				present: WindowMethod::Inverse,
				..
			})
		));
	}
}
