// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::Connection;

use crate::{
	aggregate::{Aggregate, window::WindowAggregate},
	args::Arguments,
	config::FunctionOptions,
	error::{RegistrationError, Result},
	registry::{AggregateDescriptor, FunctionDescriptor, register},
	scalar::{ScalarFunction, scalar_entry_point},
};

/// Typed registration of native functions on a connection
///
/// Arity comes from the function's argument tuple.
pub trait FunctionRegistry {
	fn register_scalar<F: ScalarFunction>(&self, name: &str, options: FunctionOptions) -> Result<()>;

	fn register_aggregate<A: Aggregate>(&self, name: &str, options: FunctionOptions) -> Result<()>;

	fn register_window<A: WindowAggregate>(&self, name: &str, options: FunctionOptions) -> Result<()>;
}

impl FunctionRegistry for Connection {
	fn register_scalar<F: ScalarFunction>(&self, name: &str, options: FunctionOptions) -> Result<()> {
		let arity = arity_of::<F::Args>(name)?;
		let descriptor = FunctionDescriptor::scalar(name, arity, scalar_entry_point::<F>()).with_options(options);
		register(self, &descriptor)
	}

	fn register_aggregate<A: Aggregate>(&self, name: &str, options: FunctionOptions) -> Result<()> {
		let arity = arity_of::<A::Args>(name)?;
		let kind = AggregateDescriptor::of::<A>().kind(name)?;
		let descriptor = FunctionDescriptor::aggregate(name, arity, kind).with_options(options);
		register(self, &descriptor)
	}

	fn register_window<A: WindowAggregate>(&self, name: &str, options: FunctionOptions) -> Result<()> {
		let arity = arity_of::<A::Args>(name)?;
		let kind = AggregateDescriptor::window::<A>().kind(name)?;
		let descriptor = FunctionDescriptor::aggregate(name, arity, kind).with_options(options);
		register(self, &descriptor)
	}
}

fn arity_of<T: Arguments>(name: &str) -> Result<i32> {
	i32::try_from(T::ARITY).map_err(|_| RegistrationError::InvalidArity {
		name: name.to_string(),
		arity: i32::MAX,
	})
}
