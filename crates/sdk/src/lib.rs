// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Native function bridge for SQLite
//!
//! Lets Rust types act as scalar, aggregate and window functions through
//! SQLite's C extension ABI. Arguments are decoded from the engine's dynamic
//! values into typed tuples, aggregate state lives in memory owned by the
//! engine, and registration wires monomorphised `extern "C"` entry points into
//! the connection's function catalog.
//!
//! # Example
//!
//! ```
//! use nativefn::{FunctionOptions, FunctionRegistry, scalar_function};
//! use rusqlite::Connection;
//!
//! scalar_function! {
//! 	pub AddOne = fn add_one(x: Option<f64>) -> Option<f64> {
//! 		x.map(|x| x + 1.0)
//! 	}
//! }
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.register_scalar::<AddOne>("add_one", FunctionOptions::new().deterministic(true)).unwrap();
//!
//! let result: f64 = conn.query_row("SELECT add_one(5.0)", [], |row| row.get(0)).unwrap();
//! assert_eq!(result, 6.0);
//! ```

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod aggregate;
pub mod args;
pub mod config;
pub mod connection;
pub mod error;
pub mod ffi;
mod macros;
pub mod registry;
pub mod scalar;
pub mod value;

pub use aggregate::{Aggregate, window::WindowAggregate};
pub use args::{ArgumentTuple, Arguments, assemble};
pub use config::FunctionOptions;
pub use connection::FunctionRegistry;
pub use error::{DecodeError, FunctionError, FunctionResult, LifecycleError, RegistrationError, Result};
pub use registry::{
	AggregateDescriptor, AggregateKind, EntryPoints, FunctionDescriptor, create_aggregate, create_scalar, register,
};
pub use scalar::{ScalarFunction, scalar_entry_point};
pub use value::{
	ArgType, ArgumentSlot, TypedValue, Value, ValueType,
	convert::{FromArgument, IntoResult},
};
