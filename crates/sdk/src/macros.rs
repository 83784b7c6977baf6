// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Declarative macros for function definitions

/// Define a scalar function from a plain Rust function
///
/// Expands to the function itself plus a zero-sized type implementing
/// [`ScalarFunction`](crate::ScalarFunction) that calls it. Parameter types
/// must implement `FromArgument`; `Option<T>` parameters accept NULL. The
/// return type must implement `IntoResult`.
///
/// # Example
/// ```
/// use nativefn::{FunctionOptions, FunctionRegistry, scalar_function};
/// use rusqlite::Connection;
///
/// scalar_function! {
/// 	/// Length of a string in characters
/// 	pub StringLen = fn string_len(s: String) -> i64 {
/// 		s.chars().count() as i64
/// 	}
/// }
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.register_scalar::<StringLen>("string_len", FunctionOptions::new()).unwrap();
/// let len: i64 = conn.query_row("SELECT string_len('héllo')", [], |row| row.get(0)).unwrap();
/// assert_eq!(len, 5);
/// ```
#[macro_export]
macro_rules! scalar_function {
	(
		$(#[$meta:meta])*
		$vis:vis $ty:ident = fn $name:ident($($arg:ident : $arg_ty:ty),* $(,)?) -> $ret:ty $body:block
	) => {
		$(#[$meta])*
		$vis fn $name($($arg: $arg_ty),*) -> $ret $body

		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default)]
		$vis struct $ty;

		impl $crate::ScalarFunction for $ty {
			type Args = ($($arg_ty,)*);
			type Output = $ret;

			#[allow(unused_variables)]
			fn call(args: Self::Args) -> $crate::FunctionResult<Self::Output> {
				let ($($arg,)*) = args;
				::core::result::Result::Ok($name($($arg),*))
			}
		}
	};
}
