// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use nativefn::{Aggregate, FunctionResult, WindowAggregate};
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

/// Route bridge logs to the test harness; set RUST_LOG to see them
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// In-memory connection with the shared fixture tables
///
/// - `s(x REAL)`: 1.0, NULL, 3.0
/// - `null_t(x REAL)`: NULL, NULL
/// - `empty_t(x REAL)`: no rows
/// - `t(key TEXT, ord INTEGER, value REAL)`: three partitions with a NULL
pub fn connection() -> Connection {
	init_tracing();
	let conn = Connection::open_in_memory().unwrap();
	conn.execute_batch(
		"CREATE TABLE s(x REAL);
		INSERT INTO s VALUES (1.0), (NULL), (3.0);

		CREATE TABLE null_t(x REAL);
		INSERT INTO null_t VALUES (NULL), (NULL);

		CREATE TABLE empty_t(x REAL);

		CREATE TABLE t(key TEXT, ord INTEGER, value REAL);
		INSERT INTO t VALUES
			('a', 1, 1.0), ('a', 2, 2.0), ('a', 3, 6.0), ('a', 4, NULL), ('a', 5, 9.5),
			('b', 1, -4.0), ('b', 2, 4.0),
			('c', 1, NULL), ('c', 2, 10.0), ('c', 3, 20.0), ('c', 4, 30.0);",
	)
	.unwrap();
	conn
}

/// Mean over optional floats, skipping NULL
#[derive(Debug, Clone, Copy)]
pub struct Mean {
	pub sum: f64,
	pub count: i64,
}

impl Aggregate for Mean {
	type Args = (Option<f64>,);
	type Output = Option<f64>;

	fn init() -> Self {
		Self {
			sum: 0.0,
			count: 0,
		}
	}

	fn step(&mut self, (x,): Self::Args) -> FunctionResult<()> {
		if let Some(x) = x {
			self.sum += x;
			self.count += 1;
		}
		Ok(())
	}

	fn finalize(&mut self) -> FunctionResult<Option<f64>> {
		self.value()
	}
}

impl WindowAggregate for Mean {
	fn value(&mut self) -> FunctionResult<Option<f64>> {
		if self.count == 0 {
			return Ok(None);
		}
		Ok(Some(self.sum / self.count as f64))
	}

	fn inverse(&mut self, (x,): Self::Args) -> FunctionResult<()> {
		if let Some(x) = x {
			self.sum -= x;
			self.count -= 1;
		}
		Ok(())
	}
}

/// Floats equal within rounding of running sums
pub fn assert_close(actual: Option<f64>, expected: Option<f64>) {
	match (actual, expected) {
		(Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "{a} != {e}"),
		(a, e) => assert_eq!(a, e),
	}
}
