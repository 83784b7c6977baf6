// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use nativefn::{
	FunctionError, FunctionOptions, FunctionRegistry, FunctionResult, ScalarFunction, create_scalar,
	scalar_entry_point, scalar_function,
};
use rusqlite::{Connection, params};

scalar_function! {
	AddOne = fn add_one(x: f64) -> f64 {
		x + 1.0
	}
}

scalar_function! {
	AddOneOpt = fn add_one_opt(x: Option<f64>) -> Option<f64> {
		x.map(|x| x + 1.0)
	}
}

scalar_function! {
	AddInts = fn add_ints(a: i64, b: i64) -> i64 {
		a + b
	}
}

scalar_function! {
	StringLen = fn string_len(s: String) -> i64 {
		s.chars().count() as i64
	}
}

scalar_function! {
	IdI32 = fn id_i32(x: i32) -> i32 { x }
}

scalar_function! {
	IdI64 = fn id_i64(x: i64) -> i64 { x }
}

scalar_function! {
	IdF64 = fn id_f64(x: f64) -> f64 { x }
}

scalar_function! {
	IdText = fn id_text(x: String) -> String { x }
}

scalar_function! {
	IdBlob = fn id_blob(x: Vec<u8>) -> Vec<u8> { x }
}

scalar_function! {
	IsPositive = fn is_positive(x: i64) -> bool { x > 0 }
}

scalar_function! {
	Answer = fn answer() -> i64 { 42 }
}

struct SafeDiv;

impl ScalarFunction for SafeDiv {
	type Args = (i64, i64);
	type Output = i64;

	fn call((a, b): Self::Args) -> FunctionResult<i64> {
		if b == 0 {
			return Err(FunctionError::new("division by zero"));
		}
		Ok(a / b)
	}
}

struct Explode;

impl ScalarFunction for Explode {
	type Args = (i64,);
	type Output = i64;

	fn call(_: Self::Args) -> FunctionResult<i64> {
		panic!("boom")
	}
}

fn with_functions() -> Connection {
	let conn = common::connection();
	let options = FunctionOptions::new().deterministic(true);
	conn.register_scalar::<AddOne>("add_one", options).unwrap();
	conn.register_scalar::<AddOneOpt>("add_one_opt", options).unwrap();
	conn.register_scalar::<AddInts>("add_ints", options).unwrap();
	conn.register_scalar::<StringLen>("string_len", options).unwrap();
	conn.register_scalar::<IdI32>("id_i32", options).unwrap();
	conn.register_scalar::<IdI64>("id_i64", options).unwrap();
	conn.register_scalar::<IdF64>("id_f64", options).unwrap();
	conn.register_scalar::<IdText>("id_text", options).unwrap();
	conn.register_scalar::<IdBlob>("id_blob", options).unwrap();
	conn.register_scalar::<IsPositive>("is_positive", options).unwrap();
	conn.register_scalar::<Answer>("answer", options).unwrap();
	conn.register_scalar::<SafeDiv>("safe_div", options).unwrap();
	conn.register_scalar::<Explode>("explode", FunctionOptions::new()).unwrap();
	conn
}

fn query_error(conn: &Connection, sql: &str) -> String {
	conn.query_row(sql, [], |row| row.get::<_, rusqlite::types::Value>(0)).unwrap_err().to_string()
}

#[test]
fn test_add_one() {
	let conn = with_functions();
	let result: f64 = conn.query_row("SELECT add_one(5.0)", [], |row| row.get(0)).unwrap();
	assert_eq!(result, 6.0);
}

#[test]
fn test_add_one_accepts_exact_integer() {
	let conn = with_functions();
	let result: f64 = conn.query_row("SELECT add_one(5)", [], |row| row.get(0)).unwrap();
	assert_eq!(result, 6.0);
}

#[test]
fn test_optional_argument_passes_null_through() {
	let conn = with_functions();
	let result: Option<f64> = conn.query_row("SELECT add_one_opt(NULL)", [], |row| row.get(0)).unwrap();
	assert_eq!(result, None);

	let results: Vec<Option<f64>> = conn
		.prepare("SELECT add_one_opt(x) FROM s ORDER BY rowid")
		.unwrap()
		.query_map([], |row| row.get(0))
		.unwrap()
		.collect::<Result<_, _>>()
		.unwrap();
	assert_eq!(results, vec![Some(2.0), None, Some(4.0)]);
}

#[test]
fn test_required_argument_rejects_null() {
	let conn = with_functions();
	let message = query_error(&conn, "SELECT add_one(NULL)");
	assert!(message.contains("add_one"), "{message}");
	assert!(message.contains("unexpected NULL"), "{message}");

	let message = query_error(&conn, "SELECT string_len(NULL)");
	assert!(message.contains("unexpected NULL for non-nullable text argument"), "{message}");
}

#[test]
fn test_binary_and_nullary() {
	let conn = with_functions();
	let sum: i64 = conn.query_row("SELECT add_ints(40, 2)", [], |row| row.get(0)).unwrap();
	assert_eq!(sum, 42);
	let answer: i64 = conn.query_row("SELECT answer()", [], |row| row.get(0)).unwrap();
	assert_eq!(answer, 42);
}

#[test]
fn test_wrong_argument_count_is_rejected_by_engine() {
	let conn = with_functions();
	let message = query_error(&conn, "SELECT add_ints(1)");
	assert!(message.contains("wrong number of arguments"), "{message}");
}

#[test]
fn test_string_len_counts_characters() {
	let conn = with_functions();
	let len: i64 = conn.query_row("SELECT string_len('héllo')", [], |row| row.get(0)).unwrap();
	assert_eq!(len, 5);
	let len: i64 = conn.query_row("SELECT string_len('')", [], |row| row.get(0)).unwrap();
	assert_eq!(len, 0);
}

#[test]
fn test_integer_round_trip() {
	let conn = with_functions();
	for v in [0, 1, -1, i32::MIN, i32::MAX] {
		let out: i32 = conn.query_row("SELECT id_i32(?1)", params![v], |row| row.get(0)).unwrap();
		assert_eq!(out, v);
	}
	for v in [0, -7, i64::MIN, i64::MAX] {
		let out: i64 = conn.query_row("SELECT id_i64(?1)", params![v], |row| row.get(0)).unwrap();
		assert_eq!(out, v);
	}
}

#[test]
fn test_float_round_trip() {
	let conn = with_functions();
	for v in [0.0, -0.5, 1e300, f64::MIN_POSITIVE, -123456.789] {
		let out: f64 = conn.query_row("SELECT id_f64(?1)", params![v], |row| row.get(0)).unwrap();
		assert_eq!(out, v);
	}
}

#[test]
fn test_text_round_trip() {
	let conn = with_functions();
	let long = "ab\u{00e9}c".repeat(256 * 1024);
	for v in [String::new(), "hello".to_string(), "nul\0inside".to_string(), long] {
		let out: String = conn.query_row("SELECT id_text(?1)", params![v], |row| row.get(0)).unwrap();
		assert_eq!(out, v);
	}
}

#[test]
fn test_blob_round_trip() {
	let conn = with_functions();
	for v in [Vec::new(), vec![0u8, 255, 16], vec![7u8; 70_000]] {
		let out: Vec<u8> = conn.query_row("SELECT id_blob(?1)", params![v], |row| row.get(0)).unwrap();
		assert_eq!(out, v);
	}
}

#[test]
fn test_bool_result_is_integer() {
	let conn = with_functions();
	let result: (i64, i64) =
		conn.query_row("SELECT is_positive(3), is_positive(-3)", [], |row| Ok((row.get(0)?, row.get(1)?))).unwrap();
	assert_eq!(result, (1, 0));
}

#[test]
fn test_out_of_range_and_mismatch() {
	let conn = with_functions();
	let message = query_error(&conn, "SELECT id_i32(3000000000)");
	assert!(message.contains("out of range for i32"), "{message}");

	let message = query_error(&conn, "SELECT id_i64('abc')");
	assert!(message.contains("expected i64 argument, found TEXT"), "{message}");

	let message = query_error(&conn, "SELECT id_i64(1.5)");
	assert!(message.contains("found REAL"), "{message}");

	let message = query_error(&conn, "SELECT id_text(x'0102')");
	assert!(message.contains("found BLOB"), "{message}");
}

#[test]
fn test_user_error_fails_query() {
	let conn = with_functions();
	let result: i64 = conn.query_row("SELECT safe_div(9, 3)", [], |row| row.get(0)).unwrap();
	assert_eq!(result, 3);

	let message = query_error(&conn, "SELECT safe_div(1, 0)");
	assert_eq!(message, "safe_div: division by zero");
}

#[test]
fn test_panic_fails_only_that_call() {
	let conn = with_functions();
	let message = query_error(&conn, "SELECT explode(1)");
	assert!(message.contains("explode: panicked: boom"), "{message}");

	let result: f64 = conn.query_row("SELECT add_one(1.0)", [], |row| row.get(0)).unwrap();
	assert_eq!(result, 2.0);
}

#[test]
fn test_deterministic_flag_controls_index_use() {
	let conn = with_functions();
	conn.execute_batch("CREATE INDEX s_plus_one ON s(add_one_opt(x))").unwrap();

	let message = conn.execute_batch("CREATE INDEX s_boom ON s(explode(x))").unwrap_err().to_string();
	assert!(message.contains("non-deterministic"), "{message}");
}

#[test]
fn test_direct_only_blocks_views() {
	let conn = common::connection();
	conn.register_scalar::<AddOneOpt>("guarded", FunctionOptions::new().direct_only(true)).unwrap();
	conn.execute_batch("CREATE VIEW v AS SELECT guarded(x) AS y FROM s").unwrap();

	let direct: Option<f64> = conn.query_row("SELECT guarded(1.0)", [], |row| row.get(0)).unwrap();
	assert_eq!(direct, Some(2.0));

	let message = query_error(&conn, "SELECT y FROM v");
	assert!(message.contains("unsafe use of guarded()"), "{message}");
}

#[test]
fn test_create_scalar_with_raw_entry_point() {
	let conn = common::connection();
	create_scalar(&conn, "plus", 2, scalar_entry_point::<AddInts>(), true).unwrap();
	let sum: i64 = conn.query_row("SELECT plus(2, 3)", [], |row| row.get(0)).unwrap();
	assert_eq!(sum, 5);
}

#[test]
fn test_extra_arguments_are_rejected() {
	let conn = common::connection();
	create_scalar(&conn, "add3", 3, scalar_entry_point::<AddInts>(), true).unwrap();
	let message = query_error(&conn, "SELECT add3(1, 2, 3)");
	assert_eq!(message, "add3: expected 2 arguments, received 3");
}
