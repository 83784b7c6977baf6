// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Engine limits and layout guarantees

/// Arity value meaning "any number of arguments"
pub const VARIADIC_ARITY: i32 = -1;

/// Maximum length of a function name in UTF-8 bytes
///
/// Longer names are rejected by the engine with `SQLITE_MISUSE`.
pub const MAX_FUNCTION_NAME_BYTES: usize = 255;

/// Alignment guaranteed for memory returned by `sqlite3_aggregate_context`
///
/// The engine allocates accumulators through its general purpose allocator,
/// which returns 8-byte aligned blocks.
pub const ACCUMULATOR_ALIGN: usize = 8;

/// Largest accumulator the engine can hand out in one request
pub const MAX_ACCUMULATOR_BYTES: usize = i32::MAX as usize;
