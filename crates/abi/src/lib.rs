// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for native SQLite functions
//!
//! This crate describes the fixed surface the host engine exposes for
//! function registration: the callback signatures SQLite invokes, the flag
//! bits accepted by `sqlite3_create_function_v2` and
//! `sqlite3_create_window_function`, and the engine limits the bridge
//! validates against. It carries no behaviour of its own.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod callbacks;
pub mod constants;
pub mod flags;

pub use callbacks::{DestroyFn, FinalizeFn, InverseFn, ScalarFn, StepFn, ValueFn};
pub use flags::FunctionFlags;
pub use rusqlite::ffi;
