// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Engine-facing plumbing shared by scalar and aggregate entry points

pub(crate) mod guard;
mod state;

pub use state::{FunctionState, destroy_function_state};
