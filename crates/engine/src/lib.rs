// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! juke execution engine: the single-worker cancellable action queue.

mod engine;

pub use engine::{Engine, EngineError};
