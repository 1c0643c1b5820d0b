// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod performer;

pub use performer::{
    Action, ActionPerformer, CompletionTx, Outcome, PerformError, PlayerAction, PlayerPerformer,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use performer::{FakeAction, FakePerformer, PerformerCall};
