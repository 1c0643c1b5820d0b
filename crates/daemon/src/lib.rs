// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! juke daemon: the control-channel session loop around the action queue
//! engine.

pub mod lifecycle;
pub mod protocol;
pub mod reader;
pub mod server;

pub use lifecycle::{Config, LifecycleError};
pub use reader::{run_session, SessionOutcome};
pub use server::run;
