// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Action performer capability.
//!
//! An `ActionPerformer` executes one item asynchronously and reports
//! completion through the `CompletionTx` handed to it at start. Exactly one
//! of the two outcomes fires per started action, exactly once; consuming
//! `self` in `CompletionTx` makes that a compile-time property rather than
//! a runtime convention.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

mod player;
pub use player::{PlayerAction, PlayerPerformer};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAction, FakePerformer, PerformerCall};

/// How a started action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to natural completion.
    Finished,
    /// The action was cancelled before completing.
    Cancelled,
}

/// Errors starting an action
#[derive(Debug, Error)]
pub enum PerformError {
    #[error("failed to start player '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Exactly-once completion notifier for a started action.
pub struct CompletionTx {
    tx: mpsc::UnboundedSender<Outcome>,
}

impl CompletionTx {
    /// Wrap the receiving side's sender. One `CompletionTx` is minted per
    /// started action.
    pub fn new(tx: mpsc::UnboundedSender<Outcome>) -> Self {
        Self { tx }
    }

    /// The action ran to completion.
    pub fn finished(self) {
        // A send failure means the receiver is gone; nothing to report to.
        let _ = self.tx.send(Outcome::Finished);
    }

    /// The action was cancelled before completing.
    pub fn cancelled(self) {
        let _ = self.tx.send(Outcome::Cancelled);
    }
}

/// Handle for one in-flight action.
#[async_trait]
pub trait Action: Send {
    /// Request early termination. Safe to call when the action is about to
    /// finish naturally; exactly one outcome is still delivered.
    fn cancel(&mut self);

    /// Wait until the action's unit of execution has fully stopped.
    /// Idempotent.
    async fn wait(&mut self);
}

/// Starts one asynchronous unit of work per item.
#[async_trait]
pub trait ActionPerformer: Send + Sync + 'static {
    type Action: Action + Send + 'static;

    /// Begin work on `item` immediately, without blocking the caller.
    ///
    /// The returned handle stays valid until `done` has fired and the
    /// handle has been waited.
    async fn start(&self, item: &str, done: CompletionTx)
        -> Result<Self::Action, PerformError>;
}
