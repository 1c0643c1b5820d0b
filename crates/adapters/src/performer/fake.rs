// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Fake performer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{Action, ActionPerformer, CompletionTx, PerformError};

/// Recorded performer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformerCall {
    Start { item: String },
    Cancel { item: String },
    Wait { item: String },
    Finished { item: String },
    Cancelled { item: String },
}

#[derive(Default)]
struct Inner {
    calls: Vec<PerformerCall>,
    /// Completion slot for the in-flight action (manual mode).
    current: Option<(String, CompletionTx)>,
    /// Set when a second action is started while one is still in flight.
    overlap: bool,
    fail_next_start: bool,
}

impl Inner {
    fn record(&mut self, call: PerformerCall) {
        self.calls.push(call);
    }
}

/// Fake performer for testing.
///
/// In manual mode (`new`) actions stay in flight until the test calls
/// `finish_current` or the engine cancels them. In instant mode every
/// action finishes at start.
#[derive(Clone, Default)]
pub struct FakePerformer {
    inner: Arc<Mutex<Inner>>,
    instant: bool,
}

impl FakePerformer {
    /// Manual completion mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every started action finishes immediately.
    pub fn instant() -> Self {
        Self {
            inner: Arc::default(),
            instant: true,
        }
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<PerformerCall> {
        self.lock().calls.clone()
    }

    /// Items handed to `start`, in order.
    pub fn started(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PerformerCall::Start { item } => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether two actions were ever in flight at once.
    pub fn overlap_detected(&self) -> bool {
        self.lock().overlap
    }

    /// Make the next `start` fail synchronously.
    pub fn fail_next_start(&self) {
        self.lock().fail_next_start = true;
    }

    /// Complete the in-flight action naturally. Returns its item, or `None`
    /// if nothing is in flight (e.g. it was already cancelled).
    pub fn finish_current(&self) -> Option<String> {
        let mut inner = self.lock();
        let (item, done) = inner.current.take()?;
        inner.record(PerformerCall::Finished { item: item.clone() });
        done.finished();
        Some(item)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ActionPerformer for FakePerformer {
    type Action = FakeAction;

    async fn start(&self, item: &str, done: CompletionTx) -> Result<FakeAction, PerformError> {
        let mut inner = self.lock();

        if inner.fail_next_start {
            inner.fail_next_start = false;
            return Err(PerformError::Spawn {
                program: "fake".to_string(),
                source: std::io::Error::other("injected start failure"),
            });
        }

        inner.record(PerformerCall::Start {
            item: item.to_string(),
        });

        if inner.current.is_some() {
            inner.overlap = true;
        }

        if self.instant {
            inner.record(PerformerCall::Finished {
                item: item.to_string(),
            });
            done.finished();
        } else {
            inner.current = Some((item.to_string(), done));
        }

        Ok(FakeAction {
            item: item.to_string(),
            inner: Arc::clone(&self.inner),
        })
    }
}

/// Handle for one fake in-flight action.
pub struct FakeAction {
    item: String,
    inner: Arc<Mutex<Inner>>,
}

#[async_trait]
impl Action for FakeAction {
    fn cancel(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.record(PerformerCall::Cancel {
            item: self.item.clone(),
        });

        // Only the action still holding the completion slot can be
        // cancelled; a raced natural completion wins otherwise.
        let ours = matches!(&inner.current, Some((item, _)) if *item == self.item);
        if ours {
            if let Some((item, done)) = inner.current.take() {
                inner.record(PerformerCall::Cancelled { item });
                done.cancelled();
            }
        }
    }

    async fn wait(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.record(PerformerCall::Wait {
            item: self.item.clone(),
        });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
