// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Performer backed by an external player process.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{Action, ActionPerformer, CompletionTx, PerformError};

/// Runs one external player process per item, e.g. `mplayer <path>`.
pub struct PlayerPerformer {
    program: String,
    args: Vec<String>,
}

impl PlayerPerformer {
    /// Create a performer running `program [args...] <item>`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ActionPerformer for PlayerPerformer {
    type Action = PlayerAction;

    async fn start(
        &self,
        item: &str,
        done: CompletionTx,
    ) -> Result<PlayerAction, PerformError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(item)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| PerformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(item, program = %self.program, "player started");

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let item = item.to_string();

        // The task owns the child; the select resolves the race between
        // natural exit and cancellation to exactly one outcome.
        let task = tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    match status {
                        Ok(status) => debug!(item = %item, %status, "player exited"),
                        Err(e) => warn!(item = %item, error = %e, "failed to reap player"),
                    }
                    done.finished();
                }
                _ = cancel_rx => {
                    if let Err(e) = child.start_kill() {
                        warn!(item = %item, error = %e, "failed to kill player");
                    }
                    let _ = child.wait().await;
                    debug!(item = %item, "player cancelled");
                    done.cancelled();
                }
            }
        });

        Ok(PlayerAction {
            cancel_tx: Some(cancel_tx),
            task: Some(task),
        })
    }
}

/// Handle for one running player process.
pub struct PlayerAction {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

#[async_trait]
impl Action for PlayerAction {
    fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            // Send failure means the process already exited naturally.
            let _ = tx.send(());
        }
    }

    async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "player task join failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
