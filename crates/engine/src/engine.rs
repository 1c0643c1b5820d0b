// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Single-worker cancellable action queue.
//!
//! One worker task owns the backlog and the in-flight action. Producers and
//! controllers never touch that state directly: every operation travels
//! through one ordered command stream, and action completions arrive on a
//! separate out-of-band channel that the worker drains ahead of new
//! commands, so a pending cancel or exit is never starved by backlog growth.

use std::collections::VecDeque;
use std::sync::Mutex;

use juke_adapters::{Action, ActionPerformer, CompletionTx, Outcome};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Errors reported by engine operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A skip was requested while nothing was running. Expected and
    /// frequent; callers report it rather than treating it as fatal.
    #[error("no action is currently running")]
    NoActiveAction,
}

/// Worker states. `Exited` is represented by the worker task having
/// returned, observable by joining its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Running,
    CancellingCurrent,
    Exiting,
}

enum Command {
    Enqueue {
        item: String,
    },
    CancelCurrent {
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Handle to the queue worker.
///
/// Operations may be issued from any task or thread; the worker serializes
/// them. At most one action is ever in flight per engine instance.
pub struct Engine {
    cmd_tx: mpsc::UnboundedSender<Command>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Spawn the worker task around `performer`. Requires a running tokio
    /// runtime.
    pub fn spawn<P: ActionPerformer>(performer: P) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(performer, cmd_rx));
        Self {
            cmd_tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Append an item to the tail of the backlog. Never blocks.
    ///
    /// An item enqueued after shutdown has been requested is accepted but
    /// will never run; callers avoid the race by not enqueuing after
    /// requesting shutdown.
    pub fn enqueue(&self, item: impl Into<String>) {
        let item = item.into();
        debug!(item = %item, "enqueue");
        if self
            .cmd_tx
            .send(Command::Enqueue { item: item.clone() })
            .is_err()
        {
            debug!(item = %item, "enqueue after engine exit; item dropped");
        }
    }

    /// Cancel the currently running action.
    ///
    /// Resolves only once the worker has observed the cancelled action's
    /// completion, so an immediately following call addresses the *next*
    /// action. Resolves to `NoActiveAction` when nothing is running.
    pub async fn cancel_current(&self) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        if self.cmd_tx.send(Command::CancelCurrent { reply }).is_err() {
            return Err(EngineError::NoActiveAction);
        }
        // A dropped reply means the worker exited before answering.
        rx.await.unwrap_or(Err(EngineError::NoActiveAction))
    }

    /// Stop the worker: cancel any active action, abandon the backlog, and
    /// resolve once the worker task has fully stopped. Idempotent.
    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.cmd_tx.send(Command::Shutdown { reply }).is_ok() {
            let _ = rx.await;
        }

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "worker task join failed");
            }
        }
    }
}

struct ActiveAction<A> {
    item: String,
    action: A,
}

struct Worker<P: ActionPerformer> {
    performer: P,
    backlog: VecDeque<String>,
    active: Option<ActiveAction<P::Action>>,
    state: EngineState,
    /// Cancel callers waiting for the in-flight completion to be observed.
    cancel_waiters: Vec<oneshot::Sender<Result<(), EngineError>>>,
    exit_waiters: Vec<oneshot::Sender<()>>,
    /// Kept alive so the completion channel never closes under the worker.
    done_tx: mpsc::UnboundedSender<Outcome>,
}

async fn run_worker<P: ActionPerformer>(
    performer: P,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
) {
    debug!("queue worker started");

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut worker = Worker {
        performer,
        backlog: VecDeque::new(),
        active: None,
        state: EngineState::Idle,
        cancel_waiters: Vec::new(),
        exit_waiters: Vec::new(),
        done_tx,
    };
    let mut commands_closed = false;

    loop {
        if worker.state == EngineState::Idle {
            worker.start_next().await;
        }

        if worker.state == EngineState::Exiting && worker.active.is_none() {
            break;
        }

        // Out-of-band completion events are drained before new commands are
        // taken, so cancel/exit are never starved behind backlog growth.
        tokio::select! {
            biased;
            Some(outcome) = done_rx.recv(), if worker.active.is_some() => {
                worker.on_completion(outcome).await;
            }
            cmd = cmd_rx.recv(), if !commands_closed => match cmd {
                Some(Command::Enqueue { item }) => worker.on_enqueue(item),
                Some(Command::CancelCurrent { reply }) => worker.on_cancel(reply),
                Some(Command::Shutdown { reply }) => {
                    worker.exit_waiters.push(reply);
                    worker.request_exit();
                }
                // Every handle dropped: treat as a shutdown request.
                None => {
                    commands_closed = true;
                    worker.request_exit();
                }
            }
        }
    }

    for reply in worker.exit_waiters.drain(..) {
        let _ = reply.send(());
    }
    debug!("queue worker stopped");
}

impl<P: ActionPerformer> Worker<P> {
    /// Start the backlog head. A synchronous start failure is treated as an
    /// immediately cancelled action: logged, item skipped, next item tried.
    async fn start_next(&mut self) {
        while self.state == EngineState::Idle {
            let Some(item) = self.backlog.pop_front() else {
                return;
            };

            info!(item = %item, "performing action");
            let done = CompletionTx::new(self.done_tx.clone());
            match self.performer.start(&item, done).await {
                Ok(action) => {
                    self.active = Some(ActiveAction { item, action });
                    self.state = EngineState::Running;
                }
                Err(e) => {
                    error!(item = %item, error = %e, "failed to start action");
                }
            }
        }
    }

    async fn on_completion(&mut self, outcome: Outcome) {
        if let Some(mut active) = self.active.take() {
            debug!(item = %active.item, ?outcome, "action completed");
            // Never leave a performer handle outstanding.
            active.action.wait().await;
        }

        for reply in self.cancel_waiters.drain(..) {
            let _ = reply.send(Ok(()));
        }

        if self.state != EngineState::Exiting {
            self.state = EngineState::Idle;
        }
    }

    fn on_enqueue(&mut self, item: String) {
        if self.state == EngineState::Exiting {
            debug!(item = %item, "enqueue after shutdown; item will never run");
        }
        self.backlog.push_back(item);
    }

    fn on_cancel(&mut self, reply: oneshot::Sender<Result<(), EngineError>>) {
        match self.active.as_mut() {
            Some(active) => {
                info!(item = %active.item, "cancelling action");
                active.action.cancel();
                if self.state == EngineState::Running {
                    self.state = EngineState::CancellingCurrent;
                }
                // Replied once the completion is observed.
                self.cancel_waiters.push(reply);
            }
            None => {
                let _ = reply.send(Err(EngineError::NoActiveAction));
            }
        }
    }

    fn request_exit(&mut self) {
        if self.state == EngineState::Exiting {
            return;
        }
        info!("shutdown requested");
        self.state = EngineState::Exiting;
        if let Some(active) = self.active.as_mut() {
            debug!(item = %active.item, "cancelling in-flight action for shutdown");
            active.action.cancel();
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
