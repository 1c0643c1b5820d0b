// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Control channel reader.
//!
//! Translates one opened channel into engine operations. A session carries
//! a single command line; `play` additionally consumes every following line
//! of the same session as an item, in line order. The daemon reopens the
//! channel for the next session once the writer closes it.

use juke_engine::{Engine, EngineError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::protocol::{parse_command, strip_line, ControlCommand};

/// What the session loop should do after one channel session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Reopen the channel and wait for the next command.
    Continue,
    /// `exit` was received; shut the daemon down.
    Exit,
}

/// Process one opened control channel.
pub async fn run_session<R>(mut input: R, engine: &Engine) -> std::io::Result<SessionOutcome>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        // Writer closed without sending a command.
        return Ok(SessionOutcome::Continue);
    }

    match parse_command(strip_line(&line)) {
        ControlCommand::Exit => {
            debug!("exit received");
            Ok(SessionOutcome::Exit)
        }

        ControlCommand::Next => {
            match engine.cancel_current().await {
                Ok(()) => debug!("skipped current action"),
                Err(EngineError::NoActiveAction) => {
                    println!("No action playing to skip.");
                }
            }
            Ok(SessionOutcome::Continue)
        }

        ControlCommand::Play => {
            loop {
                let mut item = String::new();
                if input.read_line(&mut item).await? == 0 {
                    break;
                }
                engine.enqueue(strip_line(&item));
            }
            Ok(SessionOutcome::Continue)
        }

        ControlCommand::Unknown(command) => {
            warn!(command = %command, "unknown control command");
            println!("Unknown command received: {}", command);
            Ok(SessionOutcome::Continue)
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
