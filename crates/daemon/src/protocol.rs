// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Line-oriented control protocol.
//!
//! One command name per line, case-sensitive. Exactly one trailing newline
//! is stripped; any other whitespace is significant.

/// A parsed control command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    /// Shut the daemon down.
    Exit,
    /// Skip the currently playing item.
    Next,
    /// Enqueue every remaining line of the open channel as an item.
    Play,
    /// Anything else; reported and skipped.
    Unknown(String),
}

/// Parse one already-stripped command line.
pub fn parse_command(line: &str) -> ControlCommand {
    match line {
        "exit" => ControlCommand::Exit,
        "next" => ControlCommand::Next,
        "play" => ControlCommand::Play,
        other => ControlCommand::Unknown(other.to_string()),
    }
}

/// Strip exactly one trailing newline.
pub fn strip_line(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
