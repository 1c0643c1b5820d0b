// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Control channel client: writes protocol lines to the daemon fifo.

use std::path::PathBuf;

use juke_daemon::Config;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The control channel does not exist; the daemon is probably not
    /// running.
    #[error("the daemon communication channel is missing")]
    ChannelMissing,

    #[error("unable to open command fifo {0}: {1}")]
    Open(PathBuf, std::io::Error),

    #[error("unable to write to command fifo {0}: {1}")]
    Write(PathBuf, std::io::Error),
}

/// Client for an existing daemon control channel.
pub struct ChannelClient {
    fifo_path: PathBuf,
}

impl ChannelClient {
    /// Address the daemon's control channel, verifying it exists.
    pub fn open(config: &Config) -> Result<Self, ClientError> {
        if !config.fifo_path.exists() {
            return Err(ClientError::ChannelMissing);
        }
        Ok(Self {
            fifo_path: config.fifo_path.clone(),
        })
    }

    /// Ask the daemon to shut down.
    pub async fn stop(&self) -> Result<(), ClientError> {
        self.write_lines(["exit"]).await
    }

    /// Ask the daemon to skip the currently playing item.
    pub async fn next(&self) -> Result<(), ClientError> {
        self.write_lines(["next"]).await
    }

    /// Enqueue items in the given order, one path per line.
    pub async fn queue(&self, items: &[String]) -> Result<(), ClientError> {
        let mut lines = vec!["play"];
        lines.extend(items.iter().map(String::as_str));
        self.write_lines(lines).await
    }

    /// One open/write/close is one daemon session.
    async fn write_lines<'a, I>(&self, lines: I) -> Result<(), ClientError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(&self.fifo_path)
            .await
            .map_err(|e| ClientError::Open(self.fifo_path.clone(), e))?;

        file.write_all(buf.as_bytes())
            .await
            .map_err(|e| ClientError::Write(self.fifo_path.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| ClientError::Write(self.fifo_path.clone(), e))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
