// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Daemon lifecycle: configuration and control channel setup/teardown.

use std::path::PathBuf;

use nix::sys::stat::Mode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Default player program, run once per item as `<player> <path>`.
const DEFAULT_PLAYER: &str = "mplayer";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the named-pipe control channel
    pub fifo_path: PathBuf,
    /// Player program run once per item
    pub player_program: String,
    /// Extra arguments passed to the player ahead of the item
    pub player_args: Vec<String>,
}

/// Optional on-disk configuration file
/// (`$XDG_CONFIG_HOME/juke/config.toml`)
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    fifo: Option<PathBuf>,
    player: Option<String>,
    #[serde(default)]
    player_args: Vec<String>,
}

/// Environment overrides, read once at load time
#[derive(Debug, Default)]
struct EnvOverrides {
    fifo: Option<PathBuf>,
    player: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            fifo: std::env::var_os("JUKE_FIFO").map(PathBuf::from),
            player: std::env::var("JUKE_PLAYER").ok(),
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not determine runtime directory (HOME not set)")]
    NoRuntimeDir,

    #[error("invalid config file {0}: {1}")]
    ConfigParse(PathBuf, toml::de::Error),

    #[error("unable to create command fifo {0}: {1}")]
    ChannelCreate(PathBuf, std::io::Error),

    #[error("unable to open command fifo {0}: {1}")]
    ChannelOpen(PathBuf, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Config {
    /// Resolve configuration: built-in defaults, then the optional config
    /// file, then `JUKE_FIFO`/`JUKE_PLAYER` environment overrides.
    pub fn load() -> Result<Self, LifecycleError> {
        let file = read_config_file()?;
        let default_fifo = default_fifo_path()?;
        Ok(Self::resolve(file, EnvOverrides::from_env(), default_fifo))
    }

    fn resolve(file: ConfigFile, env: EnvOverrides, default_fifo: PathBuf) -> Self {
        Self {
            fifo_path: env.fifo.or(file.fifo).unwrap_or(default_fifo),
            player_program: env
                .player
                .or(file.player)
                .unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            player_args: file.player_args,
        }
    }
}

fn read_config_file() -> Result<ConfigFile, LifecycleError> {
    let Some(path) = config_file_path() else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| LifecycleError::ConfigParse(path, e))
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("juke/config.toml"));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/juke/config.toml"))
}

/// Default fifo location: the user runtime dir, falling back to a dotfile
/// in the home directory.
fn default_fifo_path() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = std::env::var_os("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(dir).join("juke/juked.fifo"));
    }
    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".juked")),
        None => Err(LifecycleError::NoRuntimeDir),
    }
}

/// Owns the control channel fifo; removes it on drop so both the normal
/// exit path and failure paths release the channel resource.
pub struct ChannelGuard {
    path: PathBuf,
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "removing command fifo");
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove command fifo");
        }
    }
}

/// Create the named-pipe control channel, user read/write only.
pub fn create_channel(config: &Config) -> Result<ChannelGuard, LifecycleError> {
    if let Some(parent) = config.fifo_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    nix::unistd::mkfifo(&config.fifo_path, Mode::S_IRUSR | Mode::S_IWUSR).map_err(|errno| {
        LifecycleError::ChannelCreate(config.fifo_path.clone(), std::io::Error::from(errno))
    })?;

    Ok(ChannelGuard {
        path: config.fifo_path.clone(),
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
