// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! juke - queued media playback daemon and control client

mod client;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::client::{ChannelClient, ClientError};
use juke_daemon::Config;

#[derive(Parser)]
#[command(
    name = "juke",
    version,
    disable_version_flag = true,
    about = "Juke - queued media playback"
)]
struct Cli {
    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the playback daemon in the foreground
    Start,
    /// Stop the running daemon
    Stop,
    /// Queue files for playback
    Queue {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Skip the currently playing item
    Next,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Start => start(&config).await,
        Commands::Stop => with_client(&config, |client| async move { client.stop().await }).await,
        Commands::Next => with_client(&config, |client| async move { client.next().await }).await,
        Commands::Queue { paths } => {
            let items = absolutize(paths)?;
            with_client(&config, |client| async move {
                client.queue(&items).await
            })
            .await
        }
    }
}

/// Run the daemon in the foreground. Ctrl-C is translated into an `exit`
/// command written to the control channel, so interactive interrupt and
/// `juke stop` share one shutdown path.
async fn start(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let fifo_path = config.fifo_path.clone();
    ctrlc::set_handler(move || {
        use std::io::Write;
        let written = std::fs::OpenOptions::new()
            .write(true)
            .open(&fifo_path)
            .and_then(|mut fifo| fifo.write_all(b"exit\n"));
        if let Err(e) = written {
            warn!(error = %e, "could not deliver exit on interrupt");
        }
    })?;

    juke_daemon::run(config).await?;
    Ok(())
}

/// Run a client command against the daemon's control channel. A missing
/// channel is reported as "daemon not running" rather than as a failure.
async fn with_client<F, Fut>(config: &Config, f: F) -> Result<()>
where
    F: FnOnce(ChannelClient) -> Fut,
    Fut: std::future::Future<Output = Result<(), ClientError>>,
{
    match ChannelClient::open(config) {
        Ok(client) => {
            f(client).await?;
            Ok(())
        }
        Err(ClientError::ChannelMissing) => {
            println!("The daemon communication channel is missing.");
            println!("Please make sure the daemon is running (try running \"juke start\").");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// The daemon resolves items relative to its own working directory, so
/// queued paths are absolutized on the client side.
fn absolutize(paths: Vec<PathBuf>) -> Result<Vec<String>> {
    paths
        .into_iter()
        .map(|p| {
            let abs = std::path::absolute(&p)?;
            Ok(abs.to_string_lossy().into_owned())
        })
        .collect()
}
