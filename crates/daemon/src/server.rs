// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Daemon run loop: owns the engine and feeds it from the control channel.

use juke_adapters::PlayerPerformer;
use juke_engine::Engine;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::{debug, info};

use crate::lifecycle::{create_channel, Config, LifecycleError};
use crate::reader::{run_session, SessionOutcome};

/// Create the control channel and run the daemon in the foreground until
/// `exit` is received or the channel cannot be reopened. In-flight work is
/// drained or aborted and the fifo is removed on every way out.
pub async fn run(config: &Config) -> Result<(), LifecycleError> {
    let channel = create_channel(config)?;
    info!(
        fifo = %config.fifo_path.display(),
        player = %config.player_program,
        "daemon ready"
    );

    let performer = PlayerPerformer::new(&config.player_program, config.player_args.clone());
    let engine = Engine::spawn(performer);

    let result = session_loop(config, &engine).await;

    engine.shutdown().await;
    drop(channel);
    info!("daemon stopped");
    result
}

async fn session_loop(config: &Config, engine: &Engine) -> Result<(), LifecycleError> {
    loop {
        // Opening the fifo for reading blocks until a writer connects; each
        // writer open/close pair is one session.
        debug!("waiting for control channel writer");
        let file = File::open(&config.fifo_path)
            .await
            .map_err(|e| LifecycleError::ChannelOpen(config.fifo_path.clone(), e))?;

        match run_session(BufReader::new(file), engine).await {
            Ok(SessionOutcome::Exit) => return Ok(()),
            Ok(SessionOutcome::Continue) => {}
            Err(e) => return Err(LifecycleError::ChannelOpen(config.fifo_path.clone(), e)),
        }
    }
}
