// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! End-to-end daemon specs: start, queue, next, stop over the fifo.

use crate::prelude::*;

#[test]
fn queue_next_stop_round_trip() {
    let home = Jukebox::new();
    let mut daemon = home.spawn_daemon();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || home.fifo_path().exists()),
        "daemon never created the control channel"
    );

    home.juke().args(&["queue", "a.mp3", "b.mp3"]).passes();
    home.juke().args(&["next"]).passes();
    home.juke().args(&["stop"]).passes();

    assert!(daemon.wait_exit(SPEC_WAIT_MAX_MS), "daemon did not exit");
    assert!(
        !home.fifo_path().exists(),
        "control channel left behind after exit"
    );
}

#[test]
fn stop_alone_shuts_down_an_idle_daemon() {
    let home = Jukebox::new();
    let mut daemon = home.spawn_daemon();

    assert!(wait_for(SPEC_WAIT_MAX_MS, || home.fifo_path().exists()));

    home.juke().args(&["stop"]).passes();

    assert!(daemon.wait_exit(SPEC_WAIT_MAX_MS), "daemon did not exit");
}

#[test]
fn start_fails_when_channel_already_exists() {
    let home = Jukebox::new();
    std::fs::write(home.fifo_path(), b"").unwrap();

    home.juke()
        .args(&["start"])
        .fails()
        .stderr_has("unable to create command fifo");
}
