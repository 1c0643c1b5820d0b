// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Client behavior when the daemon is not running

use crate::prelude::*;

#[test]
fn stop_without_daemon_reports_missing_channel() {
    let home = Jukebox::new();

    home.juke()
        .args(&["stop"])
        .passes()
        .stdout_has("The daemon communication channel is missing.")
        .stdout_has("juke start");
}

#[test]
fn next_without_daemon_reports_missing_channel() {
    let home = Jukebox::new();

    home.juke()
        .args(&["next"])
        .passes()
        .stdout_has("The daemon communication channel is missing.");
}

#[test]
fn queue_without_daemon_reports_missing_channel() {
    let home = Jukebox::new();

    home.juke()
        .args(&["queue", "a.mp3"])
        .passes()
        .stdout_has("The daemon communication channel is missing.");
}

#[test]
fn queue_requires_at_least_one_path() {
    let home = Jukebox::new();

    home.juke().args(&["queue"]).fails();
}
