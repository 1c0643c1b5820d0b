// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Version flag specs

use crate::prelude::*;

#[test]
fn long_version_flag_prints_name_and_version() {
    let home = Jukebox::new();

    home.juke()
        .args(&["--version"])
        .passes()
        .stdout_has(&format!("juke {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_matches_long_form() {
    let home = Jukebox::new();

    home.juke()
        .args(&["-v"])
        .passes()
        .stdout_has(&format!("juke {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let home = Jukebox::new();

    home.juke().args(&["shuffle"]).fails();
}
