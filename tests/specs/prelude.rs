// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Shared harness for black-box specs: hermetic per-spec home directories
//! and thin assertion wrappers around the juke binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub const SPEC_WAIT_MAX_MS: u64 = 5_000;

/// Poll `check` until it returns true or `max_ms` elapses.
pub fn wait_for(max_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    loop {
        if check() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// One spec's isolated environment: its own HOME, config dir, and fifo
/// path, with `true` standing in for the player so items finish instantly.
pub struct Jukebox {
    temp: TempDir,
}

impl Jukebox {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn fifo_path(&self) -> PathBuf {
        self.temp.path().join("juked.fifo")
    }

    /// Build a juke invocation scoped to this environment.
    pub fn juke(&self) -> SpecCmd {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("juke"));
        self.isolate(&mut cmd);
        SpecCmd { cmd }
    }

    /// Spawn `juke start` in the background. The guard kills the daemon on
    /// drop so a failing spec never leaks a process.
    pub fn spawn_daemon(&self) -> DaemonGuard {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("juke"));
        self.isolate(&mut cmd);
        let child = cmd
            .arg("start")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        DaemonGuard { child }
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.env_clear()
            .env("PATH", std::env::var_os("PATH").unwrap_or_default())
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join(".config"))
            .env("JUKE_FIFO", self.fifo_path())
            .env("JUKE_PLAYER", "true")
            .current_dir(self.temp.path());
    }
}

pub struct SpecCmd {
    cmd: Command,
}

impl SpecCmd {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> SpecOutput {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        SpecOutput { output }
    }

    pub fn fails(mut self) -> SpecOutput {
        let output = self.cmd.output().unwrap();
        assert!(
            !output.status.success(),
            "expected failure, got {:?}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
        );
        SpecOutput { output }
    }
}

pub struct SpecOutput {
    output: Output,
}

impl SpecOutput {
    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            stdout.contains(needle),
            "stdout missing {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            stderr.contains(needle),
            "stderr missing {needle:?}:\n{stderr}"
        );
        self
    }
}

pub struct DaemonGuard {
    child: Child,
}

impl DaemonGuard {
    /// Wait for the daemon process to exit on its own.
    pub fn wait_exit(&mut self, max_ms: u64) -> bool {
        wait_for(max_ms, || {
            matches!(self.child.try_wait(), Ok(Some(_)))
        })
    }
}

impl Drop for DaemonGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
