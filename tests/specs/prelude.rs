// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a command builder with fluent assertions and a scratch project tree.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Endpoint nothing listens on; any request to it fails immediately.
pub const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

pub struct Cli {
    cmd: Command,
    _state: TempDir,
}

/// The xform binary with an isolated state directory and no ambient config.
pub fn cli() -> Cli {
    let state = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("xform").unwrap();
    cmd.env("XFORM_STATE_DIR", state.path())
        .env("NO_COLOR", "1")
        .env_remove("XFORM_ENDPOINT")
        .env_remove("XFORM_AUTH_TOKEN")
        .env_remove("XFORM_KMS_KEY_ARN");
    Cli { cmd, _state: state }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Output {
        let out = self.cmd.output().unwrap();
        assert!(out.status.success(), "expected success, got {:?}\n{}", out.status, stderr(&out));
        Output(out)
    }

    pub fn exits(mut self, code: i32) -> Output {
        let out = self.cmd.output().unwrap();
        assert_eq!(out.status.code(), Some(code), "stderr:\n{}", stderr(&out));
        Output(out)
    }
}

fn stderr(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

pub struct Output(std::process::Output);

impl Output {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.stdout).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = stderr(&self.0);
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

/// Scratch directory tree for projects.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn arg(&self, rel: &str) -> String {
        self.join(rel).display().to_string()
    }
}
