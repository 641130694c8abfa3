// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`,
//! leaving process termination to `main()`.

use std::fmt;

/// Run finished as failed, or an unexpected error occurred
pub const EXIT_FAILURE: i32 = 1;
/// Input or environment rejected before anything ran
pub const EXIT_VALIDATION: i32 = 2;
/// Run cancelled by the user (128 + SIGINT)
pub const EXIT_CANCELLED: i32 = 130;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(EXIT_VALIDATION, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(EXIT_FAILURE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
