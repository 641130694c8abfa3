// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;
use xform_core::{JobStatus, StepState};

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    pub const GOOD: u8 = 114;
    pub const WARN: u8 = 179;
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled()
        .header(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Color a run status by outcome.
pub fn status(status: JobStatus) -> String {
    let code = match status {
        JobStatus::Succeeded => codes::GOOD,
        JobStatus::PartiallySucceeded | JobStatus::Cancelled => codes::WARN,
        JobStatus::Failed => codes::BAD,
        JobStatus::NotStarted | JobStatus::Running => codes::LITERAL,
    };
    paint(code, &status.to_string())
}

pub fn step_state(state: StepState) -> String {
    let code = match state {
        StepState::Succeeded => codes::GOOD,
        StepState::Failed => codes::BAD,
        StepState::Pending => codes::CONTEXT,
    };
    paint(code, &state.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
