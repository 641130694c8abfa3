// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for command results.

use crate::color;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;
use xform_core::{CandidateProject, RunHistory, StepProgress};
use xform_engine::RunOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn push_steps(out: &mut String, steps: &StepProgress) {
    for (step, state) in steps.iter() {
        let _ = writeln!(out, "  {:<14} {}", step.to_string(), color::step_state(state));
    }
}

/// Summary of a finished run.
pub fn render_outcome(outcome: &RunOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", color::header("Project:"), outcome.project_name);
    let _ = writeln!(out, "{} {}", color::header("Status:"), color::status(outcome.status));
    if !outcome.job_id.is_empty() {
        let _ = writeln!(out, "{} {}", color::header("Job:"), outcome.job_id);
    }
    let _ = writeln!(
        out,
        "{} {}",
        color::header("Duration:"),
        xform_core::format_duration_ms(outcome.duration_ms)
    );
    if let Some(path) = &outcome.plan_path {
        let _ = writeln!(out, "{} {}", color::header("Plan:"), path.display());
    }
    let _ = writeln!(out, "{}", color::header("Steps:"));
    push_steps(&mut out, &outcome.steps);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", outcome.message);
    out
}

/// Table of past runs, newest last.
pub fn render_history(history: &RunHistory) -> String {
    if history.is_empty() {
        return "No transformation runs yet\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        color::header(&format!(
            "{:<20} {:<24} {:<20} {:>9}  {}",
            "FINISHED", "MODULE", "STATUS", "DURATION", "JOB"
        ))
    );
    for entry in history.entries() {
        let id = if entry.id.is_empty() { "-" } else { entry.id.short(12) };
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:<20} {:>9}  {}",
            entry.timestamp(),
            entry.module,
            entry.status.to_string(),
            entry.duration(),
            id
        );
    }
    out
}

pub fn render_projects(projects: &[CandidateProject]) -> String {
    if projects.is_empty() {
        return "No projects found\n".to_string();
    }
    let mut out = String::new();
    for project in projects {
        let _ = writeln!(
            out,
            "{:<24} {}",
            project.name,
            color::context(&project.path.display().to_string())
        );
    }
    out
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
