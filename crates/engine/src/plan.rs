// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transformation plan document.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xform_adapters::{ServiceError, TransformationPlan};
use xform_core::JavaVersion;

pub const PLAN_FILE_NAME: &str = "transformation-plan.md";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to write plan to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Render the plan as Markdown.
pub fn render_plan(
    project_name: &str,
    source: JavaVersion,
    target: JavaVersion,
    plan: &TransformationPlan,
) -> String {
    let mut out = String::from("# Code Transformation Plan\n\n");
    let _ = writeln!(out, "Project: {project_name}");
    let _ = writeln!(out, "Upgrade: {source} → {target}\n");
    if plan.steps.is_empty() {
        out.push_str("The service proposed no changes.\n");
        return out;
    }
    out.push_str("## Steps\n\n");
    for (i, step) in plan.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. **{}**", i + 1, step.name.trim());
        let description = step.description.trim();
        if !description.is_empty() {
            let _ = writeln!(out, "   {description}");
        }
    }
    out
}

/// Write the rendered plan into `work_dir`, returning the file path.
pub async fn write_plan(work_dir: &Path, contents: &str) -> Result<PathBuf, PlanError> {
    let path = work_dir.join(PLAN_FILE_NAME);
    let written = match tokio::fs::create_dir_all(work_dir).await {
        Ok(()) => tokio::fs::write(&path, contents).await,
        Err(e) => Err(e),
    };
    written.map_err(|source| PlanError::Write { path: path.clone(), source })?;
    Ok(path)
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
