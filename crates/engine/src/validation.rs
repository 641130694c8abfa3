// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project discovery and pre-run validation.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xform_core::{CandidateProject, JavaVersion};

/// Build descriptor that marks a directory as a transformable project
pub const BUILD_FILE: &str = "pom.xml";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("project not found: {}", .0.display())]
    ProjectNotFound(PathBuf),
    #[error("no {BUILD_FILE} found in {}", .0.display())]
    NoBuildFile(PathBuf),
    #[error("cannot upgrade from {from} to {to}")]
    UnsupportedUpgrade { from: JavaVersion, to: JavaVersion },
    #[error("environment misconfigured: {0}")]
    EnvironmentMisconfigured(String),
}

impl From<ConfigError> for ValidationError {
    fn from(e: ConfigError) -> Self {
        ValidationError::EnvironmentMisconfigured(e.to_string())
    }
}

fn has_build_file(dir: &Path) -> bool {
    dir.join(BUILD_FILE).is_file()
}

fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Projects at `root` or in its immediate subdirectories, sorted by name.
pub fn discover_projects(root: &Path) -> Vec<CandidateProject> {
    let mut found = Vec::new();
    if has_build_file(root) {
        found.push(CandidateProject::new(project_name(root), root));
    }
    match std::fs::read_dir(root) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() && has_build_file(&path) {
                    found.push(CandidateProject::new(project_name(&path), path));
                }
            }
        }
        Err(e) => tracing::debug!(root = %root.display(), error = %e, "cannot scan for projects"),
    }
    found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    found
}

/// Check that `path` is an eligible project.
pub fn validate_project(path: &Path) -> Result<CandidateProject, ValidationError> {
    if !path.is_dir() {
        return Err(ValidationError::ProjectNotFound(path.to_path_buf()));
    }
    if !has_build_file(path) {
        return Err(ValidationError::NoBuildFile(path.to_path_buf()));
    }
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    Ok(CandidateProject::new(project_name(&path), path))
}

/// Only upgrades to a newer version are supported.
pub fn validate_upgrade(source: JavaVersion, target: JavaVersion) -> Result<(), ValidationError> {
    if target <= source {
        return Err(ValidationError::UnsupportedUpgrade { from: source, to: target });
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
