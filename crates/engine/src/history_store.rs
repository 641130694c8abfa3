// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run history persistence.
//!
//! Each save atomically replaces `history.json` in the state directory.

use std::path::{Path, PathBuf};
use thiserror::Error;
use xform_core::RunHistory;

pub const HISTORY_FILE_NAME: &str = "history.json";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self { path: state_dir.as_ref().join(HISTORY_FILE_NAME) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved history; a missing file is an empty history.
    pub fn load(&self) -> Result<RunHistory, HistoryError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RunHistory::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, history: &RunHistory) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(history)?;
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "history_store_tests.rs"]
mod tests;
