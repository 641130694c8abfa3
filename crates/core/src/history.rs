// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run history shown after a transformation finishes.

use crate::id::JobId;
use crate::status::JobStatus;
use crate::time_fmt::{format_duration_ms, format_timestamp};
use serde::{Deserialize, Serialize};

/// Summary of one finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHistoryEntry {
    /// Epoch milliseconds when the run started
    pub timestamp_ms: u64,
    /// Name of the transformed project
    pub module: String,
    pub status: JobStatus,
    pub duration_ms: u64,
    /// Remote job ID; empty when the run never got past the start call
    pub id: JobId,
}

impl RunHistoryEntry {
    pub fn timestamp(&self) -> String {
        format_timestamp(self.timestamp_ms)
    }

    pub fn duration(&self) -> String {
        format_duration_ms(self.duration_ms)
    }
}

/// History of transformation runs.
///
/// Holds at most one entry: recording a run replaces whatever was there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHistory {
    #[serde(default)]
    entries: Vec<RunHistoryEntry>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run, replacing the previous history.
    pub fn record(&mut self, entry: RunHistoryEntry) {
        self.entries = vec![entry];
    }

    pub fn entries(&self) -> &[RunHistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&RunHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
