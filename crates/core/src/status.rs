// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle status and the server's transformation status stream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of the local transformation run.
///
/// `NotStarted → Running → {Succeeded | PartiallySucceeded | Failed | Cancelled}`.
/// `Running` is the only non-terminal, non-initial state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    NotStarted,
    Running,
    Succeeded,
    PartiallySucceeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded
                | JobStatus::PartiallySucceeded
                | JobStatus::Failed
                | JobStatus::Cancelled
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::Running)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle transition.
    ///
    /// Every terminal state is entered only from `Running`, and a run only
    /// starts from `NotStarted`.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        match (self, next) {
            (JobStatus::NotStarted, JobStatus::Running) => true,
            (JobStatus::Running, next) => next.is_terminal(),
            _ => false,
        }
    }
}

crate::simple_display! {
    JobStatus {
        NotStarted => "not started",
        Running => "running",
        Succeeded => "succeeded",
        PartiallySucceeded => "partially succeeded",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// Status reported by the transformation service for a remote job.
///
/// The server owns this set and may add values, so unknown strings are kept
/// verbatim in [`TransformationStatus::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransformationStatus {
    Created,
    Accepted,
    Rejected,
    Started,
    Preparing,
    Prepared,
    Planning,
    Planned,
    Transforming,
    Transformed,
    PartiallyCompleted,
    Completed,
    Failed,
    Stopping,
    Stopped,
    Other(String),
}

impl TransformationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransformationStatus::Created => "CREATED",
            TransformationStatus::Accepted => "ACCEPTED",
            TransformationStatus::Rejected => "REJECTED",
            TransformationStatus::Started => "STARTED",
            TransformationStatus::Preparing => "PREPARING",
            TransformationStatus::Prepared => "PREPARED",
            TransformationStatus::Planning => "PLANNING",
            TransformationStatus::Planned => "PLANNED",
            TransformationStatus::Transforming => "TRANSFORMING",
            TransformationStatus::Transformed => "TRANSFORMED",
            TransformationStatus::PartiallyCompleted => "PARTIALLY_COMPLETED",
            TransformationStatus::Completed => "COMPLETED",
            TransformationStatus::Failed => "FAILED",
            TransformationStatus::Stopping => "STOPPING",
            TransformationStatus::Stopped => "STOPPED",
            TransformationStatus::Other(s) => s,
        }
    }

    /// Statuses that end the job on the server without a usable result.
    pub fn is_failure(&self) -> bool {
        FAILURE_STATUSES.contains(self)
    }
}

impl FromStr for TransformationStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => TransformationStatus::Created,
            "ACCEPTED" => TransformationStatus::Accepted,
            "REJECTED" => TransformationStatus::Rejected,
            "STARTED" => TransformationStatus::Started,
            "PREPARING" => TransformationStatus::Preparing,
            "PREPARED" => TransformationStatus::Prepared,
            "PLANNING" => TransformationStatus::Planning,
            "PLANNED" => TransformationStatus::Planned,
            "TRANSFORMING" => TransformationStatus::Transforming,
            "TRANSFORMED" => TransformationStatus::Transformed,
            "PARTIALLY_COMPLETED" => TransformationStatus::PartiallyCompleted,
            "COMPLETED" => TransformationStatus::Completed,
            "FAILED" => TransformationStatus::Failed,
            "STOPPING" => TransformationStatus::Stopping,
            "STOPPED" => TransformationStatus::Stopped,
            _ => TransformationStatus::Other(s.to_string()),
        })
    }
}

impl From<&str> for TransformationStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for TransformationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransformationStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransformationStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TransformationStatus::from(s.as_str()))
    }
}

/// Statuses at which the transformation plan can be fetched.
pub const PLAN_READY_STATUSES: &[TransformationStatus] = &[
    TransformationStatus::Planned,
    TransformationStatus::Transforming,
    TransformationStatus::Transformed,
    TransformationStatus::PartiallyCompleted,
    TransformationStatus::Completed,
];

/// Statuses at which the job has produced its final result.
///
/// `FAILED` is accepted here so the orchestrator, not the poller, reports the
/// unsuccessful completion.
pub const DOWNLOAD_READY_STATUSES: &[TransformationStatus] = &[
    TransformationStatus::PartiallyCompleted,
    TransformationStatus::Completed,
    TransformationStatus::Failed,
];

/// Statuses that end the job on the server without a usable result.
pub const FAILURE_STATUSES: &[TransformationStatus] = &[
    TransformationStatus::Failed,
    TransformationStatus::Rejected,
    TransformationStatus::Stopping,
    TransformationStatus::Stopped,
];

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
