// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-level errors.

use crate::archive::ArchiveError;
use crate::plan::PlanError;
use crate::poller::PollError;
use crate::transfer::TransferError;
use crate::validation::ValidationError;
use thiserror::Error;
use xform_adapters::{DependencyError, ServiceError};
use xform_core::TransformationStatus;

/// Failure of one step of a run.
///
/// `Display` describes the internal cause; [`RunError::user_message`] is the
/// text shown to the user.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("run cancelled")]
    Cancelled,
    #[error("archive build failed: {0}")]
    ArchiveBuild(#[from] ArchiveError),
    #[error("upload failed: {0}")]
    Upload(#[from] TransferError),
    #[error("job start failed: {0}")]
    JobStart(#[source] ServiceError),
    #[error("polling failed: {0}")]
    Poll(#[source] PollError),
    #[error("plan fetch failed: {0}")]
    PlanFetch(#[from] PlanError),
    #[error("job finished with status {0}")]
    JobNotSuccessful(TransformationStatus),
}

impl From<PollError> for RunError {
    fn from(e: PollError) -> Self {
        match e {
            PollError::Cancelled => RunError::Cancelled,
            other => RunError::Poll(other),
        }
    }
}

impl RunError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled)
    }

    pub fn user_message(&self) -> String {
        match self {
            RunError::Cancelled => "The transformation was cancelled.".to_string(),
            RunError::ArchiveBuild(_) => {
                "Could not package the project for upload. Check that the project and its \
                 dependencies are readable."
                    .to_string()
            }
            RunError::Upload(_) => {
                "Could not upload the project. Check your network connection and try again."
                    .to_string()
            }
            RunError::JobStart(_) => "The transformation job could not be started.".to_string(),
            RunError::Poll(PollError::JobFailed { reason: Some(reason), .. }) => {
                format!("The transformation job failed: {reason}")
            }
            RunError::Poll(PollError::JobFailed { status, reason: None }) => {
                format!("The transformation job stopped with status {status}.")
            }
            RunError::Poll(_) => {
                "Lost contact with the transformation service while waiting for the job."
                    .to_string()
            }
            RunError::PlanFetch(_) => "The transformation plan could not be retrieved.".to_string(),
            RunError::JobNotSuccessful(status) => {
                format!("The transformation did not complete (status {status}).")
            }
        }
    }

    /// Short class recorded with the failure.
    pub fn error_type(&self) -> &'static str {
        match self {
            RunError::Cancelled => "cancelled",
            RunError::ArchiveBuild(_) => "archive_build",
            RunError::Upload(_) => "upload",
            RunError::JobStart(_) => "job_start",
            RunError::Poll(_) => "poll",
            RunError::PlanFetch(_) => "plan_fetch",
            RunError::JobNotSuccessful(_) => "job_not_successful",
        }
    }
}

/// Reasons a transformation never started.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("dependency preparation failed: {0}")]
    Setup(#[from] DependencyError),
    #[error("a transformation is already running")]
    AlreadyRunning,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
