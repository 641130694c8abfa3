// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job poller.
//!
//! Queries job status at a fixed interval until the status lands in an
//! accepted set. Accepted statuses are checked before failure statuses, so a
//! phase may accept `FAILED` and judge it itself. Every sleep and remote call
//! races the cancellation token.

use crate::transfer::TransferClient;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use xform_adapters::{ServiceError, TransformService};
use xform_core::{JobId, TransformationStatus};

#[derive(Debug, Error)]
pub enum PollError {
    #[error("polling cancelled")]
    Cancelled,
    #[error("job reached status {status}{}", reason_suffix(.reason))]
    JobFailed { status: TransformationStatus, reason: Option<String> },
    #[error("status query failed: {0}")]
    Service(#[from] ServiceError),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
}

#[derive(Clone)]
pub struct JobPoller<S> {
    transfer: TransferClient<S>,
    interval: Duration,
}

impl<S: TransformService> JobPoller<S> {
    pub fn new(transfer: TransferClient<S>, interval: Duration) -> Self {
        Self { transfer, interval }
    }

    /// Poll until the job status is in `accepted`.
    pub async fn poll(
        &self,
        job_id: &JobId,
        accepted: &[TransformationStatus],
        cancel: &CancellationToken,
    ) -> Result<TransformationStatus, PollError> {
        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(PollError::Cancelled);
            }
            attempt += 1;

            let queried = tokio::select! {
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                result = self.transfer.status(job_id) => result,
            };
            match queried {
                Ok(report) => {
                    tracing::debug!(%job_id, status = %report.status, attempt, "polled job status");
                    if accepted.contains(&report.status) {
                        return Ok(report.status);
                    }
                    if report.status.is_failure() {
                        return Err(PollError::JobFailed {
                            status: report.status,
                            reason: report.reason,
                        });
                    }
                }
                Err(e) if e.is_throttled() => {
                    tracing::warn!(%job_id, attempt, "status query throttled, retrying");
                }
                Err(e) => return Err(e.into()),
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
