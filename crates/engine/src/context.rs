// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run job state and the handle observers use to follow a run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use xform_adapters::DependencyFolder;
use xform_core::{
    CandidateProject, JavaVersion, JobId, JobStatus, StepName, StepProgress, StepState,
};

/// Observable view of the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub job_id: JobId,
    pub project_name: String,
    pub steps: StepProgress,
    pub plan_path: Option<PathBuf>,
    /// Terminal status of the most recent run; survives the reset at run end
    pub last_status: Option<JobStatus>,
}

/// Cancellation trigger plus a live view of run snapshots.
#[derive(Debug, Clone)]
pub struct RunHandle {
    cancel: CancellationToken,
    snapshots: watch::Receiver<JobSnapshot>,
}

impl RunHandle {
    pub(crate) fn new(snapshots: watch::Receiver<JobSnapshot>) -> Self {
        Self { cancel: CancellationToken::new(), snapshots }
    }

    /// Request cancellation of the run this handle was passed to.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> JobSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot> {
        self.snapshots.clone()
    }
}

/// Failure detail attached on the path to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub message: String,
    pub metadata: Option<String>,
}

/// Mutable state of one transformation run.
///
/// Created when the run starts and dropped when it ends; dropping it is the
/// reset. Only the orchestrator mutates it.
#[derive(Debug)]
pub struct RunContext {
    pub project: CandidateProject,
    pub source: JavaVersion,
    pub target: JavaVersion,
    pub session_id: String,
    pub started_at_ms: u64,
    status: JobStatus,
    job_id: JobId,
    steps: StepProgress,
    dependency_folder: Option<DependencyFolder>,
    archive_path: Option<PathBuf>,
    plan_path: Option<PathBuf>,
    failure: Option<RunFailure>,
}

impl RunContext {
    pub fn new(
        project: CandidateProject,
        source: JavaVersion,
        target: JavaVersion,
        dependency_folder: DependencyFolder,
        started_at_ms: u64,
    ) -> Self {
        Self {
            project,
            source,
            target,
            session_id: uuid::Uuid::new_v4().to_string(),
            started_at_ms,
            status: JobStatus::NotStarted,
            job_id: JobId::default(),
            steps: StepProgress::default(),
            dependency_folder: Some(dependency_folder),
            archive_path: None,
            plan_path: None,
            failure: None,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Apply a lifecycle transition; illegal transitions are ignored.
    pub fn transition(&mut self, next: JobStatus) -> bool {
        if !self.status.can_transition_to(next) {
            tracing::warn!(from = %self.status, to = %next, "ignored illegal status transition");
            return false;
        }
        tracing::info!(from = %self.status, to = %next, "job status changed");
        self.status = next;
        true
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn set_job_id(&mut self, job_id: JobId) {
        self.job_id = job_id;
    }

    pub fn steps(&self) -> &StepProgress {
        &self.steps
    }

    pub fn mark_step(&mut self, step: StepName, state: StepState) {
        tracing::debug!(%step, %state, "step progress");
        self.steps.mark(step, state);
    }

    pub fn reset_steps(&mut self) {
        self.steps.reset();
    }

    pub fn finalize_steps(&mut self) {
        self.steps.finalize();
    }

    pub fn dependency_path(&self) -> Option<&Path> {
        self.dependency_folder.as_ref().map(DependencyFolder::path)
    }

    pub fn take_dependency_folder(&mut self) -> Option<DependencyFolder> {
        self.dependency_folder.take()
    }

    pub fn set_archive_path(&mut self, path: PathBuf) {
        self.archive_path = Some(path);
    }

    pub fn take_archive_path(&mut self) -> Option<PathBuf> {
        self.archive_path.take()
    }

    pub fn plan_path(&self) -> Option<&Path> {
        self.plan_path.as_deref()
    }

    pub fn set_plan_path(&mut self, path: PathBuf) {
        self.plan_path = Some(path);
    }

    /// Attach failure detail. Only the first failure is kept.
    pub fn record_failure(&mut self, message: impl Into<String>, metadata: Option<String>) {
        if self.failure.is_none() {
            self.failure = Some(RunFailure { message: message.into(), metadata });
        }
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        self.failure.as_ref()
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            status: self.status,
            job_id: self.job_id.clone(),
            project_name: self.project.name.clone(),
            steps: self.steps.clone(),
            plan_path: self.plan_path.clone(),
            last_status: None,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
