// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transformation orchestrator.
//!
//! Drives one run through archive, upload, start, plan and completion:
//!
//! ```text
//! NotStarted ──► Running ──► Succeeded | PartiallySucceeded | Failed | Cancelled
//! ```
//!
//! Every step is preceded by a cancellation check and every suspension point
//! races the run's cancellation token. Errors from any step are classified
//! once in [`Orchestrator::run`]; finalization runs on every path.

use crate::archive::{ArchiveBuilder, ArchiveError};
use crate::config::OrchestratorConfig;
use crate::context::{JobSnapshot, RunContext, RunHandle};
use crate::error::{RunError, TransformError};
use crate::history_store::HistoryStore;
use crate::plan::{render_plan, write_plan, PlanError};
use crate::poller::JobPoller;
use crate::transfer::TransferClient;
use crate::validation::{validate_project, validate_upgrade};
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use xform_adapters::{
    DependencyPreparer, NotifyAdapter, TelemetryAdapter, TelemetryEvent, TransformService,
};
use xform_core::{
    Clock, JavaVersion, JobId, JobStatus, RunHistory, RunHistoryEntry, StepName, StepProgress,
    StepState, TransformationStatus, DOWNLOAD_READY_STATUSES, PLAN_READY_STATUSES,
};

/// Appended to every notification except plain success.
pub const FEEDBACK_PROMPT: &str = "Tell us how this transformation went to help improve it.";

/// Collaborators the orchestrator drives.
pub struct OrchestratorDeps<S, N, T, D> {
    pub service: S,
    pub notifier: N,
    pub telemetry: T,
    pub dependencies: D,
}

/// What to transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub project_path: PathBuf,
    pub source: JavaVersion,
    pub target: JavaVersion,
}

/// Terminal result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub status: JobStatus,
    pub job_id: JobId,
    pub project_name: String,
    pub steps: StepProgress,
    pub plan_path: Option<PathBuf>,
    /// User-facing summary, identical to the notification body
    pub message: String,
    pub duration_ms: u64,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, JobStatus::Succeeded | JobStatus::PartiallySucceeded)
    }
}

/// Clears the single-run flag on drop.
struct ActiveRun(Arc<AtomicBool>);

impl ActiveRun {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActiveRun(Arc::clone(flag)))
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Orchestrator<S, N, T, D, C: Clock> {
    transfer: TransferClient<S>,
    poller: JobPoller<S>,
    archive: ArchiveBuilder,
    notifier: N,
    telemetry: T,
    dependencies: D,
    clock: C,
    config: OrchestratorConfig,
    history: Mutex<RunHistory>,
    history_store: Option<HistoryStore>,
    state: Arc<watch::Sender<JobSnapshot>>,
    active: Arc<AtomicBool>,
    side_tasks: TaskTracker,
}

impl<S, N, T, D, C> Orchestrator<S, N, T, D, C>
where
    S: TransformService,
    N: NotifyAdapter,
    T: TelemetryAdapter,
    D: DependencyPreparer,
    C: Clock,
{
    pub fn new(deps: OrchestratorDeps<S, N, T, D>, config: OrchestratorConfig, clock: C) -> Self {
        let transfer = TransferClient::new(deps.service);
        let (state, _) = watch::channel(JobSnapshot::default());
        Self {
            poller: JobPoller::new(transfer.clone(), config.poll_interval),
            transfer,
            archive: ArchiveBuilder::new(&config.work_dir),
            notifier: deps.notifier,
            telemetry: deps.telemetry,
            dependencies: deps.dependencies,
            clock,
            config,
            history: Mutex::new(RunHistory::new()),
            history_store: None,
            state: Arc::new(state),
            active: Arc::new(AtomicBool::new(false)),
            side_tasks: TaskTracker::new(),
        }
    }

    /// Persist history through `store`, seeding from what it already holds.
    pub fn with_history_store(mut self, store: HistoryStore) -> Self {
        match store.load() {
            Ok(history) => *self.history.get_mut() = history,
            Err(e) => {
                tracing::warn!(
                    path = %store.path().display(),
                    error = %e,
                    "ignoring unreadable history"
                )
            }
        }
        self.history_store = Some(store);
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// New handle for a run: fresh cancellation token, shared snapshot feed.
    pub fn handle(&self) -> RunHandle {
        RunHandle::new(self.state.subscribe())
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.state.borrow().clone()
    }

    pub fn history(&self) -> RunHistory {
        self.history.lock().clone()
    }

    /// Wait for in-flight telemetry and notification deliveries.
    pub async fn flush(&self) {
        self.side_tasks.close();
        self.side_tasks.wait().await;
        self.side_tasks.reopen();
    }

    /// Validate, prepare dependencies, then run.
    ///
    /// Nothing remote happens unless validation and preparation succeed.
    pub async fn transform(
        &self,
        request: TransformRequest,
        handle: &RunHandle,
    ) -> Result<RunOutcome, TransformError> {
        validate_upgrade(request.source, request.target)?;
        let project = validate_project(&request.project_path)?;
        let _active = ActiveRun::acquire(&self.active).ok_or(TransformError::AlreadyRunning)?;

        let folder = self.dependencies.prepare(&project).await?;
        tracing::info!(
            project = %project.name,
            dependencies = %folder.path().display(),
            "dependencies prepared"
        );
        let ctx = RunContext::new(
            project,
            request.source,
            request.target,
            folder,
            self.clock.epoch_ms(),
        );
        Ok(self.run(ctx, handle.token()).await)
    }

    /// Execute a prepared run to its terminal outcome.
    pub async fn run(&self, mut ctx: RunContext, cancel: &CancellationToken) -> RunOutcome {
        ctx.transition(JobStatus::Running);
        ctx.reset_steps();
        self.publish(&ctx);
        tracing::info!(
            project = %ctx.project.name,
            session_id = %ctx.session_id,
            source = %ctx.source,
            target = %ctx.target,
            "transformation started"
        );
        self.emit(TelemetryEvent::RunStarted {
            session_id: ctx.session_id.clone(),
            started_at_ms: ctx.started_at_ms,
        });
        let refresh = self.start_refresh_timer();

        let (title, message) = match self.execute(&mut ctx, cancel).await {
            Ok(status) => {
                if cancel.is_cancelled() {
                    tracing::info!(job_id = %ctx.job_id(), "cancellation arrived after completion");
                }
                ctx.transition(status);
                self.success_notice(&ctx, status)
            }
            Err(e) if e.is_cancelled() || cancel.is_cancelled() => {
                self.handle_cancelled(&mut ctx, &e).await
            }
            Err(e) => self.handle_failed(&mut ctx, e),
        };
        self.notify(title, message.clone());

        self.finalize(ctx, message, refresh).await
    }

    async fn execute(
        &self,
        ctx: &mut RunContext,
        cancel: &CancellationToken,
    ) -> Result<JobStatus, RunError> {
        // Archive and upload
        check_cancelled(cancel)?;
        let archive = self.build_archive(ctx).await?;
        check_cancelled(cancel)?;
        let upload_id =
            cancellable(cancel, self.transfer.upload_archive(&archive, &self.config.kms_key_arn))
                .await?
                .inspect_err(|e| tracing::error!(error = %e, "upload failed"))?;

        // Start
        self.pause(cancel).await?;
        check_cancelled(cancel)?;
        let job_id = cancellable(cancel, self.transfer.start(&upload_id, ctx.source, ctx.target))
            .await?
            .map_err(RunError::JobStart)?;
        ctx.set_job_id(job_id.clone());
        ctx.mark_step(StepName::StartJob, StepState::Succeeded);
        self.publish(ctx);

        // Plan
        self.pause(cancel).await?;
        check_cancelled(cancel)?;
        let planned = self.poller.poll(&job_id, PLAN_READY_STATUSES, cancel).await?;
        tracing::info!(%job_id, status = %planned, "plan ready");
        ctx.mark_step(StepName::BuildCode, StepState::Succeeded);
        self.publish(ctx);

        let plan =
            cancellable(cancel, self.transfer.plan(&job_id)).await?.map_err(PlanError::from)?;
        let markdown = render_plan(&ctx.project.name, ctx.source, ctx.target, &plan);
        let plan_path = write_plan(&self.config.work_dir, &markdown).await?;
        tracing::info!(
            %job_id,
            path = %plan_path.display(),
            steps = plan.steps.len(),
            "plan written"
        );
        ctx.set_plan_path(plan_path);
        ctx.mark_step(StepName::GeneratePlan, StepState::Succeeded);
        self.publish(ctx);
        check_cancelled(cancel)?;

        // Completion
        let final_status = self.poller.poll(&job_id, DOWNLOAD_READY_STATUSES, cancel).await?;
        let status = match final_status {
            TransformationStatus::Completed => JobStatus::Succeeded,
            TransformationStatus::PartiallyCompleted => JobStatus::PartiallySucceeded,
            other => {
                ctx.mark_step(StepName::TransformCode, StepState::Failed);
                return Err(RunError::JobNotSuccessful(other));
            }
        };
        ctx.mark_step(StepName::TransformCode, StepState::Succeeded);
        Ok(status)
    }

    /// Build the upload archive on the blocking pool.
    ///
    /// The output path is recorded before the build starts and the build is
    /// never abandoned, so finalization removes whatever it wrote.
    async fn build_archive(&self, ctx: &mut RunContext) -> Result<PathBuf, RunError> {
        let dependencies = ctx
            .dependency_path()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| ArchiveError::MissingDependencies(PathBuf::new()))?;
        let builder = self.archive.clone();
        let project_root = ctx.project.path.clone();
        let output_name = format!("{}-{}", ctx.project.name, xform_core::short(&ctx.session_id, 8));
        ctx.set_archive_path(builder.output_path(&output_name));
        let built = tokio::task::spawn_blocking(move || {
            builder.build(&project_root, &dependencies, &output_name)
        })
        .await
        .map_err(|e| ArchiveError::Io {
            path: self.config.work_dir.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;
        built.map_err(|e| {
            tracing::error!(error = %e, "archive build failed");
            RunError::ArchiveBuild(e)
        })
    }

    async fn pause(&self, cancel: &CancellationToken) -> Result<(), RunError> {
        cancellable(cancel, tokio::time::sleep(self.config.throttle_delay)).await
    }

    async fn handle_cancelled(&self, ctx: &mut RunContext, cause: &RunError) -> (String, String) {
        ctx.transition(JobStatus::Cancelled);
        self.publish(ctx);
        if !cause.is_cancelled() {
            tracing::debug!(error = %cause, "error superseded by cancellation");
        }
        tracing::info!(job_id = %ctx.job_id(), "transformation cancelled");
        if let Err(e) = self.transfer.stop(ctx.job_id()).await {
            tracing::warn!(job_id = %ctx.job_id(), error = %e, "stop request failed");
        }
        (
            "Transformation cancelled".to_string(),
            format!("The transformation of {} was cancelled. {FEEDBACK_PROMPT}", ctx.project.name),
        )
    }

    fn handle_failed(&self, ctx: &mut RunContext, error: RunError) -> (String, String) {
        tracing::error!(
            job_id = %ctx.job_id(),
            error_type = error.error_type(),
            error = %error,
            "transformation failed"
        );
        ctx.transition(JobStatus::Failed);
        ctx.record_failure(error.user_message(), Some(error.to_string()));
        let message = format!("{} {FEEDBACK_PROMPT}", error.user_message());
        ("Transformation failed".to_string(), message)
    }

    fn success_notice(&self, ctx: &RunContext, status: JobStatus) -> (String, String) {
        let project = &ctx.project.name;
        let (source, target) = (ctx.source, ctx.target);
        if status == JobStatus::PartiallySucceeded {
            return (
                "Transformation partially succeeded".to_string(),
                format!(
                    "{project} was partially upgraded from {source} to {target}; \
                     some changes could not be applied. {FEEDBACK_PROMPT}"
                ),
            );
        }
        (
            "Transformation succeeded".to_string(),
            format!("{project} was upgraded from {source} to {target}."),
        )
    }

    async fn finalize(
        &self,
        mut ctx: RunContext,
        message: String,
        refresh: JoinHandle<()>,
    ) -> RunOutcome {
        ctx.finalize_steps();
        for (phase, state) in ctx.steps().iter() {
            self.emit(TelemetryEvent::PhaseCompleted {
                phase,
                passed: state == StepState::Succeeded,
            });
        }

        let status = ctx.status();
        let duration_ms = self.clock.elapsed_ms(ctx.started_at_ms);
        self.record_history(RunHistoryEntry {
            timestamp_ms: ctx.started_at_ms,
            module: ctx.project.name.clone(),
            status,
            duration_ms,
            id: ctx.job_id().clone(),
        });

        if let Some(folder) = ctx.take_dependency_folder() {
            let path = folder.path().to_path_buf();
            if let Err(e) = folder.release() {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove dependencies");
            }
        }
        if let Some(archive) = ctx.take_archive_path() {
            for path in [archive.with_extension("zip.partial"), archive] {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => tracing::debug!(path = %path.display(), "archive removed"),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to remove archive"
                        )
                    }
                }
            }
        }
        refresh.abort();

        self.emit(TelemetryEvent::RunFinished { result: status, duration_ms });
        tracing::info!(job_id = %ctx.job_id(), %status, duration_ms, "transformation finished");

        let outcome = RunOutcome {
            status,
            job_id: ctx.job_id().clone(),
            project_name: ctx.project.name.clone(),
            steps: ctx.steps().clone(),
            plan_path: ctx.plan_path().map(|p| p.to_path_buf()),
            message,
            duration_ms,
        };
        drop(ctx);
        self.state
            .send_replace(JobSnapshot { last_status: Some(status), ..JobSnapshot::default() });
        outcome
    }

    fn record_history(&self, entry: RunHistoryEntry) {
        let mut history = self.history.lock();
        history.record(entry);
        if let Some(store) = &self.history_store {
            if let Err(e) = store.save(&history) {
                tracing::warn!(
                    path = %store.path().display(),
                    error = %e,
                    "failed to save history"
                );
            }
        }
    }

    fn publish(&self, ctx: &RunContext) {
        self.state.send_replace(ctx.snapshot());
    }

    /// Periodically wake snapshot observers until aborted.
    fn start_refresh_timer(&self) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let period = self.config.refresh_interval.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                state.send_modify(|_| {});
            }
        })
    }

    fn emit(&self, event: TelemetryEvent) {
        let telemetry = self.telemetry.clone();
        self.side_tasks.spawn(async move {
            let name = event.name();
            if let Err(e) = telemetry.record(event).await {
                tracing::warn!(event = name, error = %e, "telemetry event dropped");
            }
        });
    }

    fn notify(&self, title: String, message: String) {
        let notifier = self.notifier.clone();
        self.side_tasks.spawn(async move {
            if let Err(e) = notifier.notify(&title, &message).await {
                tracing::warn!(%title, error = %e, "notification failed");
            }
        });
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), RunError> {
    if cancel.is_cancelled() {
        return Err(RunError::Cancelled);
    }
    Ok(())
}

/// Race `fut` against cancellation; cancellation wins ties.
async fn cancellable<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output, RunError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RunError::Cancelled),
        out = fut => Ok(out),
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
