// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xform run` - transform one project end to end.

use crate::exit_error::{ExitError, EXIT_CANCELLED, EXIT_FAILURE};
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use std::path::PathBuf;
use xform_adapters::{
    CopyCachePreparer, DesktopNotifyAdapter, HttpTransformService, LogNotifyAdapter,
    NotifyAdapter, NotifyError, TracingTelemetry,
};
use xform_core::{JavaVersion, JobStatus, SystemClock};
use xform_engine::{
    env, service_config, HistoryStore, JobSnapshot, Orchestrator, OrchestratorConfig,
    OrchestratorDeps, RunHandle, RunOutcome, TransformError, TransformRequest,
};

/// Where Maven's `dependency:copy-dependencies` leaves resolved jars
const DEFAULT_DEPENDENCY_DIR: &str = "target/dependency";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Project directory containing a pom.xml
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Java version the project is on (8, 11 or 17)
    #[arg(long, default_value = "8")]
    pub source: JavaVersion,

    /// Java version to upgrade to
    #[arg(long, default_value = "17")]
    pub target: JavaVersion,

    /// Transformation service endpoint (default: $XFORM_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// KMS key to encrypt the uploaded archive with (default: $XFORM_KMS_KEY_ARN)
    #[arg(long)]
    pub kms_key_arn: Option<String>,

    /// Directory of resolved dependencies to ship with the sources
    /// [default: <PROJECT>/target/dependency]
    #[arg(long)]
    pub dependencies: Option<PathBuf>,

    /// Log the final notification instead of showing a desktop notification
    #[arg(long)]
    pub no_desktop_notify: bool,
}

/// Notifier chosen at startup.
#[derive(Clone, Copy, Debug)]
pub enum HostNotifier {
    Desktop(DesktopNotifyAdapter),
    Log(LogNotifyAdapter),
}

impl HostNotifier {
    pub fn select(desktop: bool) -> Self {
        if desktop {
            HostNotifier::Desktop(DesktopNotifyAdapter::new())
        } else {
            HostNotifier::Log(LogNotifyAdapter)
        }
    }
}

#[async_trait]
impl NotifyAdapter for HostNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            HostNotifier::Desktop(n) => n.notify(title, message).await,
            HostNotifier::Log(n) => n.notify(title, message).await,
        }
    }
}

/// Exit code for a finished run.
pub fn exit_code(status: JobStatus) -> i32 {
    match status {
        JobStatus::Succeeded | JobStatus::PartiallySucceeded => 0,
        JobStatus::Cancelled => EXIT_CANCELLED,
        JobStatus::NotStarted | JobStatus::Running | JobStatus::Failed => EXIT_FAILURE,
    }
}

/// Exit error for a run that never started.
pub fn rejection(e: TransformError) -> ExitError {
    match e {
        TransformError::Validation(_) => ExitError::validation(e.to_string()),
        TransformError::Setup(_) | TransformError::AlreadyRunning => {
            ExitError::failure(e.to_string())
        }
    }
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let service_config = service_config(args.endpoint.as_deref())
        .map_err(|e| ExitError::validation(e.to_string()))?;
    let service =
        HttpTransformService::new(service_config).context("creating service client")?;

    let mut config = OrchestratorConfig::from_env();
    if let Some(arn) = args.kms_key_arn {
        config = config.kms_key_arn(arn);
    }
    let dependencies = args
        .dependencies
        .unwrap_or_else(|| args.project.join(DEFAULT_DEPENDENCY_DIR));

    let deps = OrchestratorDeps {
        service,
        notifier: HostNotifier::select(!args.no_desktop_notify),
        telemetry: TracingTelemetry,
        dependencies: CopyCachePreparer::new(dependencies),
    };
    let mut orchestrator = Orchestrator::new(deps, config, SystemClock);
    match env::state_dir() {
        Ok(dir) => orchestrator = orchestrator.with_history_store(HistoryStore::new(dir)),
        Err(e) => tracing::warn!(error = %e, "run history will not be saved"),
    }

    let handle = orchestrator.handle();
    let interrupt = spawn_interrupt(handle.clone());
    let progress = spawn_progress(&handle);

    let request =
        TransformRequest { project_path: args.project, source: args.source, target: args.target };
    let result = orchestrator.transform(request, &handle).await;
    orchestrator.flush().await;
    interrupt.abort();
    progress.abort();

    let outcome = result.map_err(rejection)?;
    report(&outcome, format)?;
    match exit_code(outcome.status) {
        0 => Ok(()),
        code => Err(ExitError::new(code, String::new()).into()),
    }
}

fn report(outcome: &RunOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", output::render_outcome(outcome)),
        OutputFormat::Json => output::print_json(outcome)?,
    }
    Ok(())
}

/// Cancel the run on Ctrl-C.
fn spawn_interrupt(handle: RunHandle) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling");
            handle.cancel();
        }
    })
}

/// Log status and step changes as the run advances.
fn spawn_progress(handle: &RunHandle) -> tokio::task::JoinHandle<()> {
    let mut rx = handle.subscribe();
    tokio::spawn(async move {
        let mut last = JobSnapshot::default();
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            if current.status != last.status {
                tracing::info!(status = %current.status, job_id = %current.job_id, "run status");
            }
            for (step, state) in current.steps.iter() {
                if last.steps.get(step) != state {
                    tracing::info!(%step, %state, "step");
                }
            }
            last = current;
        }
    })
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
