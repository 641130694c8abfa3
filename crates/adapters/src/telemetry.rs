// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fire-and-forget run telemetry.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use xform_core::{JobStatus, StepName};

/// Errors from telemetry emission
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to encode event: {0}")]
    Encode(String),
    #[error("emit failed: {0}")]
    EmitFailed(String),
}

/// Checkpoint events reported during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    RunStarted { session_id: String, started_at_ms: u64 },
    PhaseCompleted { phase: StepName, passed: bool },
    RunFinished { result: JobStatus, duration_ms: u64 },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::RunStarted { .. } => "run_started",
            TelemetryEvent::PhaseCompleted { .. } => "phase_completed",
            TelemetryEvent::RunFinished { .. } => "run_finished",
        }
    }
}

/// Adapter for telemetry sinks
#[async_trait]
pub trait TelemetryAdapter: Clone + Send + Sync + 'static {
    async fn record(&self, event: TelemetryEvent) -> Result<(), TelemetryError>;
}

/// Emits events as JSON on the `xform::telemetry` tracing target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTelemetry;

#[async_trait]
impl TelemetryAdapter for TracingTelemetry {
    async fn record(&self, event: TelemetryEvent) -> Result<(), TelemetryError> {
        let payload =
            serde_json::to_string(&event).map_err(|e| TelemetryError::Encode(e.to_string()))?;
        tracing::info!(target: "xform::telemetry", event = event.name(), %payload);
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{TelemetryAdapter, TelemetryError, TelemetryEvent};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeTelemetryState {
        events: Vec<TelemetryEvent>,
        fail: bool,
    }

    /// Fake telemetry sink for testing
    #[derive(Clone, Default)]
    pub struct FakeTelemetryAdapter {
        inner: Arc<Mutex<FakeTelemetryState>>,
    }

    impl FakeTelemetryAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reject every event after recording it.
        pub fn failing() -> Self {
            let fake = Self::default();
            fake.inner.lock().fail = true;
            fake
        }

        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.inner.lock().events.clone()
        }
    }

    #[async_trait]
    impl TelemetryAdapter for FakeTelemetryAdapter {
        async fn record(&self, event: TelemetryEvent) -> Result<(), TelemetryError> {
            let mut inner = self.inner.lock();
            inner.events.push(event);
            if inner.fail {
                return Err(TelemetryError::EmitFailed("sink offline".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTelemetryAdapter;

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
