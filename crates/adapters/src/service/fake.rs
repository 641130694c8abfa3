// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transformation service for tests.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    JobStatusReport, PlanStep, ServiceError, StartRequest, TransformService, TransformationPlan,
    UploadDestination, UploadHeaders,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;
use xform_core::{JavaVersion, JobId, TransformationStatus, UploadId};

/// Operation selector for error injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOp {
    CreateUploadUrl,
    Upload,
    Start,
    Stop,
    GetStatus,
    GetPlan,
}

/// Recorded service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    CreateUploadUrl { checksum: String, kms_key_arn: Option<String> },
    Upload { url: String, headers: Vec<(String, String)>, size: usize },
    Start { upload_id: UploadId, source: JavaVersion, target: JavaVersion },
    Stop { job_id: JobId },
    GetStatus { job_id: JobId },
    GetPlan { job_id: JobId },
}

struct FakeServiceState {
    calls: Vec<ServiceCall>,
    errors: HashMap<ServiceOp, VecDeque<ServiceError>>,
    statuses: VecDeque<JobStatusReport>,
    last_status: JobStatusReport,
    plan: TransformationPlan,
    job_id: JobId,
    uploaded: Option<Vec<u8>>,
    held: HashMap<ServiceOp, Arc<Notify>>,
}

/// Fake transformation service.
///
/// Statuses are served from a script; once exhausted, the last scripted
/// status repeats.
#[derive(Clone)]
pub struct FakeTransformService {
    inner: Arc<Mutex<FakeServiceState>>,
}

impl Default for FakeTransformService {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeServiceState {
                calls: Vec::new(),
                errors: HashMap::new(),
                statuses: VecDeque::new(),
                last_status: JobStatusReport::new(TransformationStatus::Created),
                plan: TransformationPlan::default(),
                job_id: JobId::new("job-1"),
                uploaded: None,
                held: HashMap::new(),
            })),
        }
    }
}

impl FakeTransformService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue statuses returned by successive `get_status` calls.
    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = TransformationStatus>) {
        let mut inner = self.inner.lock();
        inner.statuses.extend(statuses.into_iter().map(JobStatusReport::new));
    }

    /// Queue a status that carries a reason.
    pub fn script_status_with_reason(&self, status: TransformationStatus, reason: &str) {
        self.inner
            .lock()
            .statuses
            .push_back(JobStatusReport { status, reason: Some(reason.to_string()) });
    }

    pub fn set_plan_steps(&self, steps: &[(&str, &str)]) {
        self.inner.lock().plan = TransformationPlan {
            steps: steps
                .iter()
                .enumerate()
                .map(|(i, (name, description))| PlanStep {
                    id: (i + 1).to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                    status: None,
                })
                .collect(),
        };
    }

    pub fn set_job_id(&self, job_id: &str) {
        self.inner.lock().job_id = JobId::new(job_id);
    }

    /// Fail the next call of `op` with `error`. Repeated calls queue errors.
    pub fn fail_next(&self, op: ServiceOp, error: ServiceError) {
        self.inner.lock().errors.entry(op).or_default().push_back(error);
    }

    /// Suspend calls of `op` after they are recorded until [`Self::release`].
    pub fn hold(&self, op: ServiceOp) {
        self.inner.lock().held.insert(op, Arc::new(Notify::new()));
    }

    pub fn release(&self, op: ServiceOp) {
        if let Some(gate) = self.inner.lock().held.remove(&op) {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.inner.lock().calls.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.count(|c| matches!(c, ServiceCall::Stop { .. }))
    }

    pub fn status_calls(&self) -> usize {
        self.count(|c| matches!(c, ServiceCall::GetStatus { .. }))
    }

    pub fn start_calls(&self) -> usize {
        self.count(|c| matches!(c, ServiceCall::Start { .. }))
    }

    /// Bytes of the most recent upload.
    pub fn uploaded(&self) -> Option<Vec<u8>> {
        self.inner.lock().uploaded.clone()
    }

    fn count(&self, pred: impl Fn(&ServiceCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }

    async fn record(&self, op: ServiceOp, call: ServiceCall) -> Result<(), ServiceError> {
        let (gate, error) = {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            let error = inner.errors.get_mut(&op).and_then(VecDeque::pop_front);
            (inner.held.get(&op).cloned(), error)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TransformService for FakeTransformService {
    async fn create_upload_url(
        &self,
        checksum: &str,
        kms_key_arn: Option<&str>,
    ) -> Result<UploadDestination, ServiceError> {
        self.record(
            ServiceOp::CreateUploadUrl,
            ServiceCall::CreateUploadUrl {
                checksum: checksum.to_string(),
                kms_key_arn: kms_key_arn.map(str::to_string),
            },
        )
        .await?;
        Ok(UploadDestination {
            upload_url: "https://uploads.test/presigned".to_string(),
            upload_id: UploadId::new("upload-1"),
        })
    }

    async fn upload(
        &self,
        upload_url: &str,
        body: Vec<u8>,
        headers: &UploadHeaders,
    ) -> Result<(), ServiceError> {
        self.record(
            ServiceOp::Upload,
            ServiceCall::Upload {
                url: upload_url.to_string(),
                headers: headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                size: body.len(),
            },
        )
        .await?;
        self.inner.lock().uploaded = Some(body);
        Ok(())
    }

    async fn start_transformation(&self, request: &StartRequest) -> Result<JobId, ServiceError> {
        self.record(
            ServiceOp::Start,
            ServiceCall::Start {
                upload_id: request.upload_id.clone(),
                source: request.source,
                target: request.target,
            },
        )
        .await?;
        Ok(self.inner.lock().job_id.clone())
    }

    async fn stop_transformation(&self, job_id: &JobId) -> Result<(), ServiceError> {
        self.record(ServiceOp::Stop, ServiceCall::Stop { job_id: job_id.clone() }).await
    }

    async fn get_status(&self, job_id: &JobId) -> Result<JobStatusReport, ServiceError> {
        self.record(ServiceOp::GetStatus, ServiceCall::GetStatus { job_id: job_id.clone() })
            .await?;
        let mut inner = self.inner.lock();
        if let Some(next) = inner.statuses.pop_front() {
            inner.last_status = next;
        }
        Ok(inner.last_status.clone())
    }

    async fn get_plan(&self, job_id: &JobId) -> Result<TransformationPlan, ServiceError> {
        self.record(ServiceOp::GetPlan, ServiceCall::GetPlan { job_id: job_id.clone() }).await?;
        Ok(self.inner.lock().plan.clone())
    }
}
