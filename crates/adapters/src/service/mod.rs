// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transformation service adapter.
//!
//! Raw remote operations against the code transformation service. The
//! orchestration-level contracts (checksum computation, no-op stop for jobs
//! that never started) live in the engine's transfer client, which drives
//! this adapter.

mod error;
mod headers;
mod http;
mod wire;

pub use error::ServiceError;
pub use headers::{
    sha256_base64, upload_headers, UploadHeaders, CHECKSUM_HEADER, CONTENT_TYPE_ZIP,
    SSE_HEADER, SSE_KMS_KEY_HEADER, SSE_KMS_VALUE,
};
pub use http::{HttpTransformService, ServiceConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use xform_core::{JavaVersion, JobId, TransformationStatus, UploadId};

/// Pre-signed destination returned by the upload URL request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDestination {
    pub upload_url: String,
    pub upload_id: UploadId,
}

/// Parameters of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub upload_id: UploadId,
    pub source: JavaVersion,
    pub target: JavaVersion,
}

/// Current state of a remote job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatusReport {
    pub status: TransformationStatus,
    /// Server-provided explanation, usually present on failure statuses
    pub reason: Option<String>,
}

impl JobStatusReport {
    pub fn new(status: TransformationStatus) -> Self {
        Self { status, reason: None }
    }
}

/// One step of the transformation plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Human-readable plan of proposed changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationPlan {
    pub steps: Vec<PlanStep>,
}

/// Adapter for the remote code transformation service
#[async_trait]
pub trait TransformService: Clone + Send + Sync + 'static {
    /// Request a write destination for an archive with the given checksum.
    async fn create_upload_url(
        &self,
        checksum: &str,
        kms_key_arn: Option<&str>,
    ) -> Result<UploadDestination, ServiceError>;

    /// Transfer archive bytes to a pre-signed destination.
    async fn upload(
        &self,
        upload_url: &str,
        body: Vec<u8>,
        headers: &UploadHeaders,
    ) -> Result<(), ServiceError>;

    /// Submit an uploaded archive for transformation.
    async fn start_transformation(&self, request: &StartRequest) -> Result<JobId, ServiceError>;

    /// Request cancellation of an in-flight job.
    async fn stop_transformation(&self, job_id: &JobId) -> Result<(), ServiceError>;

    async fn get_status(&self, job_id: &JobId) -> Result<JobStatusReport, ServiceError>;

    async fn get_plan(&self, job_id: &JobId) -> Result<TransformationPlan, ServiceError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransformService, ServiceCall, ServiceOp};
