// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer client: upload, start, stop and status against the service.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xform_adapters::service::{sha256_base64, upload_headers};
use xform_adapters::{
    JobStatusReport, ServiceError, StartRequest, TransformService, TransformationPlan,
};
use xform_core::{JavaVersion, JobId, UploadId};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to read archive {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Clone)]
pub struct TransferClient<S> {
    service: S,
}

impl<S: TransformService> TransferClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Checksum the archive, request a destination, and upload the bytes.
    pub async fn upload_archive(
        &self,
        archive: &Path,
        kms_key_arn: &str,
    ) -> Result<UploadId, TransferError> {
        let bytes = tokio::fs::read(archive)
            .await
            .map_err(|source| TransferError::Read { path: archive.to_path_buf(), source })?;
        let checksum = sha256_base64(&bytes);
        let destination = self.service.create_upload_url(&checksum, Some(kms_key_arn)).await?;
        let headers = upload_headers(&checksum, kms_key_arn);
        tracing::info!(
            upload_id = %destination.upload_id,
            size = bytes.len(),
            encrypted = headers.is_encrypted(),
            "uploading archive"
        );
        self.service.upload(&destination.upload_url, bytes, &headers).await?;
        Ok(destination.upload_id)
    }

    /// Submit an upload for transformation. Never retried.
    pub async fn start(
        &self,
        upload_id: &UploadId,
        source: JavaVersion,
        target: JavaVersion,
    ) -> Result<JobId, ServiceError> {
        let request = StartRequest { upload_id: upload_id.clone(), source, target };
        let job_id = self.service.start_transformation(&request).await?;
        tracing::info!(%job_id, %upload_id, "transformation started");
        Ok(job_id)
    }

    /// Request cancellation. A job that never started is a no-op.
    pub async fn stop(&self, job_id: &JobId) -> Result<(), ServiceError> {
        if job_id.is_empty() {
            tracing::debug!("no job to stop");
            return Ok(());
        }
        self.service.stop_transformation(job_id).await
    }

    pub async fn status(&self, job_id: &JobId) -> Result<JobStatusReport, ServiceError> {
        self.service.get_status(job_id).await
    }

    pub async fn plan(&self, job_id: &JobId) -> Result<TransformationPlan, ServiceError> {
        self.service.get_plan(job_id).await
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
