// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the transformation service's JSON API.

use super::wire::{
    CreateUploadUrlRequest, CreateUploadUrlResponse, GetTransformationPlanResponse,
    GetTransformationResponse, LanguageSpec, ProgrammingLanguage, StartTransformationRequest,
    StartTransformationResponse, StopTransformationResponse, TransformationSpec, WorkspaceState,
};
use super::{
    JobStatusReport, ServiceError, StartRequest, TransformService, TransformationPlan,
    UploadDestination, UploadHeaders,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;
use xform_core::{JobId, UploadId};

/// Connection settings for the transformation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoint: Url,
    /// Bearer token; credential acquisition happens outside this crate
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint, auth_token: None, request_timeout: Duration::from_secs(30) }
    }

    xform_core::setters! {
        set { request_timeout: Duration }
        option { auth_token: String }
    }
}

#[derive(Clone)]
pub struct HttpTransformService {
    client: reqwest::Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl HttpTransformService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::network("build client", e.to_string()))?;
        Ok(Self { client, endpoint: config.endpoint, auth_token: config.auth_token })
    }

    fn url(&self, operation: &str, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ServiceError::InvalidUrl {
                operation: operation.to_string(),
                message: format!("endpoint '{}' cannot be a base", self.endpoint),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(
        &self,
        operation: &str,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ServiceError> {
        let url = self.url(operation, segments)?;
        let request = self.client.request(method, url);
        Ok(match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ServiceError> {
        let response =
            request.send().await.map_err(|e| ServiceError::from_reqwest(operation, e))?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ServiceError::throttled(operation));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::api(operation, status.as_u16(), body.trim().to_string()));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = self.send(operation, request).await?;
        response.json::<T>().await.map_err(|e| ServiceError::Parse {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransformService for HttpTransformService {
    async fn create_upload_url(
        &self,
        checksum: &str,
        kms_key_arn: Option<&str>,
    ) -> Result<UploadDestination, ServiceError> {
        const OP: &str = "create upload url";
        let body = CreateUploadUrlRequest {
            content_checksum: checksum,
            content_checksum_type: "SHA_256",
            upload_intent: "TRANSFORMATION",
            kms_key_arn: kms_key_arn.filter(|arn| !arn.trim().is_empty()),
        };
        let request = self.request(OP, Method::POST, &["uploads"])?.json(&body);
        let response: CreateUploadUrlResponse = self.send_json(OP, request).await?;
        tracing::debug!(upload_id = %response.upload_id, "created upload url");
        Ok(UploadDestination {
            upload_url: response.upload_url,
            upload_id: UploadId::new(response.upload_id),
        })
    }

    async fn upload(
        &self,
        upload_url: &str,
        body: Vec<u8>,
        headers: &UploadHeaders,
    ) -> Result<(), ServiceError> {
        const OP: &str = "upload archive";
        let url = Url::parse(upload_url).map_err(|e| ServiceError::InvalidUrl {
            operation: OP.to_string(),
            message: e.to_string(),
        })?;
        // Pre-signed URLs carry their own authorization; no bearer token here.
        let mut request = self.client.put(url).body(body);
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }
        self.send(OP, request).await?;
        Ok(())
    }

    async fn start_transformation(&self, request: &StartRequest) -> Result<JobId, ServiceError> {
        const OP: &str = "start transformation";
        let body = StartTransformationRequest {
            workspace_state: WorkspaceState {
                upload_id: request.upload_id.as_str(),
                programming_language: ProgrammingLanguage { language_name: "java" },
            },
            transformation_spec: TransformationSpec {
                transformation_type: "LANGUAGE_UPGRADE",
                source: LanguageSpec { language: request.source.as_wire() },
                target: LanguageSpec { language: request.target.as_wire() },
            },
        };
        let http = self.request(OP, Method::POST, &["transformations"])?.json(&body);
        let response: StartTransformationResponse = self.send_json(OP, http).await?;
        Ok(JobId::new(response.transformation_job_id))
    }

    async fn stop_transformation(&self, job_id: &JobId) -> Result<(), ServiceError> {
        const OP: &str = "stop transformation";
        let request =
            self.request(OP, Method::POST, &["transformations", job_id.as_str(), "stop"])?;
        let response: StopTransformationResponse = self.send_json(OP, request).await?;
        tracing::debug!(%job_id, status = %response.transformation_status, "stop requested");
        Ok(())
    }

    async fn get_status(&self, job_id: &JobId) -> Result<JobStatusReport, ServiceError> {
        const OP: &str = "get transformation status";
        let request = self.request(OP, Method::GET, &["transformations", job_id.as_str()])?;
        let response: GetTransformationResponse = self.send_json(OP, request).await?;
        Ok(JobStatusReport {
            status: response.transformation_job.status,
            reason: response.transformation_job.reason,
        })
    }

    async fn get_plan(&self, job_id: &JobId) -> Result<TransformationPlan, ServiceError> {
        const OP: &str = "get transformation plan";
        let request =
            self.request(OP, Method::GET, &["transformations", job_id.as_str(), "plan"])?;
        let response: GetTransformationPlanResponse = self.send_json(OP, request).await?;
        Ok(TransformationPlan { steps: response.transformation_plan.transformation_steps })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
