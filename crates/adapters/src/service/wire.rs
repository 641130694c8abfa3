// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON bodies exchanged with the transformation service.

use super::PlanStep;
use serde::{Deserialize, Serialize};
use xform_core::TransformationStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateUploadUrlRequest<'a> {
    pub content_checksum: &'a str,
    pub content_checksum_type: &'static str,
    pub upload_intent: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateUploadUrlResponse {
    pub upload_url: String,
    pub upload_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StartTransformationRequest<'a> {
    pub workspace_state: WorkspaceState<'a>,
    pub transformation_spec: TransformationSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WorkspaceState<'a> {
    pub upload_id: &'a str,
    pub programming_language: ProgrammingLanguage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProgrammingLanguage {
    pub language_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransformationSpec {
    pub transformation_type: &'static str,
    pub source: LanguageSpec,
    pub target: LanguageSpec,
}

#[derive(Debug, Serialize)]
pub(super) struct LanguageSpec {
    pub language: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StartTransformationResponse {
    pub transformation_job_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GetTransformationResponse {
    pub transformation_job: TransformationJob,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransformationJob {
    pub status: TransformationStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GetTransformationPlanResponse {
    pub transformation_plan: WirePlan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WirePlan {
    #[serde(default)]
    pub transformation_steps: Vec<PlanStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StopTransformationResponse {
    pub transformation_status: TransformationStatus,
}
