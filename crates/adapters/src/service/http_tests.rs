// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::service::upload_headers;
use httpmock::prelude::*;
use serde_json::json;
use xform_core::{JavaVersion, TransformationStatus};

async fn service_for(server: &MockServer) -> HttpTransformService {
    let endpoint = Url::parse(&server.base_url()).unwrap();
    HttpTransformService::new(ServiceConfig::new(endpoint)).unwrap()
}

#[tokio::test]
async fn create_upload_url_omits_empty_kms_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/uploads").json_body(json!({
                "contentChecksum": "c2hh",
                "contentChecksumType": "SHA_256",
                "uploadIntent": "TRANSFORMATION"
            }));
            then.status(200).json_body(json!({
                "uploadUrl": "https://bucket.example/presigned",
                "uploadId": "upload-1"
            }));
        })
        .await;

    let service = service_for(&server).await;
    let destination = service.create_upload_url("c2hh", Some("")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(destination.upload_id, "upload-1");
    assert_eq!(destination.upload_url, "https://bucket.example/presigned");
}

#[tokio::test]
async fn create_upload_url_forwards_kms_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/uploads").json_body(json!({
                "contentChecksum": "c2hh",
                "contentChecksumType": "SHA_256",
                "uploadIntent": "TRANSFORMATION",
                "kmsKeyArn": "arn:aws:kms:us-east-1:1:key/k"
            }));
            then.status(200).json_body(json!({ "uploadUrl": "https://u", "uploadId": "upload-2" }));
        })
        .await;

    let service = service_for(&server).await;
    let destination =
        service.create_upload_url("c2hh", Some("arn:aws:kms:us-east-1:1:key/k")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(destination.upload_id, "upload-2");
}

#[tokio::test]
async fn upload_puts_bytes_with_encryption_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/presigned/archive")
                .header("content-type", "application/zip")
                .header("x-amz-checksum-sha256", "c2hh")
                .header("x-amz-server-side-encryption", "aws:kms")
                .header("x-amz-server-side-encryption-aws-kms-key-id", "arn:key")
                .body("zip-bytes");
            then.status(200);
        })
        .await;

    let service = service_for(&server).await;
    let headers = upload_headers("c2hh", "arn:key");
    service
        .upload(&server.url("/presigned/archive"), b"zip-bytes".to_vec(), &headers)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn upload_failure_reports_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/presigned/archive");
            then.status(403).body("signature expired");
        })
        .await;

    let service = service_for(&server).await;
    let err = service
        .upload(&server.url("/presigned/archive"), vec![1, 2, 3], &upload_headers("c", ""))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::api("upload archive", 403, "signature expired"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn start_transformation_sends_upload_and_versions() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/transformations").json_body(json!({
                "workspaceState": {
                    "uploadId": "upload-1",
                    "programmingLanguage": { "languageName": "java" }
                },
                "transformationSpec": {
                    "transformationType": "LANGUAGE_UPGRADE",
                    "source": { "language": "JAVA_8" },
                    "target": { "language": "JAVA_17" }
                }
            }));
            then.status(200).json_body(json!({ "transformationJobId": "job-42" }));
        })
        .await;

    let service = service_for(&server).await;
    let job_id = service
        .start_transformation(&StartRequest {
            upload_id: UploadId::new("upload-1"),
            source: JavaVersion::Java8,
            target: JavaVersion::Java17,
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(job_id, "job-42");
}

#[tokio::test]
async fn get_status_parses_status_and_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transformations/job-42");
            then.status(200).json_body(json!({
                "transformationJob": {
                    "jobId": "job-42",
                    "status": "FAILED",
                    "reason": "build failed"
                }
            }));
        })
        .await;

    let service = service_for(&server).await;
    let report = service.get_status(&JobId::new("job-42")).await.unwrap();

    assert_eq!(report.status, TransformationStatus::Failed);
    assert_eq!(report.reason.as_deref(), Some("build failed"));
}

#[tokio::test]
async fn get_status_keeps_unknown_statuses() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transformations/job-42");
            then.status(200)
                .json_body(json!({ "transformationJob": { "status": "AWAITING_INPUT" } }));
        })
        .await;

    let service = service_for(&server).await;
    let report = service.get_status(&JobId::new("job-42")).await.unwrap();

    assert_eq!(report.status, TransformationStatus::Other("AWAITING_INPUT".to_string()));
    assert_eq!(report.reason, None);
}

#[tokio::test]
async fn too_many_requests_maps_to_throttled() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transformations/job-42");
            then.status(429);
        })
        .await;

    let service = service_for(&server).await;
    let err = service.get_status(&JobId::new("job-42")).await.unwrap_err();

    assert!(err.is_throttled());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transformations/job-42");
            then.status(200).body("not json");
        })
        .await;

    let service = service_for(&server).await;
    let err = service.get_status(&JobId::new("job-42")).await.unwrap_err();

    assert_eq!(err.error_type(), "parse_error");
}

#[tokio::test]
async fn get_plan_returns_steps_in_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transformations/job-42/plan");
            then.status(200).json_body(json!({
                "transformationPlan": {
                    "transformationSteps": [
                        { "id": "1", "name": "Update dependencies", "description": "Bump JUnit" },
                        { "id": "2", "name": "Replace APIs", "description": "Remove javax" }
                    ]
                }
            }));
        })
        .await;

    let service = service_for(&server).await;
    let plan = service.get_plan(&JobId::new("job-42")).await.unwrap();

    let names: Vec<_> = plan.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Update dependencies", "Replace APIs"]);
}

#[tokio::test]
async fn stop_posts_to_job_stop_path_with_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/transformations/job-42/stop")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({ "transformationStatus": "STOPPING" }));
        })
        .await;

    let endpoint = Url::parse(&server.base_url()).unwrap();
    let service =
        HttpTransformService::new(ServiceConfig::new(endpoint).auth_token("secret")).unwrap();
    service.stop_transformation(&JobId::new("job-42")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn endpoint_path_prefix_is_preserved() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/transformations/job-1");
            then.status(200).json_body(json!({ "transformationJob": { "status": "PLANNED" } }));
        })
        .await;

    let endpoint = Url::parse(&server.url("/api/v1/")).unwrap();
    let service = HttpTransformService::new(ServiceConfig::new(endpoint)).unwrap();
    let report = service.get_status(&JobId::new("job-1")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.status, TransformationStatus::Planned);
}
