// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use xform_adapters::{FakeTransformService, ServiceOp};
use xform_core::{DOWNLOAD_READY_STATUSES, PLAN_READY_STATUSES};
use TransformationStatus::*;

fn poller(service: &FakeTransformService, interval: Duration) -> JobPoller<FakeTransformService> {
    JobPoller::new(TransferClient::new(service.clone()), interval)
}

fn job() -> JobId {
    JobId::new("job-1")
}

#[tokio::test(start_paused = true)]
async fn completed_is_download_ready() {
    let service = FakeTransformService::new();
    service.script_statuses([Completed]);

    let status = poller(&service, Duration::from_secs(5))
        .poll(&job(), DOWNLOAD_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(status, Completed);
    assert_eq!(service.status_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn waits_through_intermediate_statuses() {
    let service = FakeTransformService::new();
    service.script_statuses([Created, Accepted, Preparing, Planning, Planned]);

    let status = poller(&service, Duration::from_secs(5))
        .poll(&job(), PLAN_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(status, Planned);
    assert_eq!(service.status_calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn unknown_statuses_keep_polling() {
    let service = FakeTransformService::new();
    service.script_statuses([Other("AWAITING_CAPACITY".into()), Transforming]);

    let status = poller(&service, Duration::from_secs(1))
        .poll(&job(), PLAN_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(status, Transforming);
}

#[tokio::test(start_paused = true)]
async fn failure_outside_accepted_set_ends_poll() {
    let service = FakeTransformService::new();
    service.script_statuses([Preparing]);
    service.script_status_with_reason(Failed, "compilation failed");

    let err = poller(&service, Duration::from_secs(1))
        .poll(&job(), PLAN_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        PollError::JobFailed { status, reason } => {
            assert_eq!(status, Failed);
            assert_eq!(reason.as_deref(), Some("compilation failed"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn accepted_set_checked_before_failure_set() {
    let service = FakeTransformService::new();
    service.script_statuses([Failed]);

    let status = poller(&service, Duration::from_secs(1))
        .poll(&job(), DOWNLOAD_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(status, Failed);
}

#[tokio::test(start_paused = true)]
async fn throttled_query_is_retried() {
    let service = FakeTransformService::new();
    service.fail_next(ServiceOp::GetStatus, ServiceError::throttled("get status"));
    service.script_statuses([Completed]);

    let status = poller(&service, Duration::from_secs(1))
        .poll(&job(), DOWNLOAD_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(status, Completed);
    assert_eq!(service.status_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn other_query_errors_end_poll() {
    let service = FakeTransformService::new();
    service.fail_next(ServiceOp::GetStatus, ServiceError::api("get status", 500, "boom"));

    let err = poller(&service, Duration::from_secs(1))
        .poll(&job(), DOWNLOAD_READY_STATUSES, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::Service(ServiceError::Api { status: 500, .. })));
}

#[tokio::test]
async fn pre_cancelled_token_makes_no_query() {
    let service = FakeTransformService::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = poller(&service, Duration::from_secs(1))
        .poll(&job(), DOWNLOAD_READY_STATUSES, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::Cancelled));
    assert_eq!(service.status_calls(), 0);
}

#[tokio::test]
async fn cancel_mid_wait_returns_within_interval() {
    let service = FakeTransformService::new();
    service.script_statuses([Transforming]);
    let cancel = CancellationToken::new();
    let poller = poller(&service, Duration::from_secs(3600));

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        poller.poll(&job(), DOWNLOAD_READY_STATUSES, &cancel),
    )
    .await
    .unwrap();

    assert!(matches!(result, Err(PollError::Cancelled)));
    assert_eq!(service.status_calls(), 1);
}
