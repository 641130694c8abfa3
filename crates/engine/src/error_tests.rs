// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn cancelled_poll_becomes_cancelled_run() {
    let err: RunError = PollError::Cancelled.into();
    assert!(err.is_cancelled());
}

#[test]
fn failed_poll_keeps_reason_for_user() {
    let err: RunError = PollError::JobFailed {
        status: TransformationStatus::Failed,
        reason: Some("unsupported build plugin".into()),
    }
    .into();

    assert_eq!(err.user_message(), "The transformation job failed: unsupported build plugin");
    assert_eq!(err.error_type(), "poll");
}

#[parameterized(
    start = { RunError::JobStart(ServiceError::api("start", 400, "bad upload")) },
    not_successful = { RunError::JobNotSuccessful(TransformationStatus::Failed) },
    poll_service = { RunError::Poll(PollError::Service(ServiceError::network("poll", "reset"))) },
)]
fn user_message_hides_internal_cause(err: RunError) {
    let internal = err.to_string();
    let user = err.user_message();
    assert_ne!(internal, user);
    assert!(!user.contains("bad upload"));
    assert!(!user.contains("reset"));
}
