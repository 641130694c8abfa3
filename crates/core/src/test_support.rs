// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{JobId, JobStatus, RunHistoryEntry};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::status::TransformationStatus;
    use proptest::prelude::*;

    /// Any status the server is known to report.
    pub fn arb_known_transformation_status() -> impl Strategy<Value = TransformationStatus> {
        prop::sample::select(vec![
            TransformationStatus::Created,
            TransformationStatus::Accepted,
            TransformationStatus::Rejected,
            TransformationStatus::Started,
            TransformationStatus::Preparing,
            TransformationStatus::Prepared,
            TransformationStatus::Planning,
            TransformationStatus::Planned,
            TransformationStatus::Transforming,
            TransformationStatus::Transformed,
            TransformationStatus::PartiallyCompleted,
            TransformationStatus::Completed,
            TransformationStatus::Failed,
            TransformationStatus::Stopping,
            TransformationStatus::Stopped,
        ])
    }

    /// A KMS key ARN, or the empty string for "no key".
    pub fn arb_kms_key_arn() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "arn:aws:kms:[a-z]{2}-[a-z]{4,9}-[1-3]:[0-9]{12}:key/[a-f0-9-]{36}",
        ]
    }
}

// ── Factories ───────────────────────────────────────────────────────────

pub fn history_entry(module: &str, status: JobStatus, job_id: &str) -> RunHistoryEntry {
    RunHistoryEntry {
        timestamp_ms: 1_000_000,
        module: module.to_string(),
        status,
        duration_ms: 10_000,
        id: JobId::new(job_id),
    }
}
