// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xform-core: data model for the code transformation orchestrator

pub mod macros;

pub mod clock;
pub mod history;
pub mod id;
pub mod project;
pub mod status;
pub mod step;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use history::{RunHistory, RunHistoryEntry};
pub use id::{short, JobId, UploadId};
pub use project::{CandidateProject, JavaVersion, UnknownJavaVersion};
pub use status::{
    JobStatus, TransformationStatus, DOWNLOAD_READY_STATUSES, FAILURE_STATUSES,
    PLAN_READY_STATUSES,
};
pub use step::{StepName, StepProgress, StepState};
pub use time_fmt::{format_datetime, format_duration_ms, format_timestamp};
