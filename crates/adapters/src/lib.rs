// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! xform-adapters: boundaries to the collaborators of a transformation run

pub mod dependencies;
pub mod notify;
pub mod service;
pub mod telemetry;

pub use dependencies::{CopyCachePreparer, DependencyError, DependencyFolder, DependencyPreparer};
pub use notify::{DesktopNotifyAdapter, LogNotifyAdapter, NotifyAdapter, NotifyError};
pub use service::{
    HttpTransformService, JobStatusReport, PlanStep, ServiceConfig, ServiceError, StartRequest,
    TransformService, TransformationPlan, UploadDestination, UploadHeaders,
};
pub use telemetry::{TelemetryAdapter, TelemetryError, TelemetryEvent, TracingTelemetry};

#[cfg(any(test, feature = "test-support"))]
pub use dependencies::FakeDependencyPreparer;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use service::{FakeTransformService, ServiceCall, ServiceOp};
#[cfg(any(test, feature = "test-support"))]
pub use telemetry::FakeTelemetryAdapter;
