// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xform-engine: runs code transformation jobs against the remote service

pub mod archive;
pub mod config;
pub mod context;
pub mod env;
mod error;
pub mod history_store;
pub mod orchestrator;
pub mod plan;
pub mod poller;
pub mod transfer;
pub mod validation;

pub use archive::{ArchiveBuilder, ArchiveError};
pub use config::{service_config, ConfigError, OrchestratorConfig};
pub use context::{JobSnapshot, RunContext, RunHandle};
pub use error::{RunError, TransformError};
pub use history_store::{HistoryError, HistoryStore};
pub use orchestrator::{Orchestrator, OrchestratorDeps, RunOutcome, TransformRequest};
pub use plan::PlanError;
pub use poller::{JobPoller, PollError};
pub use transfer::{TransferClient, TransferError};
pub use validation::{discover_projects, validate_project, ValidationError};
