// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator and service configuration.

use crate::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use xform_adapters::ServiceConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set XFORM_STATE_DIR)")]
    NoStateDir,
    #[error("no transformation service endpoint configured (set XFORM_ENDPOINT or pass --endpoint)")]
    MissingEndpoint,
    #[error("invalid endpoint '{value}': {message}")]
    InvalidEndpoint { value: String, message: String },
}

/// Timing and storage settings for a run.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Pause between status queries
    pub poll_interval: Duration,
    /// Pause after upload and after start
    pub throttle_delay: Duration,
    /// Period of the snapshot refresh timer
    pub refresh_interval: Duration,
    /// Empty means no server-side encryption key
    pub kms_key_arn: String,
    /// Where archives and plan documents are written
    pub work_dir: PathBuf,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            throttle_delay: Duration::from_secs(2),
            refresh_interval: Duration::from_secs(1),
            kms_key_arn: String::new(),
            work_dir: std::env::temp_dir().join("xform"),
        }
    }
}

impl OrchestratorConfig {
    pub fn from_env() -> Self {
        Self {
            poll_interval: env::poll_interval(),
            throttle_delay: env::throttle_delay(),
            refresh_interval: env::refresh_interval(),
            kms_key_arn: env::kms_key_arn().unwrap_or_default(),
            work_dir: env::work_dir(),
        }
    }

    xform_core::setters! {
        into { kms_key_arn: String, work_dir: PathBuf }
        set { poll_interval: Duration, throttle_delay: Duration, refresh_interval: Duration }
    }
}

/// Build the service configuration from an explicit endpoint or the environment.
pub fn service_config(endpoint: Option<&str>) -> Result<ServiceConfig, ConfigError> {
    let raw = match endpoint {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => env::endpoint().ok_or(ConfigError::MissingEndpoint)?,
    };
    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint {
        value: raw.clone(),
        message: e.to_string(),
    })?;
    let config = ServiceConfig::new(url);
    Ok(match env::auth_token() {
        Some(token) => config.auth_token(token),
        None => config,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
