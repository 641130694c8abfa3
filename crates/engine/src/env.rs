// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Resolve state directory: XFORM_STATE_DIR > XDG_STATE_HOME/xform > ~/.local/state/xform
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = non_empty("XFORM_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("xform"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/xform"))
}

/// Directory for archives and plan documents (default: `$TMPDIR/xform`)
pub fn work_dir() -> PathBuf {
    non_empty("XFORM_WORK_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("xform"))
}

/// Transformation service endpoint URL
pub fn endpoint() -> Option<String> {
    non_empty("XFORM_ENDPOINT")
}

/// Bearer token for the transformation service
pub fn auth_token() -> Option<String> {
    non_empty("XFORM_AUTH_TOKEN")
}

/// KMS key used to encrypt uploaded archives at rest
pub fn kms_key_arn() -> Option<String> {
    non_empty("XFORM_KMS_KEY_ARN")
}

/// Status poll interval (default 5s)
pub fn poll_interval() -> Duration {
    millis("XFORM_POLL_INTERVAL_MS").unwrap_or(Duration::from_secs(5))
}

/// Pause after upload and after start (default 2s)
pub fn throttle_delay() -> Duration {
    millis("XFORM_THROTTLE_DELAY_MS").unwrap_or(Duration::from_secs(2))
}

/// Snapshot refresh interval (default 1s)
pub fn refresh_interval() -> Duration {
    millis("XFORM_REFRESH_MS").unwrap_or(Duration::from_secs(1))
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn millis(key: &str) -> Option<Duration> {
    std::env::var(key).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
