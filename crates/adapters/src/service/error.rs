// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from transformation service operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Transport failures (timeouts, refused connections, truncated responses)
    #[error("network error during {operation}: {message}")]
    Network { operation: String, message: String },

    /// The service answered with a non-success status
    #[error("service error during {operation} (status {status}): {message}")]
    Api { operation: String, status: u16, message: String },

    /// The service rejected the call because of request rate
    #[error("request throttled during {operation}")]
    Throttled { operation: String },

    #[error("failed to parse response during {operation}: {message}")]
    Parse { operation: String, message: String },

    #[error("failed to build URL for {operation}: {message}")]
    InvalidUrl { operation: String, message: String },
}

impl ServiceError {
    /// Whether repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Network { .. } | ServiceError::Throttled { .. })
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self, ServiceError::Throttled { .. })
    }

    /// Short error class for telemetry and log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::Network { .. } => "network_error",
            ServiceError::Api { .. } => "api_error",
            ServiceError::Throttled { .. } => "throttled",
            ServiceError::Parse { .. } => "parse_error",
            ServiceError::InvalidUrl { .. } => "url_error",
        }
    }

    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Network { operation: operation.into(), message: message.into() }
    }

    pub fn api(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        ServiceError::Api { operation: operation.into(), status, message: message.into() }
    }

    pub fn throttled(operation: impl Into<String>) -> Self {
        ServiceError::Throttled { operation: operation.into() }
    }

    /// Classify a reqwest failure.
    pub fn from_reqwest(operation: impl Into<String>, source: reqwest::Error) -> Self {
        let operation = operation.into();
        if source.is_timeout() {
            return ServiceError::network(operation, "request timed out");
        }
        if source.is_connect() {
            return ServiceError::network(operation, format!("connection failed: {source}"));
        }
        if source.is_decode() {
            return ServiceError::Parse { operation, message: source.to_string() };
        }
        match source.status() {
            Some(status) if status.as_u16() == 429 => ServiceError::throttled(operation),
            Some(status) => ServiceError::api(operation, status.as_u16(), source.to_string()),
            None => ServiceError::network(operation, source.to_string()),
        }
    }
}
