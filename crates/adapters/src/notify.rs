// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Adapter for the user-facing terminal notification of a run
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a notification with a title and message body
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS the first notification looks up a bundle identifier through
/// AppleScript, which hangs in processes without Automation permissions.
/// The identifier is pre-set at construction to skip that lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // show() blocks on some platforms
        let shown = tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .summary(&title)
                .body(&message)
                .show()
                .map(|_| ())
                .map_err(|e| NotifyError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?;
        shown?;
        tracing::debug!("desktop notification sent");
        Ok(())
    }
}

/// Notification adapter that writes to the log only.
///
/// Used by headless hosts where no desktop session is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifyAdapter;

#[async_trait]
impl NotifyAdapter for LogNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(%title, %message, "notification");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded notification
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct NotifyCall {
        pub title: String,
        pub message: String,
    }

    #[derive(Default)]
    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
        fail: bool,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every send fail after recording the call.
        pub fn failing() -> Self {
            let fake = Self::default();
            fake.inner.lock().fail = true;
            fake
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            let mut inner = self.inner.lock();
            inner.calls.push(NotifyCall { title: title.to_string(), message: message.to_string() });
            if inner.fail {
                return Err(NotifyError::SendFailed("notifications unavailable".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
