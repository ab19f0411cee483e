//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::options::{ClipboardBackend, WatcherKind};

/// Default number of entries shown by `list`
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

/// Default polling interval for the polling watcher
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub history_limit: Option<usize>,
    /// Retention in days; 0 disables expiry
    pub expiration_days: Option<u32>,
    pub watcher: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub clipboard_backend: Option<String>,
    pub notify: Option<bool>,
    pub database_path: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            expiration_days: Some(0),
            watcher: Some(WatcherKind::default().to_string()),
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            clipboard_backend: Some(ClipboardBackend::default().to_string()),
            notify: Some(true),
            database_path: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            history_limit: other.history_limit.or(self.history_limit),
            expiration_days: other.expiration_days.or(self.expiration_days),
            watcher: other.watcher.or(self.watcher),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            clipboard_backend: other.clipboard_backend.or(self.clipboard_backend),
            notify: other.notify.or(self.notify),
            database_path: other.database_path.or(self.database_path),
        }
    }

    /// Get history limit, or default if not set or zero
    pub fn history_limit_or_default(&self) -> usize {
        self.history_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Get retention in days, or 0 (disabled) if not set
    pub fn expiration_days_or_default(&self) -> u32 {
        self.expiration_days.unwrap_or(0)
    }

    /// Get watcher kind, or default if not set/invalid
    pub fn watcher_or_default(&self) -> WatcherKind {
        self.watcher
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get polling interval, or default if not set or zero
    pub fn poll_interval_or_default(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    /// Get clipboard backend, or default if not set/invalid
    pub fn clipboard_backend_or_default(&self) -> ClipboardBackend {
        self.clipboard_backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Get the configured database path, if any
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database_path
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }
}
