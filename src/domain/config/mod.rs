//! Configuration domain module

mod app_config;
mod options;

pub use app_config::{AppConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_POLL_INTERVAL_MS};
pub use options::{ClipboardBackend, WatcherKind};
