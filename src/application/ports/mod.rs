//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod history_store;
pub mod notifier;
pub mod signal;

// Re-export common types
pub use clipboard::{ClipboardError, ClipboardReader, ClipboardWriter};
pub use config::ConfigStore;
pub use history_store::{CommitOutcome, HistoryRetention, HistoryStore, StorageError};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use signal::{ChangeCallback, ClipboardSignal, SignalError};
