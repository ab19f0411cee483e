//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod history;

// Re-export common types
pub use config::{AppConfig, ClipboardBackend, WatcherKind};
pub use error::*;
pub use history::{ContentHash, ContentType, HistoryRecord, RecordId};
