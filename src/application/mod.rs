//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod history;
pub mod ports;
pub mod retention;

// Re-export use cases
pub use history::{CaptureOutcome, HistoryController, HistoryError};
pub use retention::RetentionSweeper;
