//! Clipboard-change signal port

use std::sync::Arc;

use thiserror::Error;

/// Clipboard signal errors
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    #[error("Failed to register for clipboard notifications: {0}")]
    Registration(String),

    #[error("Clipboard watcher is already running")]
    AlreadyActive,
}

/// Zero-argument change notification.
///
/// Carries no payload: the receiver re-reads the clipboard itself, since the
/// content may have changed again between notification and read.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Port for a source of clipboard-change notifications
pub trait ClipboardSignal: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Register for notifications; `on_change` fires once per reported change.
    fn start(&mut self, on_change: ChangeCallback) -> Result<(), SignalError>;

    /// Unregister. Idempotent, and safe when `start` never succeeded.
    fn stop(&mut self);

    /// Whether notifications are currently registered
    fn is_active(&self) -> bool;
}

impl ClipboardSignal for Box<dyn ClipboardSignal> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    fn start(&mut self, on_change: ChangeCallback) -> Result<(), SignalError> {
        self.as_mut().start(on_change)
    }

    fn stop(&mut self) {
        self.as_mut().stop()
    }

    fn is_active(&self) -> bool {
        self.as_ref().is_active()
    }
}
