//! Clipboard port interfaces

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Please install wl-clipboard.")]
    ToolNotFound(&'static str),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for reading the current clipboard text
#[async_trait]
pub trait ClipboardReader: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// # Returns
    /// `Ok(None)` when the clipboard holds no text (empty, or a non-text
    /// format such as an image)
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;
}

/// Port for placing text back on the clipboard
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Copy text to the system clipboard.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[async_trait]
impl<T: ClipboardReader + ?Sized> ClipboardReader for Box<T> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }
}

#[async_trait]
impl<T: ClipboardReader + ?Sized> ClipboardReader for Arc<T> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }
}

#[async_trait]
impl<T: ClipboardWriter + ?Sized> ClipboardWriter for Box<T> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }
}
