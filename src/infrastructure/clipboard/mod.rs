//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary)
//! or the wl-clipboard tools on Wayland sessions.

mod arboard;
mod wayland;

use std::sync::Arc;

pub use arboard::ArboardClipboard;
pub use wayland::WaylandClipboard;

use crate::application::ports::{ClipboardReader, ClipboardWriter};
use crate::domain::config::ClipboardBackend;

/// Create the clipboard reader for the configured backend
pub fn create_reader(backend: ClipboardBackend) -> Arc<dyn ClipboardReader> {
    match backend {
        ClipboardBackend::Arboard => Arc::new(ArboardClipboard::new()),
        ClipboardBackend::Wayland => Arc::new(WaylandClipboard::new()),
    }
}

/// Create the clipboard writer for the configured backend
pub fn create_writer(backend: ClipboardBackend) -> Box<dyn ClipboardWriter> {
    match backend {
        ClipboardBackend::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardBackend::Wayland => Box::new(WaylandClipboard::new()),
    }
}
