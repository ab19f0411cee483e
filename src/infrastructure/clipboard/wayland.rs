//! Wayland clipboard adapter using wl-paste / wl-copy

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{ClipboardError, ClipboardReader, ClipboardWriter};

/// Wayland clipboard adapter using wl-clipboard tools
pub struct WaylandClipboard;

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(tool: &'static str, e: std::io::Error) -> ClipboardError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ClipboardError::ToolNotFound(tool)
    } else {
        ClipboardError::ClipboardUnavailable(e.to_string())
    }
}

#[async_trait]
impl ClipboardReader for WaylandClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let output = Command::new("wl-paste")
            .args(["--no-newline", "--type", "text/plain"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error("wl-paste", e))?;

        Ok(selection_text(output.status.success(), output.stdout))
    }
}

/// Text of a `wl-paste` selection, or `None` when there is nothing to record.
///
/// wl-paste exits non-zero when the selection is empty or offers no text.
/// Bytes that are not UTF-8 are treated the same as no text.
fn selection_text(succeeded: bool, stdout: Vec<u8>) -> Option<String> {
    if !succeeded || stdout.is_empty() {
        return None;
    }

    match String::from_utf8(stdout) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(error = %e, "clipboard selection is not UTF-8 text, ignoring");
            None
        }
    }
}

#[async_trait]
impl ClipboardWriter for WaylandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new("wl-copy")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("wl-copy", e))?;

        // Write text to stdin
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        // Wait for process to complete
        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_text_passes_utf8_through() {
        assert_eq!(
            selection_text(true, "héllo\n".as_bytes().to_vec()),
            Some("héllo\n".to_string())
        );
    }

    #[test]
    fn empty_or_failed_selection_is_no_text() {
        assert_eq!(selection_text(true, Vec::new()), None);
        assert_eq!(selection_text(false, b"stale".to_vec()), None);
    }

    #[test]
    fn non_utf8_selection_is_no_text() {
        assert_eq!(selection_text(true, vec![0xff, 0xfe, 0x00, 0xd8]), None);
    }
}
