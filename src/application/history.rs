//! Clipboard history use case
//!
//! Wires a change signal to the history store: every notification re-reads the
//! clipboard and commits whatever text is there. Also serves the read side
//! (elided listing, full-text lookup for copy-back).

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::error::PayloadDecodeError;
use crate::domain::history::{decode_payload, elide, RecordId};

use super::ports::{
    ChangeCallback, ClipboardError, ClipboardReader, ClipboardSignal, CommitOutcome,
    HistoryStore, SignalError, StorageError,
};

/// Errors from the history use case
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("No history entry with id {0}")]
    NotFound(RecordId),

    #[error("History entry {id} is unreadable: {source}")]
    Corrupt {
        id: RecordId,
        #[source]
        source: PayloadDecodeError,
    },
}

/// Result of handling one change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Clipboard held no text; storage untouched
    NoText,
    /// Text was handed to the store
    Committed(CommitOutcome),
}

/// Owns the store and the active change signal
pub struct HistoryController<S, R>
where
    S: HistoryStore,
    R: ClipboardReader,
{
    store: S,
    reader: R,
    signal: Option<Box<dyn ClipboardSignal>>,
}

impl<S, R> HistoryController<S, R>
where
    S: HistoryStore,
    R: ClipboardReader,
{
    /// Create a controller over an opened store. No signal is attached yet.
    pub fn new(store: S, reader: R) -> Self {
        Self {
            store,
            reader,
            signal: None,
        }
    }

    /// Start `signal` and keep it for teardown.
    ///
    /// On failure the signal is dropped and the error returned, so the caller
    /// can try another signal source.
    pub fn start(
        &mut self,
        mut signal: Box<dyn ClipboardSignal>,
        on_change: ChangeCallback,
    ) -> Result<(), HistoryError> {
        if self.signal.as_ref().is_some_and(|s| s.is_active()) {
            return Err(SignalError::AlreadyActive.into());
        }

        signal.start(on_change)?;
        debug!(watcher = signal.name(), "clipboard watcher started");
        self.signal = Some(signal);
        Ok(())
    }

    /// Name of the attached signal source, if any
    pub fn signal_name(&self) -> Option<&'static str> {
        self.signal.as_ref().map(|s| s.name())
    }

    /// Read the clipboard and commit its text, if any.
    pub async fn handle_change(&self) -> Result<CaptureOutcome, HistoryError> {
        let Some(text) = self.reader.read_text().await? else {
            debug!("clipboard change without text, ignoring");
            return Ok(CaptureOutcome::NoText);
        };

        let outcome = self.store.commit(&text)?;
        match outcome {
            CommitOutcome::Skipped => debug!("duplicate of last capture, skipped"),
            CommitOutcome::Refreshed(id) => debug!(%id, "existing entry refreshed"),
            CommitOutcome::Inserted(id) => debug!(%id, "new entry stored"),
        }
        Ok(CaptureOutcome::Committed(outcome))
    }

    /// Deliver up to `limit` recent entries as `(id, elided text)`, most
    /// recent first. Returns how many were delivered.
    pub fn list_recent<F>(&self, limit: usize, mut per_item: F) -> Result<usize, HistoryError>
    where
        F: FnMut(RecordId, &str),
    {
        let mut delivered = 0;
        self.store.fetch_recent(limit, &mut |id, _content_type, payload| {
            match decode_payload(payload) {
                Ok(text) => {
                    per_item(id, &elide(&text));
                    delivered += 1;
                }
                Err(e) => warn!(%id, error = %e, "skipping undecodable history entry"),
            }
        })?;
        Ok(delivered)
    }

    /// Full, untruncated text of one entry.
    pub fn resolve_for_copy(&self, id: RecordId) -> Result<String, HistoryError> {
        let record = self
            .store
            .fetch_by_id(id)?
            .ok_or(HistoryError::NotFound(id))?;

        record
            .text()
            .map_err(|source| HistoryError::Corrupt { id, source })
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stop the signal, then close the store.
    pub fn shutdown(mut self) -> Result<(), HistoryError> {
        if let Some(mut signal) = self.signal.take() {
            signal.stop();
            debug!(watcher = signal.name(), "clipboard watcher stopped");
        }
        self.store.close()?;
        Ok(())
    }
}
