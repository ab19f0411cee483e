//! History storage port interfaces

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::history::{ContentHash, ContentType, HistoryRecord, RecordId};

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Failed to initialize history storage: {0}")]
    Init(String),

    #[error("Failed to write history entry: {0}")]
    Write(String),

    #[error("Failed to read history: {0}")]
    Read(String),

    #[error("Failed to close history storage: {0}")]
    Close(String),
}

/// What a commit did with the captured text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Same content as the last commit; storage was not touched
    Skipped,
    /// Content already stored; its capture time was refreshed
    Refreshed(RecordId),
    /// New content; a record was inserted
    Inserted(RecordId),
}

/// Port for the dedup-aware history log.
///
/// Implementations serialize all access internally, so a shared reference is
/// enough to commit.
pub trait HistoryStore: Send + Sync {
    /// Record a capture: skip, refresh, or insert.
    ///
    /// On error the in-memory last-seen hash is left unchanged so the same
    /// content is retried on the next notification.
    fn commit(&self, text: &str) -> Result<CommitOutcome, StorageError>;

    /// Deliver up to `limit` records, most recent first (ties by id, newest
    /// first). Rows that cannot be read are skipped.
    fn fetch_recent(
        &self,
        limit: usize,
        per_item: &mut dyn FnMut(RecordId, ContentType, &[u8]),
    ) -> Result<(), StorageError>;

    /// Look up one record. A missing id is `Ok(None)`, not an error.
    fn fetch_by_id(&self, id: RecordId) -> Result<Option<HistoryRecord>, StorageError>;

    /// Number of stored records
    fn count(&self) -> Result<usize, StorageError>;

    /// Hash of the most recently committed content, if known
    fn last_seen_hash(&self) -> Option<ContentHash>;

    /// Release the storage handle
    fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}

/// Port used by the retention sweeper to expire old records
pub trait HistoryRetention: Send + Sync {
    /// Delete records captured strictly before `cutoff`; returns how many
    fn remove_captured_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError>;
}
