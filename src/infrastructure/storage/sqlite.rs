//! SQLite-backed history store

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use crate::application::ports::{CommitOutcome, HistoryRetention, HistoryStore, StorageError};
use crate::domain::history::{encode_payload, ContentHash, ContentType, HistoryRecord, RecordId};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    type        TEXT    NOT NULL,
    payload     BLOB,
    hash        TEXT    NOT NULL,
    captured_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_history_hash ON history (hash);
CREATE INDEX IF NOT EXISTS idx_history_captured_at ON history (captured_at);
";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection plus the in-memory dedup state, guarded together
struct StoreState {
    conn: Connection,
    last_seen: Option<ContentHash>,
    /// Largest `captured_at` handed out, in Unix microseconds
    last_stamp: i64,
}

/// History store persisted in a single SQLite table.
///
/// Every operation takes the same lock, so the lookup-then-write in
/// [`HistoryStore::commit`] cannot interleave with another commit from this
/// process.
pub struct SqliteHistoryStore {
    state: Mutex<StoreState>,
    path: Option<PathBuf>,
}

impl SqliteHistoryStore {
    /// Open the database at `path`, creating it (and its parent directory)
    /// when `create_if_missing` is set.
    pub fn open(path: impl AsRef<Path>, create_if_missing: bool) -> Result<Self, StorageError> {
        let path = path.as_ref();

        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if create_if_missing {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Init(format!("creating {}: {}", parent.display(), e))
                })?;
            }
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        } else if !path.exists() {
            return Err(StorageError::Init(format!(
                "no history database at {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| StorageError::Init(format!("opening {}: {}", path.display(), e)))?;

        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(|e| StorageError::Init(e.to_string()))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StorageError::Init(e.to_string()))?;

        let store = Self::init(conn, Some(path.to_path_buf()))?;
        debug!(path = %path.display(), "history database opened");
        Ok(store)
    }

    /// Ephemeral store, used by tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Init(e.to_string()))?;
        Self::init(conn, None)
    }

    /// Location of the database file; `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| StorageError::Init(format!("creating schema: {}", e)))?;

        let last_seen = conn
            .query_row(
                "SELECT hash FROM history ORDER BY captured_at DESC, id DESC LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| StorageError::Init(format!("loading last capture: {}", e)))?
            .map(ContentHash::from_stored);

        let last_stamp = conn
            .query_row("SELECT COALESCE(MAX(captured_at), 0) FROM history", [], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(|e| StorageError::Init(format!("loading last capture: {}", e)))?;

        Ok(Self {
            state: Mutex::new(StoreState {
                conn,
                last_seen,
                last_stamp,
            }),
            path,
        })
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Strictly increasing capture time, so recency order never ties on
    /// coarse clocks
    fn next_stamp(last_stamp: i64) -> i64 {
        Utc::now().timestamp_micros().max(last_stamp.saturating_add(1))
    }

    fn write_capture(
        conn: &mut Connection,
        text: &str,
        hash: &ContentHash,
        stamp: i64,
    ) -> rusqlite::Result<CommitOutcome> {
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM history WHERE hash = ?1 ORDER BY id LIMIT 1",
                params![hash.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE history SET captured_at = ?1 WHERE id = ?2",
                    params![stamp, id],
                )?;
                CommitOutcome::Refreshed(RecordId::new(id))
            }
            None => {
                tx.execute(
                    "INSERT INTO history (type, payload, hash, captured_at) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        ContentType::PlainText.as_str(),
                        encode_payload(text),
                        hash.as_str(),
                        stamp
                    ],
                )?;
                CommitOutcome::Inserted(RecordId::new(tx.last_insert_rowid()))
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    fn record_from_row(
        id: i64,
        content_type: &str,
        payload: Option<Vec<u8>>,
        hash: String,
        captured_at: i64,
    ) -> Result<HistoryRecord, StorageError> {
        let content_type = content_type
            .parse::<ContentType>()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        let captured_at = Utc.timestamp_micros(captured_at).single().ok_or_else(|| {
            StorageError::Read(format!("capture time out of range: {}", captured_at))
        })?;

        Ok(HistoryRecord {
            id: RecordId::new(id),
            content_type,
            payload: payload.unwrap_or_default(),
            hash: ContentHash::from_stored(hash),
            captured_at,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn commit(&self, text: &str) -> Result<CommitOutcome, StorageError> {
        let hash = ContentHash::of_text(text);

        let mut guard = self.lock();
        let state = &mut *guard;
        if state.last_seen.as_ref() == Some(&hash) {
            return Ok(CommitOutcome::Skipped);
        }

        let stamp = Self::next_stamp(state.last_stamp);
        let outcome = Self::write_capture(&mut state.conn, text, &hash, stamp)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        state.last_seen = Some(hash);
        state.last_stamp = stamp;
        Ok(outcome)
    }

    fn fetch_recent(
        &self,
        limit: usize,
        per_item: &mut dyn FnMut(RecordId, ContentType, &[u8]),
    ) -> Result<(), StorageError> {
        let rows = {
            let state = self.lock();
            let mut stmt = state
                .conn
                .prepare(
                    "SELECT id, type, payload FROM history
                     ORDER BY captured_at DESC, id DESC LIMIT ?1",
                )
                .map_err(|e| StorageError::Read(e.to_string()))?;

            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let rows = stmt
                .query_map(params![limit], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<Vec<u8>>>(2)?,
                    ))
                })
                .map_err(|e| StorageError::Read(e.to_string()))?
                .collect::<Vec<_>>();
            rows
        };

        for row in rows {
            let (id, content_type, payload) = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable history row");
                    continue;
                }
            };
            match content_type.parse::<ContentType>() {
                Ok(content_type) => per_item(
                    RecordId::new(id),
                    content_type,
                    payload.as_deref().unwrap_or_default(),
                ),
                Err(e) => warn!(id, error = %e, "skipping history row"),
            }
        }
        Ok(())
    }

    fn fetch_by_id(&self, id: RecordId) -> Result<Option<HistoryRecord>, StorageError> {
        let state = self.lock();
        let row = state
            .conn
            .query_row(
                "SELECT id, type, payload, hash, captured_at FROM history WHERE id = ?1",
                params![id.get()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<Vec<u8>>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        drop(state);

        row.map(|(id, content_type, payload, hash, captured_at)| {
            Self::record_from_row(id, &content_type, payload, hash, captured_at)
        })
        .transpose()
    }

    fn count(&self) -> Result<usize, StorageError> {
        let state = self.lock();
        let count: i64 = state
            .conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn last_seen_hash(&self) -> Option<ContentHash> {
        self.lock().last_seen.clone()
    }

    fn close(self) -> Result<(), StorageError> {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        state
            .conn
            .close()
            .map_err(|(_, e)| StorageError::Close(e.to_string()))
    }
}

impl HistoryRetention for SqliteHistoryStore {
    fn remove_captured_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let removed = state
            .conn
            .execute(
                "DELETE FROM history WHERE captured_at < ?1",
                params![cutoff.timestamp_micros()],
            )
            .map_err(|e| StorageError::Write(e.to_string()))?;

        // Forget the last-seen hash once its row is gone, so the same text
        // captured again is stored again.
        if removed > 0 {
            if let Some(hash) = &state.last_seen {
                let still_stored: bool = state
                    .conn
                    .query_row(
                        "SELECT EXISTS(SELECT 1 FROM history WHERE hash = ?1)",
                        params![hash.as_str()],
                        |row| row.get(0),
                    )
                    .map_err(|e| StorageError::Read(e.to_string()))?;
                if !still_stored {
                    state.last_seen = None;
                }
            }
        }

        Ok(removed)
    }
}
