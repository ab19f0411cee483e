//! History store integration tests against an on-disk database

use std::sync::{Arc, Mutex};
use std::thread;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use clip_tracker::application::ports::{
    ClipboardError, ClipboardReader, CommitOutcome, HistoryStore,
};
use clip_tracker::application::{CaptureOutcome, HistoryController, HistoryError, RetentionSweeper};
use clip_tracker::domain::history::{ContentHash, RecordId};
use clip_tracker::infrastructure::SqliteHistoryStore;

/// Clipboard that hands out queued values, one per read
struct ScriptedClipboard(Mutex<Vec<Option<String>>>);

impl ScriptedClipboard {
    fn new(values: &[Option<&str>]) -> Self {
        Self(Mutex::new(
            values.iter().rev().map(|v| v.map(str::to_string)).collect(),
        ))
    }
}

#[async_trait]
impl ClipboardReader for ScriptedClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self.0.lock().unwrap().pop().flatten())
    }
}

fn listed<R: ClipboardReader>(controller: &HistoryController<SqliteHistoryStore, R>) -> Vec<String> {
    let mut texts = Vec::new();
    controller
        .list_recent(100, |_, text| texts.push(text.to_string()))
        .unwrap();
    texts
}

#[tokio::test]
async fn captures_flow_through_to_listing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteHistoryStore::open(dir.path().join("h.db"), true).unwrap();
    let reader = ScriptedClipboard::new(&[Some("alpha"), Some("alpha"), None, Some("beta"), Some("alpha")]);
    let controller = HistoryController::new(store, reader);

    let mut outcomes = Vec::new();
    for _ in 0..5 {
        outcomes.push(controller.handle_change().await.unwrap());
    }

    assert_eq!(
        outcomes,
        vec![
            CaptureOutcome::Committed(CommitOutcome::Inserted(RecordId::new(1))),
            CaptureOutcome::Committed(CommitOutcome::Skipped),
            CaptureOutcome::NoText,
            CaptureOutcome::Committed(CommitOutcome::Inserted(RecordId::new(2))),
            CaptureOutcome::Committed(CommitOutcome::Refreshed(RecordId::new(1))),
        ]
    );
    assert_eq!(listed(&controller), vec!["alpha", "beta"]);
    assert_eq!(controller.store().count().unwrap(), 2);

    controller.shutdown().unwrap();
}

#[test]
fn last_capture_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.db");

    let store = SqliteHistoryStore::open(&path, true).unwrap();
    store.commit("one").unwrap();
    store.commit("two").unwrap();
    store.close().unwrap();

    let store = SqliteHistoryStore::open(&path, false).unwrap();
    assert_eq!(store.last_seen_hash(), Some(ContentHash::of_text("two")));
    assert_eq!(store.commit("two").unwrap(), CommitOutcome::Skipped);
    assert_eq!(
        store.commit("one").unwrap(),
        CommitOutcome::Refreshed(RecordId::new(1))
    );
    assert_eq!(
        store.commit("three").unwrap(),
        CommitOutcome::Inserted(RecordId::new(3))
    );
    store.close().unwrap();
}

#[test]
fn recency_after_reopen_stays_ahead_of_old_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.db");

    let store = SqliteHistoryStore::open(&path, true).unwrap();
    for text in ["a", "b", "c"] {
        store.commit(text).unwrap();
    }
    store.close().unwrap();

    let store = SqliteHistoryStore::open(&path, false).unwrap();
    store.commit("a").unwrap();

    let mut ids = Vec::new();
    store
        .fetch_recent(10, &mut |id, _, _| ids.push(id.get()))
        .unwrap();
    assert_eq!(ids, vec![1, 3, 2]);
    store.close().unwrap();
}

#[test]
fn resolve_missing_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteHistoryStore::open(dir.path().join("h.db"), true).unwrap();
    store.commit("present").unwrap();
    let controller = HistoryController::new(store, ScriptedClipboard::new(&[]));

    assert_eq!(controller.resolve_for_copy(RecordId::new(1)).unwrap(), "present");
    assert!(matches!(
        controller.resolve_for_copy(RecordId::new(9)),
        Err(HistoryError::NotFound(id)) if id == RecordId::new(9)
    ));

    controller.shutdown().unwrap();
}

#[test]
fn sweep_removes_entries_past_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteHistoryStore::open(dir.path().join("h.db"), true).unwrap();
    store.commit("old news").unwrap();
    store.commit("older news").unwrap();

    let sweeper = RetentionSweeper::new(1);
    assert_eq!(sweeper.sweep(&store, Utc::now()).unwrap(), 0);
    assert_eq!(store.count().unwrap(), 2);

    let later = Utc::now() + Duration::days(2);
    assert_eq!(sweeper.sweep(&store, later).unwrap(), 2);
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.last_seen_hash(), None);

    // Content removed by expiry is new again
    assert_eq!(
        store.commit("older news").unwrap(),
        CommitOutcome::Inserted(RecordId::new(3))
    );
    store.close().unwrap();
}

#[test]
fn concurrent_commits_store_each_text_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteHistoryStore::open(dir.path().join("h.db"), true).unwrap());

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let text = if (worker + i) % 2 == 0 { "same" } else { "other" };
                    store.commit(text).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 2);

    let mut ids = Vec::new();
    store
        .fetch_recent(10, &mut |id, _, _| ids.push(id.get()))
        .unwrap();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let store = Arc::try_unwrap(store).ok().unwrap();
    store.close().unwrap();
}
