//! Shared helpers for binary tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use clip_tracker::application::ports::HistoryStore;
use clip_tracker::infrastructure::SqliteHistoryStore;

/// Isolated home: config, data and runtime dirs all live in a temp dir
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("history.db")
    }

    /// The binary with every user directory pointed into the sandbox
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("clip-tracker").unwrap();
        cmd.env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_RUNTIME_DIR", self.path().join("run"))
            .env_remove("CLIP_TRACKER_DB")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Seed the sandbox database with entries, oldest first
    pub fn seed(&self, entries: &[&str]) {
        let store = SqliteHistoryStore::open(self.db_path(), true).unwrap();
        for entry in entries {
            store.commit(entry).unwrap();
        }
        store.close().unwrap();
    }
}
