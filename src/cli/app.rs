//! Shared wiring for CLI commands

use std::path::PathBuf;

use crate::application::ports::{ConfigStore, StorageError};
use crate::domain::config::AppConfig;
use crate::infrastructure::{default_database_path, SqliteHistoryStore, XdgConfigStore};

/// Exit codes. Usage errors exit with 2 from clap itself.
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load and merge configuration from file and CLI.
///
/// `CLIP_TRACKER_DB` arrives through the `--db` flag, so clap already
/// resolves flag over environment before this merge.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let file_config = XdgConfigStore::new().load_or_empty().await;

    // Merge: defaults < file < env/cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Database file the config points at
pub fn database_path(config: &AppConfig) -> PathBuf {
    config.database_path().unwrap_or_else(default_database_path)
}

/// Open the history database, creating it on first use
pub fn open_store(config: &AppConfig) -> Result<SqliteHistoryStore, StorageError> {
    SqliteHistoryStore::open(database_path(config), true)
}

/// Open the history database only if it already exists
pub fn open_existing_store(config: &AppConfig) -> Result<Option<SqliteHistoryStore>, StorageError> {
    let path = database_path(config);
    if !path.exists() {
        return Ok(None);
    }
    SqliteHistoryStore::open(path, false).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_path_wins_over_default() {
        let config = AppConfig {
            database_path: Some("/tmp/custom.db".to_string()),
            ..AppConfig::defaults()
        };
        assert_eq!(database_path(&config), PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn default_path_when_unset() {
        assert_eq!(database_path(&AppConfig::defaults()), default_database_path());
    }

    #[test]
    fn open_existing_store_skips_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: Some(dir.path().join("absent.db").display().to_string()),
            ..AppConfig::defaults()
        };

        assert!(open_existing_store(&config).unwrap().is_none());
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn open_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("storage.db");
        let config = AppConfig {
            database_path: Some(path.display().to_string()),
            ..AppConfig::defaults()
        };

        let store = open_store(&config).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        assert!(path.exists());
    }
}
