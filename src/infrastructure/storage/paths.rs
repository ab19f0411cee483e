//! Default history database location

use std::path::PathBuf;

const APP_DIR: &str = "clip-tracker";
const DB_FILE: &str = "storage.db";

/// `<data-dir>/clip-tracker/storage.db`, falling back to the working
/// directory when the platform has no data dir.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DB_FILE)
}
