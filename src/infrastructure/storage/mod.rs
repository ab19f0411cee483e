//! History storage adapters

mod paths;
pub mod sqlite;

pub use paths::default_database_path;
pub use sqlite::SqliteHistoryStore;
