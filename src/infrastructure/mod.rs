//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like SQLite, the OS clipboard, etc.

pub mod clipboard;
pub mod config;
pub mod notification;
pub mod storage;
pub mod watcher;

// Re-export adapters
pub use clipboard::{create_reader, create_writer, ArboardClipboard, WaylandClipboard};
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use storage::{default_database_path, SqliteHistoryStore};
pub use watcher::{create_signal, NativeWatcher, PollingWatcher};
