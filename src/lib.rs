//! ClipTracker - clipboard history CLI
//!
//! This crate records every piece of text that lands on the system clipboard
//! into a local SQLite log, and lets the user list, inspect and re-copy past
//! entries.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Record ids, content hashing, payload encoding, preview elision, config
//! - **Application**: Use cases (history controller, retention) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (SQLite, clipboard-rs, arboard, notify-rust, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
