//! History subcommand handlers

use std::process::ExitCode;

use chrono::Utc;

use crate::application::ports::{ClipboardReader, ClipboardWriter, CommitOutcome, HistoryStore};
use crate::application::{CaptureOutcome, HistoryController, HistoryError, RetentionSweeper};
use crate::domain::config::AppConfig;
use crate::domain::history::RecordId;
use crate::infrastructure::{create_reader, create_writer, SqliteHistoryStore};

use super::app::{database_path, open_existing_store, open_store, EXIT_ERROR};
use super::pid_file::PidFile;
use super::presenter::Presenter;

type Controller = HistoryController<SqliteHistoryStore, std::sync::Arc<dyn ClipboardReader>>;

fn build_controller(config: &AppConfig, store: SqliteHistoryStore) -> Controller {
    HistoryController::new(store, create_reader(config.clipboard_backend_or_default()))
}

fn failure(presenter: &Presenter, message: &str) -> ExitCode {
    presenter.error(message);
    ExitCode::from(EXIT_ERROR)
}

fn finish(controller: Controller) {
    if let Err(e) = controller.shutdown() {
        tracing::warn!(error = %e, "history database did not close cleanly");
    }
}

fn close_store(store: SqliteHistoryStore) {
    if let Err(e) = store.close() {
        tracing::warn!(error = %e, "history database did not close cleanly");
    }
}

/// `list`: recent entries, elided, most recent first
pub fn run_list(config: &AppConfig, limit: Option<usize>, presenter: &Presenter) -> ExitCode {
    let store = match open_existing_store(config) {
        Ok(Some(store)) => store,
        Ok(None) => {
            presenter.info("No clipboard history yet");
            return ExitCode::SUCCESS;
        }
        Err(e) => return failure(presenter, &e.to_string()),
    };
    let controller = build_controller(config, store);

    let limit = limit
        .filter(|n| *n > 0)
        .unwrap_or_else(|| config.history_limit_or_default());

    let mut rows = Vec::new();
    let listed = controller.list_recent(limit, |id, preview| rows.push((id, preview.to_string())));
    finish(controller);

    match listed {
        Ok(_) if rows.is_empty() => presenter.info("No clipboard history yet"),
        Ok(_) => {
            let width = rows
                .iter()
                .map(|(id, _)| id.to_string().len())
                .max()
                .unwrap_or(1);
            for (id, preview) in &rows {
                presenter.history_entry(id.get(), preview, width);
            }
        }
        Err(e) => return failure(presenter, &e.to_string()),
    }

    ExitCode::SUCCESS
}

/// Full text of one entry, or `NotFound` when the database does not exist
fn resolve(config: &AppConfig, id: RecordId) -> Result<String, HistoryError> {
    let Some(store) = open_existing_store(config)? else {
        return Err(HistoryError::NotFound(id));
    };
    let controller = build_controller(config, store);
    let text = controller.resolve_for_copy(id);
    finish(controller);
    text
}

/// `show`: print the untruncated text of an entry
pub fn run_show(config: &AppConfig, id: RecordId, presenter: &Presenter) -> ExitCode {
    match resolve(config, id) {
        Ok(text) => {
            presenter.output(&text);
            ExitCode::SUCCESS
        }
        Err(e) => failure(presenter, &e.to_string()),
    }
}

/// `copy`: put an entry back on the clipboard
pub async fn run_copy(config: &AppConfig, id: RecordId, presenter: &Presenter) -> ExitCode {
    let text = match resolve(config, id) {
        Ok(text) => text,
        Err(e) => return failure(presenter, &e.to_string()),
    };

    let writer = create_writer(config.clipboard_backend_or_default());
    match writer.write_text(&text).await {
        Ok(()) => {
            presenter.success(&format!("Copied entry {} to clipboard", id));
            ExitCode::SUCCESS
        }
        Err(e) => failure(presenter, &e.to_string()),
    }
}

/// `capture`: record the current clipboard text once
pub async fn run_capture(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => return failure(presenter, &e.to_string()),
    };
    let controller = build_controller(config, store);

    let outcome = controller.handle_change().await;
    finish(controller);

    match outcome {
        Ok(CaptureOutcome::NoText) => presenter.info("Clipboard holds no text"),
        Ok(CaptureOutcome::Committed(CommitOutcome::Inserted(id))) => {
            presenter.success(&format!("Stored as entry {}", id))
        }
        Ok(CaptureOutcome::Committed(CommitOutcome::Refreshed(id))) => {
            presenter.success(&format!("Already stored as entry {}; moved to top", id))
        }
        Ok(CaptureOutcome::Committed(CommitOutcome::Skipped)) => {
            presenter.info("Already the most recent entry")
        }
        Err(e) => return failure(presenter, &e.to_string()),
    }

    ExitCode::SUCCESS
}

/// `prune`: run one retention sweep now
pub fn run_prune(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let sweeper = RetentionSweeper::new(config.expiration_days_or_default());
    if !sweeper.is_enabled() {
        presenter.info("Retention is disabled (expiration_days = 0)");
        return ExitCode::SUCCESS;
    }

    let store = match open_existing_store(config) {
        Ok(Some(store)) => store,
        Ok(None) => {
            presenter.info("No clipboard history yet");
            return ExitCode::SUCCESS;
        }
        Err(e) => return failure(presenter, &e.to_string()),
    };

    let swept = sweeper.sweep(&store, Utc::now());
    close_store(store);

    match swept {
        Ok(removed) => {
            presenter.success(&format!("Removed {} expired entries", removed));
            ExitCode::SUCCESS
        }
        Err(e) => failure(presenter, &e.to_string()),
    }
}

/// `status`: daemon PID, database path, and record count
pub fn run_status(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    match PidFile::new().running_pid() {
        Some(pid) => presenter.daemon_status(&format!("running (PID {})", pid)),
        None => presenter.daemon_status("not running"),
    }

    presenter.key_value("database", &database_path(config).display().to_string());

    let entries = match open_existing_store(config) {
        Ok(Some(store)) => {
            let count = store.count();
            close_store(store);
            match count {
                Ok(count) => count.to_string(),
                Err(e) => return failure(presenter, &e.to_string()),
            }
        }
        Ok(None) => "0 (not created yet)".to_string(),
        Err(e) => return failure(presenter, &e.to_string()),
    };
    presenter.key_value("entries", &entries);

    let expiry = match config.expiration_days_or_default() {
        0 => "never".to_string(),
        days => format!("after {} days", days),
    };
    presenter.key_value("expiry", &expiry);

    ExitCode::SUCCESS
}
