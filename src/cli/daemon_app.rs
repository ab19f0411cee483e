//! Daemon app runner
//!
//! Composition root for capture mode: builds the store, reader, watcher and
//! controller once, then drives them from a single event loop.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::ports::{
    ChangeCallback, ClipboardReader, CommitOutcome, HistoryRetention, HistoryStore,
    NotificationIcon, Notifier, SignalError,
};
use crate::application::{CaptureOutcome, HistoryController, HistoryError, RetentionSweeper};
use crate::domain::config::{AppConfig, WatcherKind};
use crate::infrastructure::{create_notifier, create_reader, create_signal, PollingWatcher};

use super::app::{database_path, open_store, EXIT_ERROR, EXIT_SUCCESS};
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::{DaemonSignal, DaemonSignalHandler};

/// How often expired entries are swept while the daemon runs
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

const NOTIFY_TITLE: &str = "ClipTracker";

/// Run daemon mode
pub async fn run_daemon(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let notifier = create_notifier(config.notify_or_default());

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            presenter.error(&e.to_string());
            let _ = notifier
                .notify(NOTIFY_TITLE, &e.to_string(), NotificationIcon::Error)
                .await;
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let reader = create_reader(config.clipboard_backend_or_default());
    let mut controller = HistoryController::new(store, Arc::clone(&reader));

    // Setup signal handler (returns handler + sender for the watcher)
    let (mut signals, signal_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Runs on the watcher's thread; the loop below does the actual read
    let on_change: ChangeCallback = Arc::new(move || {
        if signal_tx.try_send(DaemonSignal::ClipboardChanged).is_err() {
            debug!("change queue full, dropping notification");
        }
    });

    if let Err(e) = start_watcher(
        &mut controller,
        &config,
        reader,
        on_change,
        notifier.as_ref(),
        &presenter,
    )
    .await
    {
        presenter.error(&e.to_string());
        let _ = controller.shutdown();
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.daemon_status(&format!(
        "Watching clipboard ({})",
        controller.signal_name().unwrap_or("unknown")
    ));
    presenter.info(&format!(
        "PID: {} | Database: {} | SIGINT: exit",
        std::process::id(),
        database_path(&config).display()
    ));

    let sweeper = RetentionSweeper::new(config.expiration_days_or_default());
    let result = daemon_loop(&controller, &mut signals, &sweeper, &presenter).await;

    // Teardown: watcher first, then storage
    if let Err(e) = controller.shutdown() {
        presenter.error(&e.to_string());
    }
    let _ = pid_file.release();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Start the configured watcher, falling back to polling when the native
/// hook cannot be installed.
async fn start_watcher<S, R>(
    controller: &mut HistoryController<S, R>,
    config: &AppConfig,
    reader: Arc<dyn ClipboardReader>,
    on_change: ChangeCallback,
    notifier: &dyn Notifier,
    presenter: &Presenter,
) -> Result<(), HistoryError>
where
    S: HistoryStore,
    R: ClipboardReader,
{
    let kind = config.watcher_or_default();
    let interval = config.poll_interval_or_default();
    let signal = create_signal(kind, Arc::clone(&reader), interval);

    match controller.start(signal, Arc::clone(&on_change)) {
        Err(HistoryError::Signal(SignalError::Registration(reason)))
            if kind == WatcherKind::Native =>
        {
            warn!(%reason, "native clipboard hook unavailable, falling back to polling");
            let message = format!(
                "Clipboard notifications unavailable ({}); polling every {} ms",
                reason,
                interval.as_millis()
            );
            presenter.warn(&message);
            let _ = notifier
                .notify(NOTIFY_TITLE, &message, NotificationIcon::Warning)
                .await;

            controller.start(Box::new(PollingWatcher::new(reader, interval)), on_change)
        }
        other => other,
    }
}

async fn daemon_loop<S, R>(
    controller: &HistoryController<S, R>,
    signals: &mut DaemonSignalHandler,
    sweeper: &RetentionSweeper,
    presenter: &Presenter,
) -> bool
where
    S: HistoryStore + HistoryRetention,
    R: ClipboardReader,
{
    // First tick fires immediately, so a sweep runs at startup
    let mut sweep_tick = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = sweep_tick.tick(), if sweeper.is_enabled() => {
                if let Err(e) = sweeper.sweep(controller.store(), Utc::now()) {
                    warn!(error = %e, "retention sweep failed");
                }
            }
            signal = signals.recv() => match signal {
                Some(DaemonSignal::ClipboardChanged) => handle_change(controller, presenter).await,
                Some(DaemonSignal::Shutdown) => {
                    presenter.daemon_status("Shutting down...");
                    return true;
                }
                None => {
                    // Channel closed
                    return false;
                }
            },
        }
    }
}

async fn handle_change<S, R>(controller: &HistoryController<S, R>, presenter: &Presenter)
where
    S: HistoryStore,
    R: ClipboardReader,
{
    match controller.handle_change().await {
        Ok(CaptureOutcome::Committed(CommitOutcome::Inserted(id))) => info!(%id, "captured"),
        Ok(CaptureOutcome::Committed(CommitOutcome::Refreshed(id))) => info!(%id, "recaptured"),
        Ok(_) => {}
        Err(e) => {
            // Storage state is unchanged, so the next notification retries
            warn!(error = %e, "capture failed");
            presenter.warn(&format!("Capture failed: {}", e));
        }
    }
}
