//! Polling clipboard watcher
//!
//! For sessions where the native hook cannot be installed. Samples the
//! clipboard on an interval and signals when the text fingerprint changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::application::ports::{ChangeCallback, ClipboardReader, ClipboardSignal, SignalError};
use crate::domain::history::ContentHash;

/// Clipboard signal that samples the clipboard periodically
pub struct PollingWatcher {
    reader: Arc<dyn ClipboardReader>,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl PollingWatcher {
    pub fn new(reader: Arc<dyn ClipboardReader>, interval: Duration) -> Self {
        Self {
            reader,
            interval,
            task: None,
        }
    }
}

async fn poll_loop(reader: Arc<dyn ClipboardReader>, interval: Duration, on_change: ChangeCallback) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // First sample is the baseline and never signals
    let mut previous: Option<Option<ContentHash>> = None;

    loop {
        ticker.tick().await;

        let current = match reader.read_text().await {
            Ok(text) => text.as_deref().map(ContentHash::of_text),
            Err(e) => {
                debug!(error = %e, "clipboard poll failed");
                continue;
            }
        };

        if previous.as_ref().is_some_and(|prev| *prev != current) {
            on_change();
        }
        previous = Some(current);
    }
}

impl ClipboardSignal for PollingWatcher {
    fn name(&self) -> &'static str {
        "poll"
    }

    fn start(&mut self, on_change: ChangeCallback) -> Result<(), SignalError> {
        if self.task.is_some() {
            return Err(SignalError::AlreadyActive);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SignalError::Registration(e.to_string()))?;
        self.task = Some(runtime.spawn(poll_loop(
            Arc::clone(&self.reader),
            self.interval,
            on_change,
        )));
        debug!(interval_ms = self.interval.as_millis() as u64, "clipboard polling started");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for PollingWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
