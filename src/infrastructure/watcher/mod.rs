//! Clipboard-change signal adapters

mod native;
mod polling;

use std::sync::Arc;
use std::time::Duration;

pub use native::NativeWatcher;
pub use polling::PollingWatcher;

use crate::application::ports::{ClipboardReader, ClipboardSignal};
use crate::domain::config::WatcherKind;

/// Create the clipboard signal for the configured watcher kind
pub fn create_signal(
    kind: WatcherKind,
    reader: Arc<dyn ClipboardReader>,
    poll_interval: Duration,
) -> Box<dyn ClipboardSignal> {
    match kind {
        WatcherKind::Native => Box::new(NativeWatcher::new()),
        WatcherKind::Poll => Box::new(PollingWatcher::new(reader, poll_interval)),
    }
}
