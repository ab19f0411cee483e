//! OS clipboard-change hook via clipboard-rs
//!
//! The clipboard-rs watch loop blocks, so it runs on a dedicated thread and
//! is stopped through its shutdown channel.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use clipboard_rs::{ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext, WatcherShutdown};
use tracing::{debug, warn};

use crate::application::ports::{ChangeCallback, ClipboardSignal, SignalError};

/// Forwards each OS notification to the registered callback
struct ChangeForwarder {
    on_change: ChangeCallback,
}

impl ClipboardHandler for ChangeForwarder {
    fn on_clipboard_change(&mut self) {
        (self.on_change)();
    }
}

struct RunningWatch {
    shutdown: WatcherShutdown,
    thread: JoinHandle<()>,
}

/// Clipboard signal backed by the platform's change notifications
#[derive(Default)]
pub struct NativeWatcher {
    running: Option<RunningWatch>,
}

impl NativeWatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSignal for NativeWatcher {
    fn name(&self) -> &'static str {
        "native"
    }

    fn start(&mut self, on_change: ChangeCallback) -> Result<(), SignalError> {
        if self.running.is_some() {
            return Err(SignalError::AlreadyActive);
        }

        // The context is built on the watch thread; it reports back either a
        // shutdown handle or the reason the hook could not be installed.
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<WatcherShutdown, String>>(1);

        let thread = thread::Builder::new()
            .name("clipboard-watch".to_string())
            .spawn(move || {
                let mut context = match ClipboardWatcherContext::new() {
                    Ok(context) => context,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                let shutdown = context
                    .add_handler(ChangeForwarder { on_change })
                    .get_shutdown_channel();
                if ready_tx.send(Ok(shutdown)).is_err() {
                    return;
                }

                debug!("native clipboard watch started");
                context.start_watch();
                debug!("native clipboard watch stopped");
            })
            .map_err(|e| SignalError::Registration(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(shutdown)) => {
                self.running = Some(RunningWatch { shutdown, thread });
                Ok(())
            }
            Ok(Err(reason)) => {
                let _ = thread.join();
                Err(SignalError::Registration(reason))
            }
            Err(_) => {
                let _ = thread.join();
                Err(SignalError::Registration(
                    "watch thread exited before registering".to_string(),
                ))
            }
        }
    }

    fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.shutdown.stop();
            if running.thread.join().is_err() {
                warn!("clipboard watch thread panicked");
            }
        }
    }

    fn is_active(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for NativeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
