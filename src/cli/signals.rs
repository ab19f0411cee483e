//! Signal handling for the capture daemon

use colored::Colorize;
use tokio::sync::mpsc;

/// Events driving the daemon loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSignal {
    /// The clipboard watcher reported a change
    ClipboardChanged,
    /// Shutdown daemon (SIGINT/SIGTERM)
    Shutdown,
}

/// Capacity of the daemon event queue
const CHANNEL_CAPACITY: usize = 16;

/// Daemon signal handler
///
/// Handles OS shutdown signals and provides a channel for clipboard-change
/// events coming from the watcher.
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender for the clipboard watcher.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        spawn_shutdown_listeners(tx.clone())?;
        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}

#[cfg(unix)]
fn spawn_shutdown_listeners(tx: mpsc::Sender<DaemonSignal>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    // Setup SIGINT handler (shutdown)
    let tx_int = tx.clone();
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        sigint.recv().await;
        eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
        let _ = tx_int.send(DaemonSignal::Shutdown).await;
    });

    // Setup SIGTERM handler (shutdown)
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
        let _ = tx.send(DaemonSignal::Shutdown).await;
    });

    Ok(())
}

#[cfg(not(unix))]
fn spawn_shutdown_listeners(tx: mpsc::Sender<DaemonSignal>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{} Received Ctrl+C (shutdown)", "↓".cyan());
            let _ = tx.send(DaemonSignal::Shutdown).await;
        }
    });
    Ok(())
}
