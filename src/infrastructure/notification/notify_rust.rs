//! Desktop notifications via notify-rust
//!
//! Used by the daemon for the few events a user should see without a
//! terminal: storage failing at startup, and the watcher falling back to
//! polling.

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

const APP_NAME: &str = "ClipTracker";

/// How long a warning stays on screen
const WARNING_TIMEOUT_MS: u32 = 10_000;

/// Errors stay until dismissed, warnings linger, info uses the server default
fn display_timeout(icon: NotificationIcon) -> Timeout {
    match icon {
        NotificationIcon::Info => Timeout::Default,
        NotificationIcon::Warning => Timeout::Milliseconds(WARNING_TIMEOUT_MS),
        NotificationIcon::Error => Timeout::Never,
    }
}

#[derive(Debug, Default)]
pub struct NotifyRustNotifier;

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let message = message.to_owned();

        // The D-Bus round trip blocks
        tokio::task::spawn_blocking(move || {
            Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&message)
                .icon(icon.icon_name())
                .timeout(display_timeout(icon))
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_sticky() {
        assert!(matches!(
            display_timeout(NotificationIcon::Error),
            Timeout::Never
        ));
    }

    #[test]
    fn fallback_warning_lingers() {
        assert!(matches!(
            display_timeout(NotificationIcon::Warning),
            Timeout::Milliseconds(WARNING_TIMEOUT_MS)
        ));
        assert!(matches!(
            display_timeout(NotificationIcon::Info),
            Timeout::Default
        ));
    }
}
