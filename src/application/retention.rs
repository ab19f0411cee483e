//! Retention sweep use case

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::ports::{HistoryRetention, StorageError};

/// Deletes history entries older than a configured number of days
#[derive(Debug, Clone, Copy)]
pub struct RetentionSweeper {
    expiration_days: u32,
}

impl RetentionSweeper {
    /// `0` disables expiry.
    pub const fn new(expiration_days: u32) -> Self {
        Self { expiration_days }
    }

    pub const fn is_enabled(&self) -> bool {
        self.expiration_days > 0
    }

    /// Oldest capture time that survives a sweep at `now`
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !self.is_enabled() {
            return None;
        }
        now.checked_sub_signed(Duration::days(i64::from(self.expiration_days)))
    }

    /// Remove expired entries; returns how many were deleted.
    pub fn sweep<T>(&self, store: &T, now: DateTime<Utc>) -> Result<usize, StorageError>
    where
        T: HistoryRetention + ?Sized,
    {
        let Some(cutoff) = self.cutoff(now) else {
            debug!("retention disabled, nothing to sweep");
            return Ok(0);
        };

        let removed = store.remove_captured_before(cutoff)?;
        if removed > 0 {
            info!(removed, %cutoff, "expired history entries removed");
        }
        Ok(removed)
    }
}
