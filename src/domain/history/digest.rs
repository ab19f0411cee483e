//! Content fingerprint used for deduplication

use std::fmt;

/// 128-bit MD5 digest of captured text, hex-lowercase.
///
/// Only used for equality-of-content checks. Computed over the exact UTF-8
/// bytes of the text, without trimming or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Fingerprint a piece of captured text
    pub fn of_text(text: &str) -> Self {
        Self(format!("{:x}", md5::compute(text.as_bytes())))
    }

    /// Wrap a hash previously read back from storage
    pub fn from_stored(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Get the hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
