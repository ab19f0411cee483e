//! History record entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::digest::ContentHash;
use super::payload::decode_payload;
use crate::domain::error::{PayloadDecodeError, RecordIdParseError, UnknownContentTypeError};

/// Storage-assigned identifier of a history record.
///
/// Ids are assigned on insert and never reused or reordered, so a recency
/// bump keeps the original id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw storage row id
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw storage row id
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(raw) if raw > 0 => Ok(Self(raw)),
            _ => Err(RecordIdParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content type tag stored with every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    PlainText,
}

impl ContentType {
    /// Get the MIME string stored in the `type` column
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
        }
    }
}

impl FromStr for ContentType {
    type Err = UnknownContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text/plain" => Ok(Self::PlainText),
            _ => Err(UnknownContentTypeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One persisted clipboard capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: RecordId,
    pub content_type: ContentType,
    /// UTF-16LE bytes of the captured text
    pub payload: Vec<u8>,
    pub hash: ContentHash,
    pub captured_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Decode the payload back into the captured text
    pub fn text(&self) -> Result<String, PayloadDecodeError> {
        decode_payload(&self.payload)
    }
}
