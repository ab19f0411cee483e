//! Clipboard history domain module

mod digest;
mod payload;
mod preview;
mod record;

pub use digest::ContentHash;
pub use payload::{decode_payload, encode_payload};
pub use preview::{elide, PREVIEW_HEAD_CHARS, PREVIEW_MAX_CHARS, PREVIEW_TAIL_CHARS};
pub use record::{ContentType, HistoryRecord, RecordId};
