//! Display elision for history entries

/// Longest trimmed text shown unchanged
pub const PREVIEW_MAX_CHARS: usize = 43;

/// Characters kept from the start of an elided entry
pub const PREVIEW_HEAD_CHARS: usize = 20;

/// Characters kept from the end of an elided entry
pub const PREVIEW_TAIL_CHARS: usize = 20;

const ELLIPSIS: &str = "...";

/// Build the menu label for a captured text.
///
/// The text is trimmed first. Anything longer than [`PREVIEW_MAX_CHARS`]
/// characters keeps its first and last 20 characters around `"..."`, which
/// is exactly 43 characters again.
pub fn elide(text: &str) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();

    if count <= PREVIEW_MAX_CHARS {
        return trimmed.to_string();
    }

    let head: String = trimmed.chars().take(PREVIEW_HEAD_CHARS).collect();
    let tail: String = trimmed.chars().skip(count - PREVIEW_TAIL_CHARS).collect();

    format!("{}{}{}", head, ELLIPSIS, tail)
}
