//! Display helpers for author lists and long text.

/// Default cut-off for [`truncate_text`].
pub const DEFAULT_TRUNCATE_LEN: usize = 100;

/// Collapse an author list into a short byline.
///
/// `[]` → `Unknown`, one → as-is, two → `A and B`, more → `A et al.`
#[must_use]
pub fn format_authors<S: AsRef<str>>(authors: &[S]) -> String {
    match authors {
        [] => "Unknown".to_string(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [first, ..] => format!("{} et al.", first.as_ref()),
    }
}

/// Split a free-text author field (`"A, B, C"`) into names.
#[must_use]
pub fn split_authors(authors: &str) -> Vec<String> {
    authors
        .split([',', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}
