//! Text normalization shared by every content-producing path
//!
//! Whitespace inside a paragraph collapses to single spaces, paragraph breaks
//! (blank lines) collapse to exactly one blank line, and the result is capped
//! at [`MAX_CONTENT_CHARS`] characters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{MAX_CONTENT_CHARS, TRUNCATION_MARKER};

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r\f\v]*\n\s*").expect("valid paragraph break regex"));
pub(crate) static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize extracted text and enforce the content cap.
pub fn clean_content(content: &str) -> String {
    let paragraphs: Vec<String> = PARAGRAPH_BREAK
        .split(content)
        .map(|para| WHITESPACE_RUN.replace_all(para, " ").trim().to_string())
        .filter(|para| !para.is_empty())
        .collect();

    truncate_chars(paragraphs.join("\n\n"))
}

/// Cut to exactly [`MAX_CONTENT_CHARS`] characters plus the marker.
pub fn truncate_chars(text: String) -> String {
    match text.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        None => text,
    }
}
