//! Heading detection from paragraph style names
//!
//! Word stores a style id on each paragraph (`Heading1`, or a localized id
//! such as `1`) and a display name in `word/styles.xml` (`heading 1`). A
//! paragraph is a heading when either name starts with "heading"; the
//! trailing number is its level.

use std::collections::HashMap;

const HEADING_PREFIX: &str = "heading";

/// Heading level for a style name, or `None` if the name is not a heading style.
///
/// A heading style without a parseable number ("Heading", "Heading X") is level 1.
pub(crate) fn heading_level_from_style_name(name: &str) -> Option<u8> {
    let name = name.trim();
    let prefix = name.get(..HEADING_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(HEADING_PREFIX) {
        return None;
    }

    let level = name[HEADING_PREFIX.len()..]
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|level| *level >= 1)
        .unwrap_or(1);
    Some(level)
}

/// Heading level of a paragraph's style id.
///
/// The display name wins when it is known; otherwise the id itself is tried.
pub(crate) fn detect_heading_from_style(
    style_id: &str,
    style_names: &HashMap<String, String>,
) -> Option<u8> {
    style_names
        .get(style_id)
        .and_then(|name| heading_level_from_style_name(name))
        .or_else(|| heading_level_from_style_name(style_id))
}
