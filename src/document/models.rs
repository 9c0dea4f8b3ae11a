//! Core data structures for document representation
//!
//! This module defines the public types shared by both document families:
//! the detected format, package paragraphs, outline sections and listings.

use serde::{Deserialize, Serialize};

/// Maximum number of sections in one outline listing.
pub const MAX_SECTIONS: usize = 20;

/// Maximum number of characters in extracted content, before the marker.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Appended to content that was cut at [`MAX_CONTENT_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

/// Returned as content when a requested section matches nothing.
pub const SECTION_NOT_FOUND: &str = "No content found for the requested section";

/// The two document families docnav understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Word-processor package (.docx): a flat sequence of styled paragraphs.
    #[serde(rename = "structured-package")]
    Package,
    /// Hypertext markup: a tree of tagged nodes.
    #[serde(rename = "markup")]
    Markup,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Package => "structured-package",
            Format::Markup => "markup",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One paragraph of a package document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    /// Set when the style follows a heading naming convention.
    pub heading_level: Option<u8>,
}

impl Paragraph {
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heading_level: None,
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heading_level: Some(level),
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level.is_some()
    }

    /// A heading with visible text. Empty headings never open or close a section.
    pub(crate) fn titled_heading(&self) -> Option<(u8, &str)> {
        let level = self.heading_level?;
        let title = self.text.trim();
        (!title.is_empty()).then_some((level, title))
    }
}

/// A section as returned by an outline listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Synthetic `#heading_N` anchor for package sections; the link target or
    /// element anchor for markup sections, empty when there is none.
    pub href: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, href: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            level,
            content: None,
        }
    }
}

/// Result of a list/descend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Listing {
    /// Sections one level below the requested parent, in document order.
    Chapters { chapters: Vec<Section>, count: usize },
    /// The requested parent has no descendants; its own content instead.
    Content {
        is_leaf: bool,
        content: String,
        content_length: usize,
    },
}

impl Listing {
    pub fn chapters(mut chapters: Vec<Section>) -> Self {
        chapters.truncate(MAX_SECTIONS);
        let count = chapters.len();
        Listing::Chapters { chapters, count }
    }

    pub fn leaf(content: String) -> Self {
        let content_length = content.chars().count();
        Listing::Content {
            is_leaf: true,
            content,
            content_length,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Listing::Content { .. })
    }

    /// Sections of a chapter listing, empty for a leaf.
    pub fn sections(&self) -> &[Section] {
        match self {
            Listing::Chapters { chapters, .. } => chapters,
            Listing::Content { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_caps_sections() {
        let sections = (0..35)
            .map(|i| Section::new(format!("S{i}"), format!("#heading_{i}"), 1))
            .collect();
        let listing = Listing::chapters(sections);
        assert_eq!(listing.sections().len(), MAX_SECTIONS);
        assert_eq!(listing.sections()[19].title, "S19");
    }

    #[test]
    fn test_format_serializes_family_names() {
        assert_eq!(
            serde_json::to_string(&Format::Package).unwrap(),
            "\"structured-package\""
        );
        assert_eq!(serde_json::to_string(&Format::Markup).unwrap(), "\"markup\"");
    }

    #[test]
    fn test_empty_heading_has_no_title() {
        assert!(Paragraph::heading(2, "   ").titled_heading().is_none());
        assert_eq!(
            Paragraph::heading(2, " Scope ").titled_heading(),
            Some((2, "Scope"))
        );
        assert!(Paragraph::body("text").titled_heading().is_none());
    }

    #[test]
    fn test_leaf_listing_serializes_type_tag() {
        let json = serde_json::to_value(Listing::leaf("abc".into())).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["is_leaf"], true);
        assert_eq!(json["content_length"], 3);
    }
}
