//! Document detection, parsing and navigation
//!
//! Two document families are supported: word-processor packages (.docx), read
//! as a flat sequence of styled paragraphs, and hypertext markup, read as a
//! node tree. Both produce the same [`Section`] outlines and normalized
//! content strings.

pub(crate) mod cleanup;
pub mod detect;
pub(crate) mod io;
pub mod markup;
pub mod matchers;
pub mod matching;
pub mod models;
pub mod package;
pub(crate) mod parsing;
pub mod query;

pub use cleanup::clean_content;
pub use detect::{detect_format, detect_format_from_bytes};
pub use matchers::{CssMatcher, MatcherCascade, SectionMatcher};
pub use matching::MatchPolicy;
pub use models::*;
pub use query::{Document, Extractor};
