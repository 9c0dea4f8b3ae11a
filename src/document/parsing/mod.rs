//! Package parsing utilities
//!
//! Helpers that turn docx-rs paragraphs into plain text and heading levels.

pub(crate) mod formatting;
pub(crate) mod heading;
