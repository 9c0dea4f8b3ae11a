//! docnav: navigable section outlines for remote documents
//!
//! This library detects whether a URL points at a word-processor package
//! (.docx) or an HTML page, reconstructs its section hierarchy one level at a
//! time, and extracts normalized, size-bounded section text. It backs a small
//! HTTP API and a one-shot CLI.

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use document::{Document, Extractor, Format, Listing, MatchPolicy, Section};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use service::{ChaptersData, ContentData, DocumentService};
