//! Request-level operations shared by the HTTP API and the CLI
//!
//! Every call validates the source URL, detects the format, fetches and
//! parses the document, runs one outline or content lookup and discards the
//! document. Calls block on the network.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::document::{
    Document, Extractor, Format, Listing, MatchPolicy, MatcherCascade, detect_format,
};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;

/// Response data for a list/descend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaptersData {
    pub url: String,
    pub document_type: Format,
    pub parent_chapter: Option<String>,
    #[serde(flatten)]
    pub listing: Listing,
}

/// Response data for an extract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentData {
    pub url: String,
    pub document_type: Format,
    pub chapter: Option<String>,
    pub content: String,
    pub content_length: usize,
}

pub struct DocumentService {
    fetcher: Arc<dyn Fetcher>,
    policy: MatchPolicy,
    cascade: MatcherCascade,
    sniff_bytes: usize,
}

impl DocumentService {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            policy: config.extract.match_policy,
            cascade: MatcherCascade::default(),
            sniff_bytes: config.fetch.sniff_bytes,
        }
    }

    /// Replace the markup section matchers.
    pub fn with_cascade(mut self, cascade: MatcherCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// List the sections below `chapter`, or the top-level sections.
    ///
    /// `content` defaults to true when a chapter is given: sections then carry
    /// their content and a chapter without descendants yields a leaf listing.
    pub fn list(&self, url: Option<&str>, chapter: Option<&str>, content: Option<bool>) -> Result<ChaptersData> {
        let url = validate_url(url)?;
        let chapter = normalize_chapter(chapter);
        let with_content = content.unwrap_or(chapter.is_some());
        tracing::info!(url = %url, chapter, with_content, "listing chapters");

        let doc = self.open(&url)?;
        let listing = self.extractor().outline(&doc, chapter, with_content);
        Ok(ChaptersData {
            url: url.to_string(),
            document_type: doc.format(),
            parent_chapter: chapter.map(str::to_string),
            listing,
        })
    }

    /// Content of `chapter`, or of the whole document.
    pub fn extract(&self, url: Option<&str>, chapter: Option<&str>) -> Result<ContentData> {
        let url = validate_url(url)?;
        let chapter = normalize_chapter(chapter);
        tracing::info!(url = %url, chapter, "extracting content");

        let doc = self.open(&url)?;
        let content = self.extractor().content(&doc, chapter);
        Ok(ContentData {
            url: url.to_string(),
            document_type: doc.format(),
            chapter: chapter.map(str::to_string),
            content_length: content.chars().count(),
            content,
        })
    }

    /// Detect, fetch and parse the document at `url`.
    pub fn open(&self, url: &Url) -> Result<Document> {
        let format = detect_format(url, self.fetcher.as_ref(), self.sniff_bytes);
        tracing::debug!(url = %url, format = %format, "detected format");

        let fetched = self.fetcher.get(url)?;
        if fetched.final_url != *url {
            tracing::debug!(url = %url, final_url = %fetched.final_url, "document was redirected");
        }
        Document::parse(fetched.final_url, format, &fetched.bytes).inspect_err(|e| {
            tracing::error!(url = %url, format = %format, error = %e, "failed to parse document");
        })
    }

    fn extractor(&self) -> Extractor<'_> {
        Extractor::new(self.fetcher.as_ref(), self.policy, &self.cascade)
    }
}

/// Require an absolute http(s) URL with a host.
pub fn validate_url(raw: Option<&str>) -> Result<Url> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(Error::MissingUrl)?;
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(Error::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

fn normalize_chapter(chapter: Option<&str>) -> Option<&str> {
    chapter.map(str::trim).filter(|c| !c.is_empty())
}
