//! Format-independent outline and content operations
//!
//! A [`Document`] is created per request from fetched bytes and consumed by
//! one [`Extractor`] call. Format-specific work is delegated to the package
//! and markup readers.

use scraper::Html;
use url::Url;

use super::io::parse_package;
use super::matchers::MatcherCascade;
use super::matching::MatchPolicy;
use super::models::{Format, Listing, MAX_SECTIONS, Paragraph, SECTION_NOT_FOUND};
use super::{markup, package};
use crate::error::Result;
use crate::fetch::Fetcher;

/// A fetched and parsed document.
pub struct Document {
    url: Url,
    body: Body,
}

enum Body {
    Package(Vec<Paragraph>),
    Markup(Html),
}

impl Document {
    /// Parse `bytes` as `format`. Markup is decoded as lossy UTF-8 and never fails.
    pub fn parse(url: Url, format: Format, bytes: &[u8]) -> Result<Self> {
        let body = match format {
            Format::Package => Body::Package(parse_package(bytes)?),
            Format::Markup => Body::Markup(Html::parse_document(&String::from_utf8_lossy(bytes))),
        };
        Ok(Self { url, body })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn format(&self) -> Format {
        match self.body {
            Body::Package(_) => Format::Package,
            Body::Markup(_) => Format::Markup,
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url.as_str())
            .field("format", &self.format())
            .finish()
    }
}

/// Outline and content lookups with a fixed policy and collaborators.
#[derive(Clone, Copy)]
pub struct Extractor<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub policy: MatchPolicy,
    pub cascade: &'a MatcherCascade,
}

impl<'a> Extractor<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, policy: MatchPolicy, cascade: &'a MatcherCascade) -> Self {
        Self {
            fetcher,
            policy,
            cascade,
        }
    }

    /// Sections below `parent`, or the top-level sections.
    ///
    /// With `with_content`, every returned section carries its own content,
    /// and a parent without descendants yields a leaf listing holding the
    /// parent's content instead of an empty list.
    pub fn outline(&self, doc: &Document, parent: Option<&str>, with_content: bool) -> Listing {
        let mut sections = match &doc.body {
            Body::Package(paragraphs) => package::outline(paragraphs, parent, self.policy),
            Body::Markup(html) => markup::outline(html, parent, self.policy, self.cascade),
        };

        if sections.is_empty() && with_content {
            if let Some(parent) = parent {
                let content = self.content(doc, Some(parent));
                if !content.is_empty() && content != SECTION_NOT_FOUND {
                    tracing::debug!(url = %doc.url, parent, "leaf section");
                    return Listing::leaf(content);
                }
            }
        }

        sections.truncate(MAX_SECTIONS);
        if with_content {
            for section in &mut sections {
                section.content = Some(self.content(doc, Some(&section.title)));
            }
        }
        Listing::chapters(sections)
    }

    /// Normalized content of `title`, or of the whole document.
    pub fn content(&self, doc: &Document, title: Option<&str>) -> String {
        match &doc.body {
            Body::Package(paragraphs) => package::content(paragraphs, title, self.policy),
            Body::Markup(html) => {
                markup::content(html, &doc.url, title, self.policy, self.cascade, self.fetcher)
            }
        }
    }
}
