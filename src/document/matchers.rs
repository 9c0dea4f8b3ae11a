//! Section candidate selection for markup documents
//!
//! Markup has no single reliable heading convention, so candidates come from
//! a prioritized list of matchers. The first matcher that yields any element
//! is the only one used for a listing.

use scraper::{ElementRef, Html, Selector};

/// Selects section candidates from a parsed markup document.
pub trait SectionMatcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Candidate elements in document order.
    fn select<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>>;
}

/// Matcher driven by a CSS selector list.
#[derive(Debug, Clone)]
pub struct CssMatcher {
    name: String,
    css: String,
}

impl CssMatcher {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }
}

impl SectionMatcher for CssMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn select<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        match Selector::parse(&self.css) {
            Ok(selector) => html.select(&selector).collect(),
            Err(e) => {
                tracing::warn!(matcher = %self.name, error = %e, "invalid selector");
                Vec::new()
            }
        }
    }
}

/// Ordered matchers; earlier entries win.
pub struct MatcherCascade {
    matchers: Vec<Box<dyn SectionMatcher>>,
}

impl MatcherCascade {
    pub fn new(matchers: Vec<Box<dyn SectionMatcher>>) -> Self {
        Self { matchers }
    }

    /// Append a lower-priority matcher.
    pub fn with(mut self, matcher: impl SectionMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn matchers(&self) -> impl Iterator<Item = &dyn SectionMatcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }

    /// The first matcher with at least one candidate, and its candidates.
    pub fn first_match<'a>(&self, html: &'a Html) -> Option<(&dyn SectionMatcher, Vec<ElementRef<'a>>)> {
        self.matchers().find_map(|matcher| {
            let elements = matcher.select(html);
            (!elements.is_empty()).then_some((matcher, elements))
        })
    }
}

impl Default for MatcherCascade {
    /// Heading tags, then section-like classes, then navigation links, then list links.
    fn default() -> Self {
        MatcherCascade::new(Vec::new())
            .with(CssMatcher::new("headings", "h1, h2, h3, h4, h5, h6"))
            .with(CssMatcher::new("section-classes", ".chapter, .section, .toc-item"))
            .with(CssMatcher::new("navigation-links", "nav a, .toc a"))
            .with(CssMatcher::new("list-links", "ul li a, ol li a"))
    }
}

impl std::fmt::Debug for MatcherCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.matchers().map(|m| m.name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_win_over_links() {
        let html = Html::parse_document(
            "<body><nav><a href='/a'>Alpha</a></nav><h2>Beta</h2></body>",
        );
        let cascade = MatcherCascade::default();
        let (matcher, elements) = cascade.first_match(&html).unwrap();
        assert_eq!(matcher.name(), "headings");
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_falls_through_to_list_links() {
        let html = Html::parse_document(
            "<body><ul><li><a href='/one'>One</a></li><li><a href='/two'>Two</a></li></ul></body>",
        );
        let cascade = MatcherCascade::default();
        let (matcher, elements) = cascade.first_match(&html).unwrap();
        assert_eq!(matcher.name(), "list-links");
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_nothing_matches() {
        let html = Html::parse_document("<body><p>plain</p></body>");
        assert!(MatcherCascade::default().first_match(&html).is_none());
    }

    #[test]
    fn test_custom_matcher_and_invalid_selector() {
        let html = Html::parse_document("<body><div class='part'>Part A</div></body>");
        let cascade = MatcherCascade::new(Vec::new())
            .with(CssMatcher::new("broken", "[[["))
            .with(CssMatcher::new("parts", "div.part"));
        let (matcher, _) = cascade.first_match(&html).unwrap();
        assert_eq!(matcher.name(), "parts");
        assert_eq!(format!("{cascade:?}"), r#"["broken", "parts"]"#);
    }
}
