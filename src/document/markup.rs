//! Outline and content extraction for markup documents
//!
//! Nesting is inferred from DOM containment rather than heading levels: a
//! candidate belongs under a parent when one of its containing elements
//! mentions the parent's title.

use std::collections::{HashMap, HashSet};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::cleanup::{WHITESPACE_RUN, clean_content};
use super::matchers::MatcherCascade;
use super::matching::MatchPolicy;
use super::models::{MAX_SECTIONS, SECTION_NOT_FOUND, Section};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;

/// Elements whose text is never visible.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Containers that make a candidate a top-level section.
const STRUCTURAL_CONTAINERS: [&str; 4] = ["body", "main", "article", "div"];

/// Main-content containers, most specific first, for whole-document content.
const MAIN_CONTAINERS: [&str; 5] = ["main", "article", ".content", ".main-content", "body"];

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Phrasing elements whose text runs on with the surrounding text.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "i", "ins",
    "kbd", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u",
    "var",
];

/// Sections of a markup document at the requested level.
///
/// Without a parent, candidates inside a structural container are returned.
/// With a parent, candidates with an ancestor (below `<body>`) whose text
/// contains the parent title are returned, excluding the parent itself.
/// Titles are unique, first occurrence wins, at most [`MAX_SECTIONS`].
pub fn outline(
    html: &Html,
    parent: Option<&str>,
    policy: MatchPolicy,
    cascade: &MatcherCascade,
) -> Vec<Section> {
    let Some((matcher, candidates)) = cascade.first_match(html) else {
        return Vec::new();
    };
    tracing::debug!(matcher = matcher.name(), candidates = candidates.len(), "markup candidates");

    let parent_id = parent
        .and_then(|wanted| parent_element(&candidates, wanted.trim(), policy))
        .map(|p| p.id());
    let mut seen = HashSet::new();
    let mut mentions_parent = HashMap::new();
    let mut sections = Vec::new();

    for element in candidates {
        let title = visible_text(element);
        if title.chars().count() <= 1 {
            continue;
        }

        let qualifies = match parent {
            None => is_top_level(element),
            Some(wanted) => {
                let wanted = wanted.trim();
                Some(element.id()) != parent_id
                    && element
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .take_while(|a| !matches!(a.value().name(), "body" | "html"))
                        .any(|a| {
                            *mentions_parent
                                .entry(a.id())
                                .or_insert_with(|| visible_text(a).contains(wanted))
                        })
            }
        };
        if !qualifies || seen.contains(&title) {
            continue;
        }

        seen.insert(title.clone());
        sections.push(Section::new(
            title,
            anchor(element),
            heading_level(element.value().name()),
        ));
        if sections.len() >= MAX_SECTIONS {
            break;
        }
    }

    sections
}

/// The candidate standing for the parent: an exact title match, else the
/// first candidate the policy accepts.
fn parent_element<'a>(
    candidates: &[ElementRef<'a>],
    wanted: &str,
    policy: MatchPolicy,
) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .find(|c| visible_text(**c) == wanted)
        .or_else(|| candidates.iter().find(|c| policy.matches(wanted, &visible_text(**c))))
        .copied()
}

/// Normalized text of the section titled `title`, or of the main content.
///
/// Lookup order: a heading and its following siblings; a link (same-document
/// fragments are resolved locally, other targets are fetched once and their
/// main content returned); any other cascade candidate's own text. Returns
/// [`SECTION_NOT_FOUND`] when nothing matches.
pub fn content(
    html: &Html,
    base: &Url,
    title: Option<&str>,
    policy: MatchPolicy,
    cascade: &MatcherCascade,
    fetcher: &dyn Fetcher,
) -> String {
    let Some(wanted) = title else {
        return main_content(html);
    };

    if let Some(heading) = select(html, HEADINGS).find(|h| policy.matches(wanted, &visible_text(*h))) {
        return section_after_heading(heading);
    }

    for link in select(html, "a").filter(|a| policy.matches(wanted, &visible_text(*a))) {
        let Some(href) = link.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            continue;
        };
        if let Some(fragment) = href.strip_prefix('#') {
            if let Some(text) = fragment_content(html, fragment) {
                return text;
            }
            continue;
        }
        match follow_link(base, href, fetcher) {
            Ok(text) => return text,
            Err(e) => {
                tracing::warn!(base = %base, href, error = %e, "failed to follow section link");
            }
        }
    }

    for matcher in cascade.matchers() {
        if let Some(element) = matcher
            .select(html)
            .into_iter()
            .filter(|el| el.value().name() != "a")
            .find(|el| policy.matches(wanted, &visible_text(*el)))
        {
            return clean_content(&visible_text(element));
        }
    }

    SECTION_NOT_FOUND.to_string()
}

/// Text of the first matching main-content container, else the whole document.
pub fn main_content(html: &Html) -> String {
    for css in MAIN_CONTAINERS {
        if let Some(element) = select(html, css).next() {
            return clean_content(&visible_text(element));
        }
    }
    clean_content(&visible_text(html.root_element()))
}

/// Fetch a linked page and return its main content. Never recurses further.
fn follow_link(base: &Url, href: &str, fetcher: &dyn Fetcher) -> Result<String> {
    let target = base
        .join(href)
        .map_err(|e| Error::InvalidUrl(format!("{href}: {e}")))?;
    tracing::info!(url = %target, "following section link");
    let fetched = fetcher.get(&target)?;
    let linked = Html::parse_document(&String::from_utf8_lossy(&fetched.bytes));
    Ok(main_content(&linked))
}

/// Content for a same-document `#id` target.
fn fragment_content(html: &Html, id: &str) -> Option<String> {
    let target = select(html, "[id]").find(|el| el.value().id() == Some(id))?;
    if is_heading_tag(target.value().name()) {
        Some(section_after_heading(target))
    } else {
        Some(clean_content(&visible_text(target)))
    }
}

/// Visible text of the siblings after `heading`, up to the next heading.
fn section_after_heading(heading: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for sibling in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            let name = element.value().name();
            if is_heading_tag(name) {
                break;
            }
            if HIDDEN_TAGS.contains(&name) {
                continue;
            }
            let text = visible_text(element);
            if !text.is_empty() {
                parts.push(text);
            }
        } else if let Some(text) = sibling.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
    }
    clean_content(&parts.join("\n"))
}

/// Text under `element` with whitespace collapsed to single spaces.
///
/// Text nodes are concatenated as written, so inline markup never splits a
/// word; any other element boundary separates text.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_visible_text(element, &mut raw);
    WHITESPACE_RUN.replace_all(&raw, " ").trim().to_string()
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if HIDDEN_TAGS.contains(&name) {
                continue;
            }
            let block = !INLINE_TAGS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_visible_text(child_element, out);
            if block {
                out.push(' ');
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn select<'a>(html: &'a Html, css: &str) -> impl Iterator<Item = ElementRef<'a>> {
    let elements: Vec<ElementRef<'a>> = match Selector::parse(css) {
        Ok(selector) => html.select(&selector).collect(),
        Err(_) => Vec::new(),
    };
    elements.into_iter()
}

fn is_top_level(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| STRUCTURAL_CONTAINERS.contains(&a.value().name()))
}

fn anchor(element: ElementRef<'_>) -> String {
    let value = element.value();
    match (value.attr("href"), value.id()) {
        (Some(href), _) if !href.trim().is_empty() => href.trim().to_string(),
        (_, Some(id)) if !id.is_empty() => format!("#{id}"),
        _ => String::new(),
    }
}

fn is_heading_tag(name: &str) -> bool {
    heading_tag_level(name).is_some()
}

fn heading_tag_level(name: &str) -> Option<u8> {
    let digit = name.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

/// Level of a section element: `hN` gives N, anything else is 1.
fn heading_level(name: &str) -> u8 {
    heading_tag_level(name).unwrap_or(1)
}
