//! Outline and content scans over a package's paragraph sequence
//!
//! Both scans are single left-to-right passes that only look at the
//! paragraphs and the requested title; no state outlives a call.

use super::cleanup::clean_content;
use super::matching::MatchPolicy;
use super::models::{MAX_SECTIONS, Paragraph, SECTION_NOT_FOUND, Section};

/// Where the outline scan is in the paragraph sequence.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    SeekingParent,
    /// Collecting headings deeper than the parent's level.
    Collecting { parent_level: u8 },
    /// No parent requested: collecting level-1 headings.
    TopLevel,
}

/// Sections directly reachable from `parent`, or the top-level sections.
///
/// With a parent, every heading deeper than the parent is collected until a
/// heading at the parent's level or above closes the parent's range. Without
/// one, only level-1 headings are collected. At most [`MAX_SECTIONS`] are
/// returned.
pub fn outline(paragraphs: &[Paragraph], parent: Option<&str>, policy: MatchPolicy) -> Vec<Section> {
    let mut state = match parent {
        Some(_) => ScanState::SeekingParent,
        None => ScanState::TopLevel,
    };
    let mut sections = Vec::new();

    for (level, title) in paragraphs.iter().filter_map(Paragraph::titled_heading) {
        match state {
            ScanState::SeekingParent => {
                if parent.is_some_and(|wanted| policy.matches(wanted, title)) {
                    state = ScanState::Collecting { parent_level: level };
                }
            }
            ScanState::Collecting { parent_level } => {
                if level <= parent_level {
                    break;
                }
                push_section(&mut sections, title, level);
            }
            ScanState::TopLevel => {
                if level == 1 {
                    push_section(&mut sections, title, level);
                }
            }
        }
        if sections.len() >= MAX_SECTIONS {
            break;
        }
    }

    sections
}

fn push_section(sections: &mut Vec<Section>, title: &str, level: u8) {
    let href = format!("#heading_{}", sections.len());
    sections.push(Section::new(title, href, level));
}

/// Normalized text of the section titled `title`, or of the whole document.
///
/// A section's text is every non-heading paragraph after the first matching
/// heading, up to the next heading. Returns [`SECTION_NOT_FOUND`] when no
/// heading matches.
pub fn content(paragraphs: &[Paragraph], title: Option<&str>, policy: MatchPolicy) -> String {
    let Some(wanted) = title else {
        let text = paragraphs
            .iter()
            .map(|p| p.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        return clean_content(&text);
    };

    let Some(start) = paragraphs.iter().position(|p| {
        p.titled_heading()
            .is_some_and(|(_, heading)| policy.matches(wanted, heading))
    }) else {
        return SECTION_NOT_FOUND.to_string();
    };

    let text = paragraphs[start + 1..]
        .iter()
        .take_while(|p| p.titled_heading().is_none())
        .filter(|p| !p.is_heading())
        .map(|p| p.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    clean_content(&text)
}
