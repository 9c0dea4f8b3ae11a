//! Title matching used when locating a requested section.

use serde::{Deserialize, Serialize};

/// How a requested title is compared against a candidate heading or link.
///
/// `Contains` accepts any candidate whose text contains the requested title,
/// so "Chapter 1" also matches "Chapter 10". `Exact` compares trimmed text
/// and is sensitive to punctuation and inner whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    #[default]
    Contains,
    Exact,
}

impl MatchPolicy {
    pub fn matches(self, wanted: &str, candidate: &str) -> bool {
        let wanted = wanted.trim();
        match self {
            MatchPolicy::Contains => candidate.contains(wanted),
            MatchPolicy::Exact => candidate.trim() == wanted,
        }
    }
}
