//! Heuristic relevance of a snippet to a team's research brief.
//!
//! No language model is involved: the score combines term overlap with the
//! topic and position, hits on the role's keyword list, and a small bonus
//! for sources the role prefers. The result is always within [0, 1].

use crate::debate::role::AgentRole;
use std::collections::HashSet;

const BASE: f64 = 0.2;
const POSITION_WEIGHT: f64 = 0.5;
const KEYWORD_WEIGHT: f64 = 0.2;
const SOURCE_BONUS: f64 = 0.1;

/// Keyword hits needed for full keyword credit
const KEYWORD_SATURATION: f64 = 2.0;

/// Words ignored when comparing a snippet to the brief
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "this", "are", "was", "were", "from", "has", "have",
    "not", "but", "its", "into", "than", "more", "can", "will", "their", "about",
];

/// Scoring inputs describing what a team is looking for
#[derive(Debug, Clone)]
pub struct RelevanceBrief<'a> {
    pub topic: &'a str,
    pub position: &'a str,
    pub role: AgentRole,
}

impl RelevanceBrief<'_> {
    /// Score a snippet against the brief
    pub fn score(&self, source_id: &str, title: &str, snippet: &str) -> f64 {
        let haystack = format!("{title} {snippet}").to_lowercase();
        let snippet_terms = terms(&haystack);

        let brief_terms = terms(&format!("{} {}", self.topic, self.position).to_lowercase());
        let position_overlap = if brief_terms.is_empty() {
            0.0
        } else {
            brief_terms.intersection(&snippet_terms).count() as f64 / brief_terms.len() as f64
        };

        let profile = self.role.profile();
        let keyword_hits = profile
            .keywords
            .iter()
            .filter(|k| haystack.contains(*k))
            .count() as f64;
        let keyword_overlap = (keyword_hits / KEYWORD_SATURATION).min(1.0);

        let source = source_id.to_lowercase();
        let preferred = profile
            .preferred_sources
            .iter()
            .any(|p| source.contains(p));

        let score = BASE
            + POSITION_WEIGHT * position_overlap
            + KEYWORD_WEIGHT * keyword_overlap
            + if preferred { SOURCE_BONUS } else { 0.0 };
        score.clamp(0.0, 1.0)
    }
}

fn terms(text: &str) -> HashSet<String> {
    significant_terms(text).into_iter().collect()
}

/// Distinct non-stopword terms of lowercase `text`, in order of appearance
pub(crate) fn significant_terms(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3 && !STOPWORDS.contains(w))
    {
        if !seen.iter().any(|s: &String| s == word) {
            seen.push(word.to_string());
        }
    }
    seen
}
