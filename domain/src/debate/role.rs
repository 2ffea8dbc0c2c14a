//! Research agent specializations.
//!
//! Each [`AgentRole`] maps to a fixed [`RoleProfile`] holding its keyword
//! list, query templates and preferred source hints. Adding a role means
//! adding a variant and a table entry; nothing else dispatches on roles.

use crate::core::team::Team;
use crate::evidence::relevance::significant_terms;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Position terms appended to each search query
const MAX_FOCUS_TERMS: usize = 3;

/// Specialization of a research agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Scientific,
    Economic,
    Historical,
    Rebuttal,
    Psychological,
}

/// Static configuration attached to a role
#[derive(Debug)]
pub struct RoleProfile {
    pub keywords: &'static [&'static str],
    /// Templates with a `{topic}` placeholder
    pub query_templates: &'static [&'static str],
    /// Substrings of source identifiers this role trusts more
    pub preferred_sources: &'static [&'static str],
    /// Prefix placed before the topic in the research brief
    pub brief_prefix: &'static str,
}

const SCIENTIFIC: RoleProfile = RoleProfile {
    keywords: &["study", "research", "scientific", "evidence", "data", "analysis"],
    query_templates: &[
        "scientific studies {topic}",
        "research evidence {topic}",
        "clinical data {topic}",
        "meta-analysis {topic}",
    ],
    preferred_sources: &["pubmed", "scholar", "university", "institute", "journal", ".edu"],
    brief_prefix: "Scientific studies on",
};

const ECONOMIC: RoleProfile = RoleProfile {
    keywords: &["economic", "financial", "cost", "benefit", "impact", "market"],
    query_templates: &[
        "economic impact {topic}",
        "cost benefit analysis {topic}",
        "market statistics {topic}",
        "financial analysis {topic}",
    ],
    preferred_sources: &["bank", "ministry", "statistics", "imf", "oecd"],
    brief_prefix: "Economic analysis of",
};

const HISTORICAL: RoleProfile = RoleProfile {
    keywords: &["historical", "history", "precedent", "origin", "evolution", "past"],
    query_templates: &[
        "history of {topic}",
        "historical precedents {topic}",
        "evolution of {topic}",
        "historical context {topic}",
    ],
    preferred_sources: &["museum", "archive", "history", "university"],
    brief_prefix: "Historical background of",
};

const REBUTTAL: RoleProfile = RoleProfile {
    keywords: &["criticism", "problem", "limitation", "counterargument", "weakness"],
    query_templates: &[
        "criticism of {topic}",
        "problems with {topic}",
        "limitations of {topic}",
        "counterarguments {topic}",
    ],
    preferred_sources: &["review", "analysis", "critique"],
    brief_prefix: "Criticisms and counterarguments about",
};

const PSYCHOLOGICAL: RoleProfile = RoleProfile {
    keywords: &["psychological", "mental", "emotional", "behavior", "social", "cognitive"],
    query_templates: &[
        "psychological effects {topic}",
        "mental health impact {topic}",
        "social behavior {topic}",
        "cognitive effects {topic}",
    ],
    preferred_sources: &["psychology", "apa.org", "behavior", "mental"],
    brief_prefix: "Psychological and social effects of",
};

impl AgentRole {
    pub const ALL: [AgentRole; 5] = [
        AgentRole::Scientific,
        AgentRole::Economic,
        AgentRole::Historical,
        AgentRole::Rebuttal,
        AgentRole::Psychological,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Scientific => "scientific",
            AgentRole::Economic => "economic",
            AgentRole::Historical => "historical",
            AgentRole::Rebuttal => "rebuttal",
            AgentRole::Psychological => "psychological",
        }
    }

    pub fn profile(&self) -> &'static RoleProfile {
        match self {
            AgentRole::Scientific => &SCIENTIFIC,
            AgentRole::Economic => &ECONOMIC,
            AgentRole::Historical => &HISTORICAL,
            AgentRole::Rebuttal => &REBUTTAL,
            AgentRole::Psychological => &PSYCHOLOGICAL,
        }
    }

    /// Roles assigned to a team of `count` agents, cycling through [`AgentRole::ALL`]
    pub fn assign(count: usize) -> Vec<AgentRole> {
        (0..count)
            .map(|i| AgentRole::ALL[i % AgentRole::ALL.len()])
            .collect()
    }

    /// Research brief handed to an agent of this role
    pub fn brief(&self, topic: &str, position: &str, team: Team) -> String {
        format!(
            "{} {} ({}): {}",
            self.profile().brief_prefix,
            topic,
            team.stance(),
            position
        )
    }

    /// Build at most `max` distinct search queries for one research round.
    ///
    /// Candidates are the role's templates followed by topic and keyword
    /// pairs, each suffixed with the terms of `position` that the topic does
    /// not already contain, so opposing teams search differently. The
    /// candidate list is rotated by `round`. Queries in `already_run` are
    /// only reused once every fresh candidate is taken.
    pub fn queries(
        &self,
        topic: &str,
        position: &str,
        round: usize,
        max: usize,
        already_run: &HashSet<String>,
    ) -> Vec<String> {
        let topic = topic.trim().to_lowercase();
        let focus = position_focus(&topic, position);
        let profile = self.profile();

        let mut candidates: Vec<String> = Vec::new();
        for base in profile
            .query_templates
            .iter()
            .map(|t| t.replace("{topic}", &topic))
            .chain(profile.keywords.iter().map(|k| format!("{} {}", topic, k)))
        {
            let query = if focus.is_empty() {
                base
            } else {
                format!("{} {}", base, focus)
            };
            if !candidates.contains(&query) {
                candidates.push(query);
            }
        }
        if candidates.is_empty() || max == 0 {
            return Vec::new();
        }

        let offset = round.saturating_sub(1).saturating_mul(max) % candidates.len();
        candidates.rotate_left(offset);

        let (fresh, repeated): (Vec<String>, Vec<String>) = candidates
            .into_iter()
            .partition(|q| !already_run.contains(q));
        fresh.into_iter().chain(repeated).take(max).collect()
    }
}

/// Position terms missing from the topic, at most [`MAX_FOCUS_TERMS`]
fn position_focus(topic: &str, position: &str) -> String {
    let topic_terms = significant_terms(topic);
    let position_terms = significant_terms(&position.to_lowercase());
    let novel: Vec<&str> = position_terms
        .iter()
        .filter(|t| !topic_terms.contains(*t))
        .map(String::as_str)
        .collect();
    let chosen: Vec<&str> = if novel.is_empty() {
        position_terms.iter().map(String::as_str).collect()
    } else {
        novel
    };
    chosen
        .into_iter()
        .take(MAX_FOCUS_TERMS)
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
