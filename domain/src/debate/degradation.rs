//! Degradation markers.
//!
//! A failure below configuration validation never aborts a debate. Instead
//! the affected step continues with reduced output and records a
//! [`Degradation`] that ends up in the final result.

use super::state::DebatePhase;
use crate::core::team::Team;
use serde::{Deserialize, Serialize};

/// How much of a step's output survived
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegradationLevel {
    /// Reduced output, e.g. some queries failed or a fallback was used
    Partial,
    /// No output from the step at all
    Unavailable,
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    /// A search query failed after retries and was skipped
    SearchFailed,
    /// An agent returned no fragments
    NoEvidence,
    /// An agent did not finish before the research timeout
    ResearchTimeout,
    /// An agent task panicked or was cancelled
    AgentFailed,
    /// Synthesis failed and a templated argument was used
    SynthesisFailed,
    /// Synthesis exceeded its timeout and a templated argument was used
    SynthesisTimeout,
    /// Synthesis returned text too thin to use
    InvalidArgument,
}

impl DegradationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradationKind::SearchFailed => "search_failed",
            DegradationKind::NoEvidence => "no_evidence",
            DegradationKind::ResearchTimeout => "research_timeout",
            DegradationKind::AgentFailed => "agent_failed",
            DegradationKind::SynthesisFailed => "synthesis_failed",
            DegradationKind::SynthesisTimeout => "synthesis_timeout",
            DegradationKind::InvalidArgument => "invalid_argument",
        }
    }

    pub fn level(&self) -> DegradationLevel {
        match self {
            DegradationKind::NoEvidence | DegradationKind::AgentFailed => {
                DegradationLevel::Unavailable
            }
            _ => DegradationLevel::Partial,
        }
    }
}

impl std::fmt::Display for DegradationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One absorbed failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degradation {
    pub round: usize,
    pub team: Team,
    pub phase: DebatePhase,
    pub kind: DegradationKind,
    pub level: DegradationLevel,
    pub detail: String,
}

impl Degradation {
    pub fn new(
        round: usize,
        team: Team,
        phase: DebatePhase,
        kind: DegradationKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            round,
            team,
            phase,
            kind,
            level: kind.level(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "round {} {} {}: {} ({})",
            self.round,
            self.team,
            self.phase.as_str(),
            self.kind,
            self.detail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_follows_kind() {
        let marker = Degradation::new(
            2,
            Team::Pro,
            DebatePhase::Research,
            DegradationKind::NoEvidence,
            "agent scientific-1 found nothing",
        );
        assert_eq!(marker.level, DegradationLevel::Unavailable);
        assert_eq!(
            marker.to_string(),
            "round 2 PRO research: no_evidence (agent scientific-1 found nothing)"
        );
    }
}
