//! Scoring of arguments and the winner rule.
//!
//! ```text
//! evidence_quality = mean relevance of cited fragments (0 when none)
//! coherence        = 0.7 * min(1, chars / target) + 0.3 * confidence
//! round score      = w1 * evidence_quality + w2 * coherence + w3 * confidence
//! cumulative(n)    = sum of round scores 1..=n
//! ```
//!
//! Everything here is a pure function of its inputs.

use crate::core::team::Team;
use crate::debate::argument::Argument;
use crate::debate::config::ScoringConfig;
use crate::evidence::fragment::EvidenceFragment;
use serde::{Deserialize, Serialize};

const COMPLETENESS_WEIGHT: f64 = 0.7;
const COHERENCE_CONFIDENCE_WEIGHT: f64 = 0.3;

/// Score breakdown for one team in one round
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundScore {
    pub evidence_quality: f64,
    pub coherence: f64,
    pub confidence: f64,
    pub total: f64,
}

/// A value per team
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamScores {
    pub pro: f64,
    pub contra: f64,
}

impl TeamScores {
    pub fn get(&self, team: Team) -> f64 {
        match team {
            Team::Pro => self.pro,
            Team::Contra => self.contra,
        }
    }

    pub fn add(&mut self, team: Team, value: f64) {
        match team {
            Team::Pro => self.pro += value,
            Team::Contra => self.contra += value,
        }
    }
}

/// Debate outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Pro,
    Contra,
    Tie,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Pro => "PRO",
            Winner::Contra => "CONTRA",
            Winner::Tie => "TIE",
        }
    }

    pub fn team(&self) -> Option<Team> {
        match self {
            Winner::Pro => Some(Team::Pro),
            Winner::Contra => Some(Team::Contra),
            Winner::Tie => None,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scores arguments with a fixed, validated [`ScoringConfig`]
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Mean relevance of the cited fragments
    pub fn evidence_quality(cited: &[EvidenceFragment]) -> f64 {
        if cited.is_empty() {
            return 0.0;
        }
        cited.iter().map(|f| f.relevance).sum::<f64>() / cited.len() as f64
    }

    pub fn coherence(&self, text: &str, confidence: f64) -> f64 {
        let completeness =
            (text.trim().chars().count() as f64 / self.config.target_argument_chars as f64).min(1.0);
        COMPLETENESS_WEIGHT * completeness + COHERENCE_CONFIDENCE_WEIGHT * confidence
    }

    /// Score one argument given the fragments it cites
    pub fn score(&self, argument: &Argument, cited: &[EvidenceFragment]) -> RoundScore {
        let evidence_quality = Self::evidence_quality(cited);
        let confidence = argument.confidence;
        let coherence = self.coherence(&argument.text, confidence);
        let total = self.config.evidence_weight * evidence_quality
            + self.config.coherence_weight * coherence
            + self.config.confidence_weight * confidence;
        RoundScore {
            evidence_quality,
            coherence,
            confidence,
            total,
        }
    }

    /// Strictly greater beyond epsilon wins; otherwise a tie
    pub fn decide(&self, cumulative: &TeamScores) -> Winner {
        let margin = cumulative.pro - cumulative.contra;
        if margin > self.config.tie_epsilon {
            Winner::Pro
        } else if -margin > self.config.tie_epsilon {
            Winner::Contra
        } else {
            Winner::Tie
        }
    }

    /// Human-readable summary of why the winner won
    pub fn rationale(&self, winner: Winner, cumulative: &TeamScores, rounds: usize) -> String {
        match winner.team() {
            Some(team) => {
                let margin = cumulative.get(team) - cumulative.get(team.opponent());
                format!(
                    "{} wins after {} round(s) with a cumulative score of {:.3} against {:.3} (margin {:.3}).",
                    team.label(),
                    rounds,
                    cumulative.get(team),
                    cumulative.get(team.opponent()),
                    margin
                )
            }
            None => format!(
                "The debate ends in a tie after {} round(s): PRO {:.3}, CONTRA {:.3} (within {:e}).",
                rounds, cumulative.pro, cumulative.contra, self.config.tie_epsilon
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::argument::{ArgumentOrigin, ArgumentStrategy};
    use crate::debate::role::AgentRole;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default())
    }

    fn argument(text: &str, confidence: f64) -> Argument {
        Argument::new(
            Team::Pro,
            1,
            text,
            vec![],
            confidence,
            ArgumentStrategy::InitialPosition,
            ArgumentOrigin::Synthesized,
        )
    }

    fn fragment(source: &str, relevance: f64) -> EvidenceFragment {
        EvidenceFragment::new(
            source,
            "t",
            "A sufficiently long evidence snippet for tests.",
            relevance,
            AgentRole::Scientific,
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_evidence_quality_is_mean_or_zero() {
        assert_eq!(ScoringEngine::evidence_quality(&[]), 0.0);
        let cited = [fragment("a", 0.4), fragment("b", 0.8)];
        assert!((ScoringEngine::evidence_quality(&cited) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_score_formula() {
        let text = "x".repeat(300);
        let score = engine().score(&argument(&text, 0.5), &[fragment("a", 0.8)]);

        let coherence = 0.7 * 0.5 + 0.3 * 0.5;
        assert!((score.coherence - coherence).abs() < 1e-12);
        let total = 0.5 * 0.8 + 0.3 * coherence + 0.2 * 0.5;
        assert!((score.total - total).abs() < 1e-12);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let arg = argument("Deterministic argument body.", 0.42);
        let cited = [fragment("a", 0.3), fragment("b", 0.9)];
        assert_eq!(engine().score(&arg, &cited), engine().score(&arg, &cited));
    }

    #[test]
    fn test_decide_with_epsilon() {
        let engine = engine();
        let scores = |pro, contra| TeamScores { pro, contra };
        assert_eq!(engine.decide(&scores(1.2, 1.0)), Winner::Pro);
        assert_eq!(engine.decide(&scores(0.9, 1.0)), Winner::Contra);
        assert_eq!(engine.decide(&scores(1.0, 1.0 + 1e-9)), Winner::Tie);
        assert_eq!(engine.decide(&scores(0.0, 0.0)), Winner::Tie);
    }

    #[test]
    fn test_rationale_names_winner() {
        let engine = engine();
        let scores = TeamScores {
            pro: 0.5,
            contra: 1.5,
        };
        let text = engine.rationale(Winner::Contra, &scores, 2);
        assert!(text.starts_with("CONTRA wins after 2 round(s)"));
        assert!(engine.rationale(Winner::Tie, &scores, 2).contains("tie"));
    }

    #[test]
    fn test_team_scores_accumulate() {
        let mut scores = TeamScores::default();
        scores.add(Team::Pro, 0.25);
        scores.add(Team::Pro, 0.5);
        scores.add(Team::Contra, 0.1);
        assert_eq!(scores.get(Team::Pro), 0.75);
        assert_eq!(scores.get(Team::Contra), 0.1);
    }
}
