//! Debate state machine and result types.
//!
//! ```text
//! INIT ─▶ RESEARCH ─▶ ARGUMENT ─▶ REBUTTAL ─▶ SCORE ─┬─▶ RESEARCH (next round)
//!                                                    └─▶ DECISION (terminal)
//! ```
//!
//! [`DebateState`] is owned and written only by the orchestrator. Every
//! transition is checked; once in DECISION nothing else is accepted.

use super::argument::Argument;
use super::degradation::Degradation;
use crate::core::error::DomainError;
use crate::core::team::Team;
use crate::scoring::engine::{RoundScore, TeamScores, Winner};
use serde::{Deserialize, Serialize};

/// Phase of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebatePhase {
    Init,
    Research,
    Argument,
    Rebuttal,
    Score,
    Decision,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Init => "init",
            DebatePhase::Research => "research",
            DebatePhase::Argument => "argument",
            DebatePhase::Rebuttal => "rebuttal",
            DebatePhase::Score => "score",
            DebatePhase::Decision => "decision",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebatePhase::Init => "Initialization",
            DebatePhase::Research => "Research",
            DebatePhase::Argument => "Argument Building",
            DebatePhase::Rebuttal => "Rebuttal",
            DebatePhase::Score => "Scoring",
            DebatePhase::Decision => "Final Decision",
        }
    }

    /// Edges of the phase graph
    pub fn can_transition_to(&self, next: DebatePhase) -> bool {
        matches!(
            (self, next),
            (DebatePhase::Init, DebatePhase::Research)
                | (DebatePhase::Research, DebatePhase::Argument)
                | (DebatePhase::Argument, DebatePhase::Rebuttal)
                | (DebatePhase::Rebuttal, DebatePhase::Score)
                | (DebatePhase::Score, DebatePhase::Research)
                | (DebatePhase::Score, DebatePhase::Decision)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebatePhase::Decision)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub pro_argument: Argument,
    pub contra_argument: Argument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_rebuttal: Option<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contra_rebuttal: Option<Argument>,
    pub pro_score: RoundScore,
    pub contra_score: RoundScore,
}

impl RoundResult {
    pub fn argument(&self, team: Team) -> &Argument {
        match team {
            Team::Pro => &self.pro_argument,
            Team::Contra => &self.contra_argument,
        }
    }

    pub fn rebuttal(&self, team: Team) -> Option<&Argument> {
        match team {
            Team::Pro => self.pro_rebuttal.as_ref(),
            Team::Contra => self.contra_rebuttal.as_ref(),
        }
    }

    pub fn score(&self, team: Team) -> &RoundScore {
        match team {
            Team::Pro => &self.pro_score,
            Team::Contra => &self.contra_score,
        }
    }
}

/// End-of-debate snapshot of one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: Team,
    pub position: String,
    pub fragments: usize,
    pub average_relevance: f64,
    pub arguments: usize,
    pub fallback_arguments: usize,
}

/// Frozen outcome of a debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResult {
    pub topic: String,
    pub rounds: Vec<RoundResult>,
    pub final_scores: TeamScores,
    pub winner: Winner,
    pub rationale: String,
    pub teams: Vec<TeamSummary>,
    pub degradations: Vec<Degradation>,
    /// True when the debate ended before `max_rounds`
    pub stopped_early: bool,
}

impl DebateResult {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    pub fn team_summary(&self, team: Team) -> Option<&TeamSummary> {
        self.teams.iter().find(|s| s.team == team)
    }
}

/// Mutable progress of a running debate
#[derive(Debug, Clone)]
pub struct DebateState {
    max_rounds: usize,
    current_round: usize,
    phase: DebatePhase,
    rounds: Vec<RoundResult>,
    cumulative: TeamScores,
}

impl DebateState {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            current_round: 0,
            phase: DebatePhase::Init,
            rounds: Vec::new(),
            cumulative: TeamScores::default(),
        }
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    /// Current round, 1-based; 0 before the first RESEARCH
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    pub fn cumulative(&self) -> &TeamScores {
        &self.cumulative
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True once the final round has been scored
    pub fn is_last_round(&self) -> bool {
        self.current_round >= self.max_rounds
    }

    /// Move to `next`, rejecting edges outside the phase graph.
    ///
    /// Entering RESEARCH starts a new round and is refused once the final
    /// round has been played.
    pub fn transition(&mut self, next: DebatePhase) -> Result<(), DomainError> {
        if self.phase.is_terminal() {
            return Err(DomainError::DebateFinished);
        }
        let invalid = DomainError::InvalidTransition {
            from: self.phase,
            to: next,
        };
        if !self.phase.can_transition_to(next) {
            return Err(invalid);
        }
        if next == DebatePhase::Research {
            if self.is_last_round() {
                return Err(invalid);
            }
            self.current_round += 1;
        }
        if next == DebatePhase::Decision && self.rounds.len() != self.current_round {
            return Err(invalid);
        }
        self.phase = next;
        Ok(())
    }

    /// Append the round's result and update cumulative scores. Only valid
    /// during SCORE, once per round.
    pub fn record_round(&mut self, result: RoundResult) -> Result<(), DomainError> {
        if self.phase != DebatePhase::Score
            || result.round != self.current_round
            || self.rounds.len() >= self.current_round
        {
            return Err(DomainError::InvalidTransition {
                from: self.phase,
                to: DebatePhase::Score,
            });
        }
        self.cumulative.add(Team::Pro, result.pro_score.total);
        self.cumulative.add(Team::Contra, result.contra_score.total);
        self.rounds.push(result);
        Ok(())
    }

    /// Take the recorded rounds once the debate reached DECISION
    pub fn into_rounds(self) -> Result<(Vec<RoundResult>, TeamScores), DomainError> {
        if !self.phase.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self.phase,
                to: DebatePhase::Decision,
            });
        }
        Ok((self.rounds, self.cumulative))
    }
}
