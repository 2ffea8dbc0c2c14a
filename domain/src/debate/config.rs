//! Debate configuration (Value Object)
//!
//! [`DebateConfig`] is created once from user input and shared read-only for
//! the rest of the run. Validation never clamps: an out-of-range value is a
//! [`DomainError::InvalidConfig`].

use crate::core::{error::DomainError, model::Model, team::Team};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tolerance used when checking that scoring weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Model assignment per participant role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateModels {
    pub pro_supervisor: Model,
    pub contra_supervisor: Model,
    pub research_agent: Model,
}

impl Default for DebateModels {
    fn default() -> Self {
        Self {
            pro_supervisor: Model::default_pro_supervisor(),
            contra_supervisor: Model::default_contra_supervisor(),
            research_agent: Model::default_research_agent(),
        }
    }
}

impl DebateModels {
    pub fn supervisor_for(&self, team: Team) -> &Model {
        match team {
            Team::Pro => &self.pro_supervisor,
            Team::Contra => &self.contra_supervisor,
        }
    }
}

/// Numeric limits applied to research and synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateLimits {
    pub max_fragments_per_agent: usize,
    pub max_queries_per_agent: usize,
    /// Spacing between completion calls
    pub min_delay_between_calls: Duration,
    /// Spacing between search calls
    pub min_delay_between_searches: Duration,
    /// Fragments handed to a supervisor for one synthesis
    pub evidence_top_k: usize,
    /// Candidates scoring below this are discarded during research
    pub min_relevance: f64,
}

impl Default for DebateLimits {
    fn default() -> Self {
        Self {
            max_fragments_per_agent: 5,
            max_queries_per_agent: 2,
            min_delay_between_calls: Duration::from_millis(1500),
            min_delay_between_searches: Duration::from_millis(2000),
            evidence_top_k: 5,
            min_relevance: 0.0,
        }
    }
}

/// Weights and constants of the scoring rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub evidence_weight: f64,
    pub coherence_weight: f64,
    pub confidence_weight: f64,
    /// Per-round decay applied to older evidence, in (0, 1]
    pub round_decay: f64,
    /// Cumulative scores closer than this are a tie
    pub tie_epsilon: f64,
    /// Argument length treated as complete by the coherence measure
    pub target_argument_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            evidence_weight: 0.5,
            coherence_weight: 0.3,
            confidence_weight: 0.2,
            round_decay: 0.85,
            tie_epsilon: 1e-6,
            target_argument_chars: 600,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [
            ("scoring.evidence_weight", self.evidence_weight),
            ("scoring.coherence_weight", self.coherence_weight),
            ("scoring.confidence_weight", self.confidence_weight),
        ];
        for (field, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DomainError::invalid_config(
                    field,
                    format!("must be a non-negative number, got {weight}"),
                ));
            }
        }
        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::invalid_config(
                "scoring",
                format!("weights must sum to 1, got {sum}"),
            ));
        }
        if !(self.round_decay > 0.0 && self.round_decay <= 1.0) {
            return Err(DomainError::invalid_config(
                "scoring.round_decay",
                format!("must be in (0, 1], got {}", self.round_decay),
            ));
        }
        if !(self.tie_epsilon.is_finite() && self.tie_epsilon >= 0.0) {
            return Err(DomainError::invalid_config(
                "scoring.tie_epsilon",
                "must be a non-negative number",
            ));
        }
        if self.target_argument_chars == 0 {
            return Err(DomainError::invalid_config(
                "scoring.target_argument_chars",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Immutable description of one debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    pub topic: String,
    pub pro_position: String,
    pub contra_position: String,
    pub max_rounds: usize,
    pub agents_per_team: usize,
    pub models: DebateModels,
    pub limits: DebateLimits,
    pub scoring: ScoringConfig,
}

impl DebateConfig {
    pub fn builder(
        topic: impl Into<String>,
        pro_position: impl Into<String>,
        contra_position: impl Into<String>,
    ) -> DebateConfigBuilder {
        DebateConfigBuilder {
            config: DebateConfig {
                topic: topic.into(),
                pro_position: pro_position.into(),
                contra_position: contra_position.into(),
                max_rounds: 3,
                agents_per_team: 5,
                models: DebateModels::default(),
                limits: DebateLimits::default(),
                scoring: ScoringConfig::default(),
            },
        }
    }

    /// Position defended by `team`
    pub fn position(&self, team: Team) -> &str {
        match team {
            Team::Pro => &self.pro_position,
            Team::Contra => &self.contra_position,
        }
    }

    /// Upper bound on a team's evidence store after one research phase
    pub fn max_fragments_per_team(&self) -> usize {
        self.agents_per_team * self.limits.max_fragments_per_agent
    }

    /// Check every field. Called by the builder and again at INIT.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("topic", &self.topic),
            ("pro_position", &self.pro_position),
            ("contra_position", &self.contra_position),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::invalid_config(field, "cannot be empty"));
            }
        }
        if self.max_rounds < 1 {
            return Err(DomainError::invalid_config(
                "max_rounds",
                "must be at least 1",
            ));
        }
        if self.agents_per_team < 1 {
            return Err(DomainError::invalid_config(
                "agents_per_team",
                "must be at least 1",
            ));
        }
        for (field, model) in [
            ("models.pro_supervisor", &self.models.pro_supervisor),
            ("models.contra_supervisor", &self.models.contra_supervisor),
            ("models.research_agent", &self.models.research_agent),
        ] {
            if model.is_blank() {
                return Err(DomainError::invalid_config(field, "model id cannot be empty"));
            }
        }

        let limits = &self.limits;
        if limits.max_fragments_per_agent < 1 {
            return Err(DomainError::invalid_config(
                "limits.max_fragments_per_agent",
                "must be at least 1",
            ));
        }
        if limits.max_queries_per_agent < 1 {
            return Err(DomainError::invalid_config(
                "limits.max_queries_per_agent",
                "must be at least 1",
            ));
        }
        if limits.evidence_top_k < 1 {
            return Err(DomainError::invalid_config(
                "limits.evidence_top_k",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&limits.min_relevance) {
            return Err(DomainError::invalid_config(
                "limits.min_relevance",
                format!("must be in [0, 1], got {}", limits.min_relevance),
            ));
        }

        self.scoring.validate()
    }
}

/// Builder for [`DebateConfig`]
#[derive(Debug, Clone)]
pub struct DebateConfigBuilder {
    config: DebateConfig,
}

impl DebateConfigBuilder {
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.config.max_rounds = rounds;
        self
    }

    pub fn with_agents_per_team(mut self, agents: usize) -> Self {
        self.config.agents_per_team = agents;
        self
    }

    pub fn with_models(mut self, models: DebateModels) -> Self {
        self.config.models = models;
        self
    }

    pub fn with_limits(mut self, limits: DebateLimits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn build(self) -> Result<DebateConfig, DomainError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
