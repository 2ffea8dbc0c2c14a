//! Scoring weights from TOML (`[scoring]` section)

use debate_domain::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Raw scoring constants from TOML
///
/// The three weights must sum to 1; this is checked when the debate
/// configuration is built, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub evidence_weight: f64,
    pub coherence_weight: f64,
    pub confidence_weight: f64,
    pub round_decay: f64,
    pub tie_epsilon: f64,
    pub target_argument_chars: usize,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let scoring = ScoringConfig::default();
        Self {
            evidence_weight: scoring.evidence_weight,
            coherence_weight: scoring.coherence_weight,
            confidence_weight: scoring.confidence_weight,
            round_decay: scoring.round_decay,
            tie_epsilon: scoring.tie_epsilon,
            target_argument_chars: scoring.target_argument_chars,
        }
    }
}

impl FileScoringConfig {
    pub fn to_scoring(&self) -> ScoringConfig {
        ScoringConfig {
            evidence_weight: self.evidence_weight,
            coherence_weight: self.coherence_weight,
            confidence_weight: self.confidence_weight,
            round_decay: self.round_decay,
            tie_epsilon: self.tie_epsilon,
            target_argument_chars: self.target_argument_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_deserialize() {
        let toml_str = r#"
[scoring]
evidence_weight = 0.4
coherence_weight = 0.4
round_decay = 1.0
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let scoring = config.scoring.to_scoring();
        assert_eq!(scoring.evidence_weight, 0.4);
        assert_eq!(scoring.coherence_weight, 0.4);
        assert_eq!(scoring.confidence_weight, 0.2);
        assert_eq!(scoring.round_decay, 1.0);
        assert!(scoring.validate().is_ok());
    }
}
