//! Domain error types

use crate::debate::state::DebatePhase;
use thiserror::Error;

/// Domain-level errors
///
/// Only configuration problems ever leave the orchestrator; the other
/// variants guard the state machine against misuse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: DebatePhase, to: DebatePhase },

    #[error("Debate already finished")]
    DebateFinished,
}

impl DomainError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this error was raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let error = DomainError::invalid_config("max_rounds", "must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid configuration for `max_rounds`: must be at least 1"
        );
    }

    #[test]
    fn test_transition_display() {
        let error = DomainError::InvalidTransition {
            from: DebatePhase::Init,
            to: DebatePhase::Score,
        };
        assert_eq!(error.to_string(), "Invalid phase transition: init -> score");
    }

    #[test]
    fn test_is_configuration_check() {
        assert!(DomainError::invalid_config("topic", "empty").is_configuration());
        assert!(!DomainError::DebateFinished.is_configuration());
    }
}
