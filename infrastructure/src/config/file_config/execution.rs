//! Timeouts, retries and early stop from TOML (`[execution]` section)

use debate_application::{EarlyStop, ExecutionParams, RetryPolicy};
use debate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw execution parameters from TOML
///
/// # Example
///
/// ```toml
/// [execution]
/// research_timeout_secs = 120
/// synthesis_timeout_secs = 90
/// retry_attempts = 3
/// retry_initial_backoff_ms = 500
/// retry_max_backoff_ms = 8000
/// early_stop = "insufficient_evidence"   # or "never"
/// early_stop_min_fragments = 2
/// llm_queries = true                     # research model writes queries
/// query_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub research_timeout_secs: u64,
    pub synthesis_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_initial_backoff_ms: u64,
    pub retry_backoff_multiplier: f64,
    pub retry_max_backoff_ms: u64,
    pub early_stop: String,
    pub early_stop_min_fragments: usize,
    pub llm_queries: bool,
    pub query_timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            research_timeout_secs: params.research_timeout.as_secs(),
            synthesis_timeout_secs: params.synthesis_timeout.as_secs(),
            retry_attempts: params.retry.max_attempts,
            retry_initial_backoff_ms: params.retry.initial_backoff.as_millis() as u64,
            retry_backoff_multiplier: params.retry.backoff_multiplier,
            retry_max_backoff_ms: params.retry.max_backoff.as_millis() as u64,
            early_stop: "never".to_string(),
            early_stop_min_fragments: 1,
            llm_queries: params.query_writing,
            query_timeout_secs: params.query_timeout.as_secs(),
        }
    }
}

impl FileExecutionConfig {
    /// Parse the early-stop rule, collecting issues for unknown names.
    pub fn parse_early_stop(&self) -> (EarlyStop, Vec<ConfigIssue>) {
        match self.early_stop.trim().to_lowercase().as_str() {
            "never" | "" => (EarlyStop::Never, Vec::new()),
            "insufficient_evidence" | "insufficient-evidence" => (
                EarlyStop::InsufficientEvidence {
                    min_fragments: self.early_stop_min_fragments,
                },
                Vec::new(),
            ),
            other => (
                EarlyStop::Never,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidValue,
                    format!(
                        "execution.early_stop: unknown value '{}' (expected never or insufficient_evidence)",
                        other
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_early_stop().1;
        for (field, value) in [
            ("research_timeout_secs", self.research_timeout_secs),
            ("synthesis_timeout_secs", self.synthesis_timeout_secs),
            ("query_timeout_secs", self.query_timeout_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidValue,
                    format!("execution.{field}: must be at least 1"),
                ));
            }
        }
        if self.retry_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue,
                "execution.retry_attempts: must be at least 1",
            ));
        }
        if !(self.retry_backoff_multiplier.is_finite() && self.retry_backoff_multiplier >= 1.0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue,
                format!(
                    "execution.retry_backoff_multiplier: must be at least 1, got {}",
                    self.retry_backoff_multiplier
                ),
            ));
        }
        issues
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_research_timeout(Duration::from_secs(self.research_timeout_secs))
            .with_synthesis_timeout(Duration::from_secs(self.synthesis_timeout_secs))
            .with_retry(RetryPolicy {
                max_attempts: self.retry_attempts,
                initial_backoff: Duration::from_millis(self.retry_initial_backoff_ms),
                backoff_multiplier: self.retry_backoff_multiplier,
                max_backoff: Duration::from_millis(self.retry_max_backoff_ms),
            })
            .with_early_stop(self.parse_early_stop().0)
            .with_query_writing(self.llm_queries)
            .with_query_timeout(Duration::from_secs(self.query_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application() {
        let params = FileExecutionConfig::default().to_execution_params();
        assert_eq!(params, ExecutionParams::default());
    }

    #[test]
    fn test_early_stop_deserialize() {
        let toml_str = r#"
[execution]
early_stop = "insufficient_evidence"
early_stop_min_fragments = 3
research_timeout_secs = 30
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.execution.to_execution_params();
        assert_eq!(
            params.early_stop,
            EarlyStop::InsufficientEvidence { min_fragments: 3 }
        );
        assert_eq!(params.research_timeout, Duration::from_secs(30));
        assert!(params.query_writing);
    }

    #[test]
    fn test_llm_queries_can_be_disabled() {
        let toml_str = r#"
[execution]
llm_queries = false
query_timeout_secs = 5
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.execution.to_execution_params();
        assert!(!params.query_writing);
        assert_eq!(params.query_timeout, Duration::from_secs(5));
        assert!(config.execution.validate().is_empty());
    }

    #[test]
    fn test_unknown_early_stop_is_error() {
        let config = FileExecutionConfig {
            early_stop: "sometimes".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("sometimes"));
    }

    #[test]
    fn test_zero_timeouts_are_errors() {
        let config = FileExecutionConfig {
            research_timeout_secs: 0,
            retry_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().len(), 2);
    }
}
