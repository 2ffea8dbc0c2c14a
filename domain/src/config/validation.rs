//! Configuration issues.
//!
//! Hard failures are raised by [`DebateConfig::validate`](crate::DebateConfig::validate).
//! This module covers the softer checks: settings that work but are likely
//! to exhaust rate limits or produce very long runs, and missing
//! credentials detected by outer layers.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A value could not be interpreted (unknown enum name, empty model id).
    InvalidValue,
    /// More rounds than recommended.
    ManyRounds,
    /// More queries per agent than recommended.
    ManyQueries,
    /// More fragments per agent than recommended.
    ManyFragments,
    /// No token for the completion backend; every synthesis will fall back.
    MissingCompletionToken,
    /// No key for the search backend; research will return nothing.
    MissingSearchKey,
}

/// A detected configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

const RECOMMENDED_MAX_ROUNDS: usize = 10;
const RECOMMENDED_MAX_QUERIES: usize = 5;
const RECOMMENDED_MAX_FRAGMENTS: usize = 15;

/// Warnings for limits above their recommended ceilings
pub fn limit_warnings(
    max_rounds: usize,
    max_queries_per_agent: usize,
    max_fragments_per_agent: usize,
) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if max_rounds > RECOMMENDED_MAX_ROUNDS {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::ManyRounds,
            format!(
                "max_rounds = {max_rounds} is above {RECOMMENDED_MAX_ROUNDS}; the debate may take a long time"
            ),
        ));
    }
    if max_queries_per_agent > RECOMMENDED_MAX_QUERIES {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::ManyQueries,
            format!(
                "max_queries_per_agent = {max_queries_per_agent} is above {RECOMMENDED_MAX_QUERIES}; search rate limits may be hit"
            ),
        ));
    }
    if max_fragments_per_agent > RECOMMENDED_MAX_FRAGMENTS {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::ManyFragments,
            format!(
                "max_fragments_per_agent = {max_fragments_per_agent} is above {RECOMMENDED_MAX_FRAGMENTS}; prompts may grow large"
            ),
        ));
    }
    issues
}
