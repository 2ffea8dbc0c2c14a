//! Execution parameters: timeouts, retries and the stopping rule.
//!
//! [`ExecutionParams`] groups the runtime parameters of
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase).
//! These are application-layer concerns, not domain policy.

use super::retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When a debate may end before `max_rounds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EarlyStop {
    /// Always play every round
    #[default]
    Never,
    /// Stop after a round in which both stores hold fewer than `min_fragments`
    InsufficientEvidence { min_fragments: usize },
}

impl EarlyStop {
    pub fn should_stop(&self, pro_fragments: usize, contra_fragments: usize) -> bool {
        match self {
            EarlyStop::Never => false,
            EarlyStop::InsufficientEvidence { min_fragments } => {
                pro_fragments < *min_fragments && contra_fragments < *min_fragments
            }
        }
    }
}

/// Runtime control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Bound on one team's RESEARCH phase; unfinished agents are cancelled.
    pub research_timeout: Duration,
    /// Bound on one synthesis call (argument or rebuttal), retries included.
    pub synthesis_timeout: Duration,
    /// Retry policy for completion and search calls.
    pub retry: RetryPolicy,
    pub early_stop: EarlyStop,
    /// Let research agents ask the research model for search queries.
    /// Role templates are used when this is off or the call fails.
    pub query_writing: bool,
    /// Bound on one query-writing call; it is never retried.
    pub query_timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            research_timeout: Duration::from_secs(120),
            synthesis_timeout: Duration::from_secs(90),
            retry: RetryPolicy::default(),
            early_stop: EarlyStop::Never,
            query_writing: true,
            query_timeout: Duration::from_secs(30),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_research_timeout(mut self, timeout: Duration) -> Self {
        self.research_timeout = timeout;
        self
    }

    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_early_stop(mut self, early_stop: EarlyStop) -> Self {
        self.early_stop = early_stop;
        self
    }

    pub fn with_query_writing(mut self, enabled: bool) -> Self {
        self.query_writing = enabled;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}
