//! Research and synthesis limits from TOML (`[limits]` section)

use debate_domain::DebateLimits;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw limits from TOML
///
/// Delays are given in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub max_fragments_per_agent: usize,
    pub max_queries_per_agent: usize,
    pub min_delay_between_calls_ms: u64,
    pub min_delay_between_searches_ms: u64,
    pub evidence_top_k: usize,
    pub min_relevance: f64,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        let limits = DebateLimits::default();
        Self {
            max_fragments_per_agent: limits.max_fragments_per_agent,
            max_queries_per_agent: limits.max_queries_per_agent,
            min_delay_between_calls_ms: limits.min_delay_between_calls.as_millis() as u64,
            min_delay_between_searches_ms: limits.min_delay_between_searches.as_millis() as u64,
            evidence_top_k: limits.evidence_top_k,
            min_relevance: limits.min_relevance,
        }
    }
}

impl FileLimitsConfig {
    pub fn to_limits(&self) -> DebateLimits {
        DebateLimits {
            max_fragments_per_agent: self.max_fragments_per_agent,
            max_queries_per_agent: self.max_queries_per_agent,
            min_delay_between_calls: Duration::from_millis(self.min_delay_between_calls_ms),
            min_delay_between_searches: Duration::from_millis(self.min_delay_between_searches_ms),
            evidence_top_k: self.evidence_top_k,
            min_relevance: self.min_relevance,
        }
    }
}
