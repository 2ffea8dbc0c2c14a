//! Errors shared by the external service ports
//!
//! Both the completion and the search backends classify failures the same
//! way so the retry helper can treat them uniformly.

use std::time::Duration;
use thiserror::Error;

/// Failure of an external completion or search call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Transient failure: {0}")]
    Transient(String),

    #[error("Rate limited by service")]
    RateLimited {
        /// Server-provided hint for the next attempt
        retry_after: Option<Duration>,
    },

    #[error("Timeout")]
    Timeout,

    #[error("Permanent failure: {0}")]
    Permanent(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Transient, rate-limited and timed-out calls are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ServiceError::Transient(_) | ServiceError::RateLimited { .. } | ServiceError::Timeout
        )
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ServiceError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}
