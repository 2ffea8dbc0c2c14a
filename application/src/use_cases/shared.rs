//! Shared utilities for use cases.
//!
//! Contains the rate-limited retry loop used for every completion and
//! search call.

use crate::config::RetryPolicy;
use crate::ports::service_error::ServiceError;
use crate::rate_limiter::RateLimiter;
use std::future::Future;
use tracing::{debug, warn};

/// Run `call` under `limiter`, retrying retryable failures with backoff.
///
/// The limiter is acquired before every attempt, so retries never bypass
/// the spacing shared with other callers. A server `Retry-After` hint can
/// lengthen a delay up to `policy.max_backoff` but never past it. Permanent
/// failures return immediately.
pub(crate) async fn call_with_retry<T, F, Fut>(
    limiter: &RateLimiter,
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let mut attempt: u32 = 1;
    loop {
        limiter.acquire().await;
        match call().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation, attempt, "call succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() && policy.should_retry(attempt) => {
                let hint = e.retry_after().unwrap_or_default().min(policy.max_backoff);
                let delay = policy.backoff(attempt).max(hint);
                warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    "{} failed: {}; retrying in {:?}",
                    operation,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
