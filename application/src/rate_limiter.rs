//! Minimum-spacing rate limiter for external service calls.
//!
//! One instance exists per service class (completion, search) and is shared
//! by every agent and supervisor through an `Arc`. Grants are spaced by at
//! least `min_delay`; waiters are served in arrival order because the
//! internal `tokio::sync::Mutex` is fair and is held while sleeping.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

#[derive(Debug)]
pub struct RateLimiter {
    name: &'static str,
    min_delay: Duration,
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, min_delay: Duration) -> Self {
        Self {
            name,
            min_delay,
            last_grant: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait until a call is allowed. Never fails.
    pub async fn acquire(&self) {
        let mut last_grant = self.last_grant.lock().await;
        if let Some(previous) = *last_grant {
            let ready_at = previous + self.min_delay;
            if ready_at > Instant::now() {
                trace!(limiter = self.name, "waiting for rate limit slot");
                sleep_until(ready_at).await;
            }
        }
        *last_grant = Some(Instant::now());
    }
}
