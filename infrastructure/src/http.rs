//! Shared HTTP plumbing for the completion and search adapters.
//!
//! Maps transport failures and HTTP statuses onto [`ServiceError`] so the
//! application's retry loop can tell transient from permanent failures.

use debate_application::ServiceError;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("debate-arena/", env!("CARGO_PKG_VERSION"));

/// Longest error body quoted in a [`ServiceError`] message
const MAX_ERROR_BODY_CHARS: usize = 300;

pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Classify a failed request
pub(crate) fn request_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else if e.is_decode() {
        ServiceError::InvalidResponse(e.to_string())
    } else if e.is_builder() {
        ServiceError::Permanent(e.to_string())
    } else {
        ServiceError::Transient(e.to_string())
    }
}

/// Classify an HTTP status.
///
/// 429 is rate limiting, 408 a timeout, 5xx transient and any other
/// non-success status permanent.
pub(crate) fn status_error(
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> ServiceError {
    let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    let message = if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), body)
    };
    match status {
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited { retry_after },
        StatusCode::REQUEST_TIMEOUT => ServiceError::Timeout,
        s if s.is_server_error() => ServiceError::Transient(message),
        _ => ServiceError::Permanent(message),
    }
}

/// Pass successful responses through; turn the rest into a [`ServiceError`]
pub(crate) async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, retry_after, &body))
}
