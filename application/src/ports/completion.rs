//! Completion gateway port
//!
//! Defines the interface for asking a language model to write text.

use super::service_error::ServiceError;
use async_trait::async_trait;
use debate_domain::Model;

/// Gateway for text completion
///
/// Implementations must be retry-safe: calling `complete` again after a
/// failure has no side effects beyond the new request.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Complete `prompt` with `model`, using `role_context` as the system prompt
    async fn complete(
        &self,
        model: &Model,
        role_context: &str,
        prompt: &str,
    ) -> Result<String, ServiceError>;
}
