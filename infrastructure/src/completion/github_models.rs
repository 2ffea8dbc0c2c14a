//! OpenAI-compatible chat completion gateway.
//!
//! Defaults to the GitHub Models endpoint, which authenticates with a
//! GitHub token. Any server speaking the `/chat/completions` protocol works
//! by changing `[completion] endpoint`.

use crate::config::FileCompletionConfig;
use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use debate_application::{CompletionGateway, ServiceError};
use debate_domain::Model;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub struct GitHubModelsGateway {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    temperature: f64,
    max_tokens: u32,
}

impl GitHubModelsGateway {
    pub fn new(
        endpoint: &str,
        token: Option<String>,
        temperature: f64,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            url: format!("{}/chat/completions", endpoint.trim_end_matches('/')),
            token,
            temperature,
            max_tokens,
        })
    }

    /// Build from `[completion]`, reading the token from the environment
    pub fn from_config(config: &FileCompletionConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.endpoint,
            config.token(),
            config.temperature,
            config.max_tokens,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_body(&self, model: &Model, role_context: &str, prompt: &str) -> Value {
        json!({
            "model": model.as_str(),
            "messages": [
                { "role": "system", "content": role_context },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionGateway for GitHubModelsGateway {
    async fn complete(
        &self,
        model: &Model,
        role_context: &str,
        prompt: &str,
    ) -> Result<String, ServiceError> {
        let Some(token) = &self.token else {
            return Err(ServiceError::Permanent(
                "completion token is not configured".to_string(),
            ));
        };

        debug!(model = %model, "Sending completion request ({} prompt chars)", prompt.len());
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&self.request_body(model, role_context, prompt))
            .send()
            .await
            .map_err(request_error)?;

        let body: Value = check_status(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;
        extract_content(&body)
    }
}

/// Text of the first choice
fn extract_content(body: &Value) -> Result<String, ServiceError> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ServiceError::InvalidResponse("completion response has no choices".to_string())
        })?;
    if content.trim().is_empty() {
        return Err(ServiceError::InvalidResponse(
            "completion response is empty".to_string(),
        ));
    }
    Ok(content.to_string())
}
