//! Completion backend from TOML (`[completion]` section)

use super::env_secret;
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint (GitHub Models)
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://models.inference.ai.azure.com";

/// Raw completion backend settings from TOML
///
/// # Example
///
/// ```toml
/// [completion]
/// endpoint = "https://models.inference.ai.azure.com"
/// token_env = "GITHUB_TOKEN"
/// temperature = 0.7
/// max_tokens = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// Base URL; `/chat/completions` is appended
    pub endpoint: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            request_timeout_secs: 60,
        }
    }
}

impl FileCompletionConfig {
    /// Token read from `token_env`, if set to a real value
    pub fn token(&self) -> Option<String> {
        env_secret(&self.token_env)
    }
}
