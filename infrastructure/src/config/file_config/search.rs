//! Search backend from TOML (`[search]` section)

use super::env_secret;
use debate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Supported search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProvider {
    /// Tavily web search; needs an API key
    Tavily,
    /// DuckDuckGo instant answers; no key needed
    DuckDuckGo,
}

impl SearchProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchProvider::Tavily => "tavily",
            SearchProvider::DuckDuckGo => "duckduckgo",
        }
    }
}

/// Raw search backend settings from TOML
///
/// # Example
///
/// ```toml
/// [search]
/// provider = "tavily"        # or "duckduckgo"
/// api_key_env = "TAVILY_API_KEY"
/// max_results = 5
/// cache = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub provider: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub max_results: usize,
    /// Memoize successful results per query for the whole run
    pub cache: bool,
    pub request_timeout_secs: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            provider: "tavily".to_string(),
            api_key_env: "TAVILY_API_KEY".to_string(),
            max_results: 5,
            cache: true,
            request_timeout_secs: 30,
        }
    }
}

impl FileSearchConfig {
    /// Parse the provider name, collecting issues for unknown values.
    pub fn parse_provider(&self) -> (Option<SearchProvider>, Vec<ConfigIssue>) {
        match self.provider.trim().to_lowercase().as_str() {
            "tavily" => (Some(SearchProvider::Tavily), Vec::new()),
            "duckduckgo" | "ddg" => (Some(SearchProvider::DuckDuckGo), Vec::new()),
            other => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidValue,
                    format!(
                        "search.provider: unknown value '{}' (expected tavily or duckduckgo)",
                        other
                    ),
                )],
            ),
        }
    }

    /// API key read from `api_key_env`, if set to a real value
    pub fn api_key(&self) -> Option<String> {
        env_secret(&self.api_key_env)
    }
}
