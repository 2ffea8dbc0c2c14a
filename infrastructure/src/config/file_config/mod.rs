//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod completion;
mod debate;
mod execution;
mod limits;
mod logging;
mod models;
mod output;
mod scoring;
mod search;

pub use completion::{DEFAULT_COMPLETION_ENDPOINT, FileCompletionConfig};
pub use debate::FileDebateConfig;
pub use execution::FileExecutionConfig;
pub use limits::FileLimitsConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use scoring::FileScoringConfig;
pub use search::{FileSearchConfig, SearchProvider};

use debate_domain::{ConfigIssue, ConfigIssueCode, DebateConfig, DomainError, limit_warnings};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Rounds, agents and optional default positions
    pub debate: FileDebateConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Research and synthesis limits
    pub limits: FileLimitsConfig,
    /// Scoring weights and constants
    pub scoring: FileScoringConfig,
    /// Timeouts, retries and early stop
    pub execution: FileExecutionConfig,
    /// Completion backend
    pub completion: FileCompletionConfig,
    /// Search backend
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Empty model names and unknown enum values
    /// 2. Debate settings the domain would reject
    /// 3. Limits above their recommended ceilings
    /// 4. Missing credentials
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.validate_settings();
        issues.extend(self.credential_issues());
        issues
    }

    /// Everything in [`validate`](Self::validate) that does not read the environment
    pub fn validate_settings(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Parse validation
        issues.extend(self.models.to_models().1);
        issues.extend(self.execution.validate());
        issues.extend(self.search.parse_provider().1);

        // 2. Domain rules, checked with placeholder positions
        if let Err(e) = self.to_debate_config("topic", "pro", "contra") {
            issues.push(ConfigIssue::error(ConfigIssueCode::InvalidValue, e.to_string()));
        }

        // 3. Soft limits
        issues.extend(limit_warnings(
            self.debate.max_rounds,
            self.limits.max_queries_per_agent,
            self.limits.max_fragments_per_agent,
        ));

        issues
    }

    /// Warnings for credentials that are not set
    pub fn credential_issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.completion.token().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingCompletionToken,
                format!(
                    "{} is not set; every argument will use the evidence template",
                    self.completion.token_env
                ),
            ));
        }
        if self.search.parse_provider().0 == Some(SearchProvider::Tavily)
            && self.search.api_key().is_none()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingSearchKey,
                format!(
                    "{} is not set; research will find no evidence",
                    self.search.api_key_env
                ),
            ));
        }
        issues
    }

    /// Build the validated domain configuration for one debate
    pub fn to_debate_config(
        &self,
        topic: &str,
        pro_position: &str,
        contra_position: &str,
    ) -> Result<DebateConfig, DomainError> {
        let (models, _) = self.models.to_models();
        DebateConfig::builder(topic, pro_position, contra_position)
            .with_max_rounds(self.debate.max_rounds)
            .with_agents_per_team(self.debate.agents_per_team)
            .with_models(models)
            .with_limits(self.limits.to_limits())
            .with_scoring(self.scoring.to_scoring())
            .build()
    }
}

/// Value of an environment variable holding a secret.
///
/// Unset, blank and template placeholder values (`your_..._here`) count as
/// missing.
pub(crate) fn env_secret(var: &str) -> Option<String> {
    let value = std::env::var(var).ok()?;
    let value = value.trim();
    let placeholder = value.starts_with("your_") && value.ends_with("_here");
    if value.is_empty() || placeholder {
        None
    } else {
        Some(value.to_string())
    }
}
