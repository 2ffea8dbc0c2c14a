//! Role-based model configuration from TOML (`[models]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, DebateModels, Model};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// pro_supervisor = "gpt-4.1-mini"     # PRO team synthesis
/// contra_supervisor = "gpt-4.1-mini"  # CONTRA team synthesis
/// research_agent = "gpt-4.1-nano"     # Research agents
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for the PRO supervisor
    pub pro_supervisor: Option<String>,
    /// Model for the CONTRA supervisor
    pub contra_supervisor: Option<String>,
    /// Model for research agents
    pub research_agent: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidValue,
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => (Some(Model::from_id(s.trim())), Vec::new()),
        }
    }

    pub fn parse_pro_supervisor(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("pro_supervisor", self.pro_supervisor.as_ref())
    }

    pub fn parse_contra_supervisor(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("contra_supervisor", self.contra_supervisor.as_ref())
    }

    pub fn parse_research_agent(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("research_agent", self.research_agent.as_ref())
    }

    /// Resolve the configured models, filling gaps with defaults.
    pub fn to_models(&self) -> (DebateModels, Vec<ConfigIssue>) {
        let mut models = DebateModels::default();
        let mut issues = Vec::new();

        let (pro, pro_issues) = self.parse_pro_supervisor();
        let (contra, contra_issues) = self.parse_contra_supervisor();
        let (research, research_issues) = self.parse_research_agent();
        issues.extend(pro_issues);
        issues.extend(contra_issues);
        issues.extend(research_issues);

        if let Some(model) = pro {
            models.pro_supervisor = model;
        }
        if let Some(model) = contra {
            models.contra_supervisor = model;
        }
        if let Some(model) = research {
            models.research_agent = model;
        }
        (models, issues)
    }
}
