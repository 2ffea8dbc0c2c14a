//! Debate shape from TOML (`[debate]` section)

use serde::{Deserialize, Serialize};

/// Raw debate settings from TOML
///
/// # Example
///
/// ```toml
/// [debate]
/// max_rounds = 3
/// agents_per_team = 5
/// topic = "AI in the workplace"
/// pro_position = "AI makes work more productive"
/// contra_position = "AI erodes job security"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub max_rounds: usize,
    pub agents_per_team: usize,
    /// Default topic when none is given on the command line
    pub topic: Option<String>,
    pub pro_position: Option<String>,
    pub contra_position: Option<String>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            agents_per_team: 5,
            topic: None,
            pro_position: None,
            contra_position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debate_config_deserialize() {
        let toml_str = r#"
[debate]
max_rounds = 2
topic = "Remote work"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.max_rounds, 2);
        assert_eq!(config.debate.agents_per_team, 5);
        assert_eq!(config.debate.topic.as_deref(), Some("Remote work"));
        assert!(config.debate.pro_position.is_none());
    }
}
