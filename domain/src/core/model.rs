//! Model value object representing a hosted language model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language models reachable through the completion backend (Value Object)
///
/// Identifiers follow the GitHub Models catalogue. Anything else is kept
/// verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt41Nano,
    Gpt41Mini,
    Gpt41,
    Gpt4o,
    Gpt4oMini,
    Llama4Scout,
    MistralNemo,
    MistralSmall,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Llama4Scout => "Llama-4-Scout-17B-16E-Instruct",
            Model::MistralNemo => "Mistral-Nemo",
            Model::MistralSmall => "Mistral-small",
            Model::Custom(s) => s,
        }
    }

    /// Resolve an identifier, falling back to [`Model::Custom`]
    pub fn from_id(id: &str) -> Self {
        match id {
            "gpt-4.1-nano" => Model::Gpt41Nano,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "Llama-4-Scout-17B-16E-Instruct" => Model::Llama4Scout,
            "Mistral-Nemo" => Model::MistralNemo,
            "Mistral-small" => Model::MistralSmall,
            other => Model::Custom(other.to_string()),
        }
    }

    /// Default model for the PRO supervisor
    pub fn default_pro_supervisor() -> Model {
        Model::Gpt41Nano
    }

    /// Default model for the CONTRA supervisor
    pub fn default_contra_supervisor() -> Model {
        Model::Llama4Scout
    }

    /// Default model for research agents
    pub fn default_research_agent() -> Model {
        Model::MistralNemo
    }

    /// A custom identifier that is empty or whitespace cannot be routed
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_id(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_id(&s))
    }
}
