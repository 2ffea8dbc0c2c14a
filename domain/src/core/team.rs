//! The two sides of a debate

use serde::{Deserialize, Serialize};

/// A debating side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Pro,
    Contra,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Pro, Team::Contra];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Pro => "pro",
            Team::Contra => "contra",
        }
    }

    /// Upper-case label used in prompts and reports
    pub fn label(&self) -> &'static str {
        match self {
            Team::Pro => "PRO",
            Team::Contra => "CONTRA",
        }
    }

    pub fn opponent(&self) -> Team {
        match self {
            Team::Pro => Team::Contra,
            Team::Contra => Team::Pro,
        }
    }

    /// Research stance appended to agent briefs
    pub fn stance(&self) -> &'static str {
        match self {
            Team::Pro => "seek supporting evidence",
            Team::Contra => "seek opposing evidence",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
