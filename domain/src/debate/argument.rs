//! Arguments and the rhetorical strategies used to synthesize them.

use crate::core::team::Team;
use serde::{Deserialize, Serialize};

/// Words in an opponent's text that signal a direct attack
const ATTACK_WORDS: &[&str] = &["false", "incorrect", "wrong", "refute", "flawed", "misleading"];

/// Rhetorical stance requested from the supervisor model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStrategy {
    InitialPosition,
    Reinforcement,
    CounterAttack,
    Defensive,
    Closing,
}

impl ArgumentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentStrategy::InitialPosition => "initial_position",
            ArgumentStrategy::Reinforcement => "reinforcement",
            ArgumentStrategy::CounterAttack => "counter_attack",
            ArgumentStrategy::Defensive => "defensive",
            ArgumentStrategy::Closing => "closing",
        }
    }

    /// Strategy for the ARGUMENT phase of `round`.
    ///
    /// `opponent_revealed` is true once an exchange from an earlier round
    /// has been revealed to this team.
    pub fn for_argument(round: usize, max_rounds: usize, opponent_revealed: bool) -> Self {
        if round <= 1 {
            ArgumentStrategy::InitialPosition
        } else if round == max_rounds {
            ArgumentStrategy::Closing
        } else if opponent_revealed {
            ArgumentStrategy::CounterAttack
        } else {
            ArgumentStrategy::Reinforcement
        }
    }

    /// Strategy for answering the opponent's just-revealed argument.
    ///
    /// `revealed_so_far` counts opponent arguments seen, including this one.
    pub fn for_rebuttal(
        opponent_text: &str,
        revealed_so_far: usize,
        round: usize,
        max_rounds: usize,
    ) -> Self {
        let lowered = opponent_text.to_lowercase();
        if ATTACK_WORDS.iter().any(|w| lowered.contains(w)) {
            return ArgumentStrategy::CounterAttack;
        }
        if revealed_so_far <= 1 {
            return ArgumentStrategy::Reinforcement;
        }
        if round + 1 >= max_rounds {
            return ArgumentStrategy::Defensive;
        }
        ArgumentStrategy::CounterAttack
    }

    /// Instructions appended to the synthesis prompt
    pub fn instructions(&self) -> &'static str {
        match self {
            ArgumentStrategy::InitialPosition => {
                "Build a SOLID opening argument that states the team position clearly.\n\
                 1. Present the position in a clear and convincing way\n\
                 2. Use the available evidence strategically\n\
                 3. Include specific data and cite sources by their [id]\n\
                 4. Write between 200 and 400 words"
            }
            ArgumentStrategy::Reinforcement => {
                "Build a REINFORCEMENT argument.\n\
                 1. Extend and deepen the team's earlier position\n\
                 2. Add new evidence and perspectives\n\
                 3. Strengthen the weakest points and anticipate counterattacks\n\
                 4. Write between 200 and 400 words"
            }
            ArgumentStrategy::CounterAttack => {
                "Build a COUNTERATTACK.\n\
                 1. Identify the weaknesses of the opponent's argument\n\
                 2. Use your evidence to refute it directly\n\
                 3. Strengthen your own position while staying professional\n\
                 4. Write between 200 and 400 words"
            }
            ArgumentStrategy::Defensive => {
                "Build a solid DEFENCE.\n\
                 1. Hold the original position firmly\n\
                 2. Answer the specific criticisms received\n\
                 3. Show why the objections do not hold, using the evidence\n\
                 4. Write between 200 and 400 words"
            }
            ArgumentStrategy::Closing => {
                "Build a CLOSING argument.\n\
                 1. Summarize the strongest points of your position\n\
                 2. Show why your team has won the debate\n\
                 3. Be concise and leave a strong final impression\n\
                 4. Write between 150 and 300 words"
            }
        }
    }
}

impl std::fmt::Display for ArgumentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an argument's text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentOrigin {
    /// Written by the supervisor's language model
    Synthesized,
    /// Templated from evidence after synthesis failed
    Fallback,
}

/// A team's argument (or rebuttal) for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub team: Team,
    pub round: usize,
    pub text: String,
    /// Ids of fragments the argument relied on, in selection order
    pub cited: Vec<String>,
    /// Self-reported confidence in [0, 1]
    pub confidence: f64,
    pub strategy: ArgumentStrategy,
    pub key_points: Vec<String>,
    pub origin: ArgumentOrigin,
}

impl Argument {
    pub fn new(
        team: Team,
        round: usize,
        text: impl Into<String>,
        cited: Vec<String>,
        confidence: f64,
        strategy: ArgumentStrategy,
        origin: ArgumentOrigin,
    ) -> Self {
        let text = text.into();
        let key_points = super::text::extract_key_points(&text);
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            team,
            round,
            text,
            cited,
            confidence,
            strategy,
            key_points,
            origin,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == ArgumentOrigin::Fallback
    }
}
