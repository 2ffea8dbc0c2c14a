//! Round scoring and the final decision rule.

pub mod engine;

pub use engine::{RoundScore, ScoringEngine, TeamScores, Winner};
