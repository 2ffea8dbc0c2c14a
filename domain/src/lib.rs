//! Domain layer for debate-arena
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Two teams, PRO and CONTRA, each led by a supervisor with a group of
//! research agents, argue a topic over a fixed number of rounds:
//!
//! - **Evidence**: snippets found by research agents, deduplicated per team
//! - **Arguments**: synthesized by supervisors from their own evidence only
//! - **Scoring**: a deterministic, weighted rule accumulated across rounds
//!
//! ## Phases
//!
//! `INIT → RESEARCH → ARGUMENT → REBUTTAL → SCORE → (RESEARCH | DECISION)`

pub mod config;
pub mod core;
pub mod debate;
pub mod evidence;
pub mod prompt;
pub mod scoring;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity, limit_warnings};
pub use core::{error::DomainError, model::Model, team::Team};
pub use debate::{
    argument::{Argument, ArgumentOrigin, ArgumentStrategy},
    config::{DebateConfig, DebateConfigBuilder, DebateLimits, DebateModels, ScoringConfig},
    degradation::{Degradation, DegradationKind, DegradationLevel},
    role::{AgentRole, RoleProfile},
    state::{DebatePhase, DebateResult, DebateState, RoundResult, TeamSummary},
    text::{
        extract_key_points, is_substantial, parse_confidence, parse_queries, strip_confidence,
    },
};
pub use evidence::{EvidenceFragment, EvidenceStore, FragmentError, FragmentKey, RelevanceBrief};
pub use prompt::{DebatePromptTemplate, SynthesisContext};
pub use scoring::{RoundScore, ScoringEngine, TeamScores, Winner};
