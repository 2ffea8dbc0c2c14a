//! Application layer for debate-arena
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod rate_limiter;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EarlyStop, ExecutionParams, RetryPolicy};
pub use ports::{
    completion::CompletionGateway,
    debate_logger::{DebateEvent, DebateLogger, NoDebateLogger},
    progress::{DebateProgressNotifier, NoProgress},
    search::{SearchHit, SearchService},
    service_error::ServiceError,
};
pub use rate_limiter::RateLimiter;
pub use use_cases::research_agent::{QueryWriter, ResearchAgent, ResearchBrief, ResearchReport};
pub use use_cases::run_debate::{RunDebateError, RunDebateUseCase};
pub use use_cases::supervisor::{Supervisor, SupervisorServices, evidence_confidence};
