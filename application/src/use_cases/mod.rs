//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod research_agent;
pub mod run_debate;
pub(crate) mod shared;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod testing;
