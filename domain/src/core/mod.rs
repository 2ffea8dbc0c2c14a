//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: language models available to supervisors and agents
//! - [`team::Team`]: the two debating sides
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod team;
