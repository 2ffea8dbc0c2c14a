//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion;
pub mod debate_logger;
pub mod progress;
pub mod search;
pub mod service_error;
