//! Application-level configuration.
//!
//! - [`ExecutionParams`]: timeouts, retries and the early-stop rule
//! - [`RetryPolicy`]: bounded exponential backoff for service calls

pub mod execution_params;
pub mod retry_policy;

pub use execution_params::{EarlyStop, ExecutionParams};
pub use retry_policy::RetryPolicy;
