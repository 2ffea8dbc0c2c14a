//! Infrastructure layer for debate-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod completion;
pub mod config;
mod http;
pub mod logging;
pub mod search;

// Re-export commonly used types
pub use completion::GitHubModelsGateway;
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, SearchProvider};
pub use logging::JsonlDebateLogger;
pub use search::{CachedSearch, DuckDuckGoSearch, SearchBackend, TavilySearch};
