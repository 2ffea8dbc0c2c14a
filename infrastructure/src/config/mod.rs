//! Configuration file loading for debate-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `DEBATE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/debate-arena/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_COMPLETION_ENDPOINT, FileCompletionConfig, FileConfig, FileDebateConfig,
    FileExecutionConfig, FileLimitsConfig, FileLoggingConfig, FileModelsConfig, FileOutputConfig,
    FileScoringConfig, FileSearchConfig, SearchProvider,
};
pub use loader::ConfigLoader;
