//! Log destinations from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of debate events
    pub debate_log: Option<PathBuf>,
    /// Directory for daily diagnostic log files
    pub log_dir: Option<PathBuf>,
}
