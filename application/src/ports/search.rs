//! Web search port

use super::service_error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// URL or other stable identifier of the source
    pub source_id: String,
    pub title: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(
        source_id: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Web search backend
///
/// An empty result list is a valid answer, not an error.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError>;
}
