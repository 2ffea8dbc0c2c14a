//! Search adapters implementing the [`SearchService`] port.
//!
//! - [`TavilySearch`]: ranked web results, needs an API key
//! - [`DuckDuckGoSearch`]: instant answers, no key
//! - [`CachedSearch`]: memoizing decorator for either backend

mod cache;
mod duckduckgo;
mod tavily;

pub use cache::CachedSearch;
pub use duckduckgo::DuckDuckGoSearch;
pub use tavily::TavilySearch;

use crate::config::{FileSearchConfig, SearchProvider};
use async_trait::async_trait;
use debate_application::{SearchHit, SearchService, ServiceError};
use std::time::Duration;

/// The search backend selected in `[search]`
pub enum SearchBackend {
    Tavily(TavilySearch),
    DuckDuckGo(DuckDuckGoSearch),
}

impl SearchBackend {
    /// Build the backend named by `provider`, reading its key from the environment
    pub fn from_config(
        provider: SearchProvider,
        config: &FileSearchConfig,
    ) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(match provider {
            SearchProvider::Tavily => SearchBackend::Tavily(TavilySearch::new(
                config.api_key(),
                config.max_results,
                timeout,
            )?),
            SearchProvider::DuckDuckGo => {
                SearchBackend::DuckDuckGo(DuckDuckGoSearch::new(config.max_results, timeout)?)
            }
        })
    }

    pub fn provider(&self) -> SearchProvider {
        match self {
            SearchBackend::Tavily(_) => SearchProvider::Tavily,
            SearchBackend::DuckDuckGo(_) => SearchProvider::DuckDuckGo,
        }
    }
}

#[async_trait]
impl SearchService for SearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        match self {
            SearchBackend::Tavily(search) => search.search(query).await,
            SearchBackend::DuckDuckGo(search) => search.search(query).await,
        }
    }
}
