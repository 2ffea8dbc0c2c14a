//! Tavily web search adapter.
//!
//! Tavily returns ranked web results with a content extract per page, which
//! maps directly onto [`SearchHit`]. An API key is required; without one
//! every call fails permanently and research degrades to no evidence.

use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use debate_application::{SearchHit, SearchService, ServiceError};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Tavily search endpoint
const TAVILY_API_URL: &str = "https://api.tavily.com/search";

pub struct TavilySearch {
    client: reqwest::Client,
    api_key: Option<String>,
    max_results: usize,
}

impl TavilySearch {
    pub fn new(
        api_key: Option<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            max_results,
        })
    }
}

#[async_trait]
impl SearchService for TavilySearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        let Some(api_key) = &self.api_key else {
            return Err(ServiceError::Permanent(
                "Tavily API key is not configured".to_string(),
            ));
        };

        let response = self
            .client
            .post(TAVILY_API_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "query": query,
                "max_results": self.max_results,
                "search_depth": "basic",
            }))
            .send()
            .await
            .map_err(request_error)?;

        let body: Value = check_status(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;

        let hits = parse_results(&body, self.max_results)?;
        debug!("Tavily returned {} result(s) for '{}'", hits.len(), query);
        Ok(hits)
    }
}

/// Convert a Tavily response body into hits.
///
/// Results without any content are skipped; a body without a `results`
/// array is an invalid response.
fn parse_results(body: &Value, max_results: usize) -> Result<Vec<SearchHit>, ServiceError> {
    let results = body["results"].as_array().ok_or_else(|| {
        ServiceError::InvalidResponse("Tavily response has no results array".to_string())
    })?;

    Ok(results
        .iter()
        .filter_map(|r| {
            let snippet = r["content"]
                .as_str()
                .or_else(|| r["snippet"].as_str())
                .unwrap_or("")
                .trim();
            if snippet.is_empty() {
                return None;
            }
            Some(SearchHit::new(
                r["url"].as_str().unwrap_or(""),
                r["title"].as_str().unwrap_or(""),
                snippet,
            ))
        })
        .take(max_results)
        .collect())
}
