//! DuckDuckGo Instant Answer search adapter.
//!
//! Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/),
//! which needs no API key. It returns an abstract, a definition and related
//! topics rather than a ranked result list; each of those becomes one hit.

use crate::http::{build_client, check_status, request_error};
use async_trait::async_trait;
use debate_application::{SearchHit, SearchService, ServiceError};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new(max_results: usize, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            max_results,
        })
    }
}

#[async_trait]
impl SearchService for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let body: Value = check_status(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;

        let hits = instant_answer_hits(&body, self.max_results);
        debug!("DuckDuckGo returned {} hit(s) for '{}'", hits.len(), query);
        Ok(hits)
    }
}

/// Extract hits from an Instant Answer body: the abstract, the definition,
/// then related topics (nested topic groups included), up to `max_results`.
fn instant_answer_hits(data: &Value, max_results: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    if let Some(text) = non_empty(&data["AbstractText"]) {
        let title = non_empty(&data["Heading"])
            .or_else(|| non_empty(&data["AbstractSource"]))
            .unwrap_or("Summary");
        hits.push(SearchHit::new(
            data["AbstractURL"].as_str().unwrap_or(""),
            title,
            text,
        ));
    }

    if let Some(definition) = non_empty(&data["Definition"]) {
        let source = non_empty(&data["DefinitionSource"]).unwrap_or("Definition");
        hits.push(SearchHit::new(
            data["DefinitionURL"].as_str().unwrap_or(""),
            source,
            definition,
        ));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics {
            match topic["Topics"].as_array() {
                Some(group) => hits.extend(group.iter().filter_map(related_topic)),
                None => hits.extend(related_topic(topic)),
            }
        }
    }

    hits.truncate(max_results);
    hits
}

fn related_topic(topic: &Value) -> Option<SearchHit> {
    let text = non_empty(&topic["Text"])?;
    // Related topic texts read "Title - description"
    let title = text.split(" - ").next().unwrap_or(text);
    Some(SearchHit::new(
        topic["FirstURL"].as_str().unwrap_or(""),
        title,
        text,
    ))
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}
