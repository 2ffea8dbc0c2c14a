//! Memoizing search decorator.
//!
//! Agents of different roles and rounds often issue the same query. Cached
//! results are kept for the lifetime of the process; failures are never
//! cached so a later call can still succeed.

use async_trait::async_trait;
use debate_application::{SearchHit, SearchService, ServiceError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

pub struct CachedSearch<S> {
    inner: S,
    entries: Mutex<HashMap<String, Vec<SearchHit>>>,
    hits: AtomicUsize,
}

impl<S: SearchService> CachedSearch<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
        }
    }

    /// Number of queries answered from the cache
    pub fn cache_hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of distinct queries cached
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<Vec<SearchHit>> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

/// Case and whitespace insensitive cache key
fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl<S: SearchService> SearchService for CachedSearch<S> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        let key = normalize(query);
        if let Some(cached) = self.lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("Search cache hit for '{}'", key);
            return Ok(cached);
        }

        let results = self.inner.search(query).await?;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, results.clone());
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSearch {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSearch {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SearchService for CountingSearch {
        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ServiceError::Transient("down".to_string()));
            }
            Ok(vec![SearchHit::new("https://example.com", query, "snippet text")])
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  AI   in the\tWorkplace "), "ai in the workplace");
    }

    #[tokio::test]
    async fn test_repeated_queries_hit_cache() {
        let cached = CachedSearch::new(CountingSearch::new(false));
        let first = cached.search("AI workplace").await.unwrap();
        let second = cached.search("ai  WORKPLACE").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.cache_hits(), 1);
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cached = CachedSearch::new(CountingSearch::new(true));
        assert!(cached.search("q").await.is_err());
        assert!(cached.search("q").await.is_err());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
        assert!(cached.is_empty());
    }
}
