//! Scripted service doubles shared by the use case tests.

use crate::ports::completion::CompletionGateway;
use crate::ports::search::{SearchHit, SearchService};
use crate::ports::service_error::ServiceError;
use async_trait::async_trait;
use debate_domain::Model;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Returns the same snippets for every query and records each query
#[derive(Clone)]
pub(crate) struct FixedSearch {
    hits: Vec<SearchHit>,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FixedSearch {
    /// Three fixed snippets about AI at work
    pub(crate) fn workplace() -> Self {
        Self {
            hits: vec![
                SearchHit::new(
                    "https://example.com/ai-productivity",
                    "AI boosts productivity",
                    "Firms adopting AI tools in the workplace reported productivity gains of 14 percent.",
                ),
                SearchHit::new(
                    "https://example.org/ai-jobs",
                    "Automation and jobs",
                    "Automation may displace routine jobs, raising concerns about job losses and wage pressure.",
                ),
                SearchHit::new(
                    "https://example.net/ai-wellbeing",
                    "Worker wellbeing",
                    "Surveys link workplace AI to reduced repetitive strain but higher monitoring stress.",
                ),
            ],
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received, in call order
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchService for FixedSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.hits.clone())
    }
}

/// Returns `per_call` snippets never seen before on every call
#[derive(Clone)]
pub(crate) struct UniqueSearch {
    per_call: usize,
    served: Arc<AtomicUsize>,
}

impl UniqueSearch {
    pub(crate) fn new(per_call: usize) -> Self {
        Self {
            per_call,
            served: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl SearchService for UniqueSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        let first = self.served.fetch_add(self.per_call, Ordering::SeqCst);
        Ok((first..first + self.per_call)
            .map(|n| {
                SearchHit::new(
                    format!("https://example.com/study-{n}"),
                    format!("Workplace study {n}"),
                    format!("Study {n} finds that AI in the workplace changes productivity and work."),
                )
            })
            .collect())
    }
}

/// Fails every call
#[derive(Clone)]
pub(crate) struct FailingSearch {
    error: ServiceError,
    calls: Arc<AtomicUsize>,
}

impl FailingSearch {
    pub(crate) fn transient() -> Self {
        Self {
            error: ServiceError::Transient("search backend unavailable".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchService for FailingSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Replays scripted responses in order, then returns empty results
pub(crate) struct ScriptedSearch {
    responses: Mutex<VecDeque<Result<Vec<SearchHit>, ServiceError>>>,
}

impl ScriptedSearch {
    pub(crate) fn new(responses: Vec<Result<Vec<SearchHit>, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl SearchService for ScriptedSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ServiceError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Writes a well-formed argument whose confidence is derived from the
/// prompt length. Query-writing prompts get two queries built from the
/// prompt's POSITION line. Every prompt it receives is recorded.
#[derive(Clone, Default)]
pub(crate) struct EchoCompletion {
    prompts: Arc<Mutex<Vec<(String, String)>>>,
    models: Arc<Mutex<Vec<Model>>>,
}

impl EchoCompletion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `(role_context, prompt)` pairs in call order
    pub(crate) fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    /// Model of every call, in call order
    pub(crate) fn models(&self) -> Vec<Model> {
        self.models.lock().unwrap().clone()
    }

    /// Prompts other than query-writing requests
    pub(crate) fn synthesis_prompts(&self) -> Vec<(String, String)> {
        self.prompts()
            .into_iter()
            .filter(|(ctx, _)| !Self::is_query_request(ctx))
            .collect()
    }

    fn is_query_request(role_context: &str) -> bool {
        role_context.contains("search queries only")
    }

    pub(crate) fn confidence_for(prompt: &str) -> f64 {
        (prompt.len() % 1000) as f64 / 1000.0
    }
}

#[async_trait]
impl CompletionGateway for EchoCompletion {
    async fn complete(
        &self,
        model: &Model,
        role_context: &str,
        prompt: &str,
    ) -> Result<String, ServiceError> {
        self.models.lock().unwrap().push(model.clone());
        self.prompts
            .lock()
            .unwrap()
            .push((role_context.to_string(), prompt.to_string()));
        if Self::is_query_request(role_context) {
            let position = prompt
                .lines()
                .find_map(|l| l.strip_prefix("POSITION: "))
                .unwrap_or("the topic")
                .to_lowercase();
            return Ok(format!("1. {position} evidence\n2. {position} statistics"));
        }
        Ok(format!(
            "Our team stands by its position on this topic. \
             The evidence we gathered points clearly in one direction. \
             The opposing side has not answered the core findings. \
             This reply answers a prompt of {} characters.\nCONFIDENCE: {:.3}",
            prompt.len(),
            Self::confidence_for(prompt)
        ))
    }
}

/// Fails every call with the given error
pub(crate) struct FailingCompletion {
    error: ServiceError,
    calls: AtomicUsize,
}

impl FailingCompletion {
    pub(crate) fn new(error: ServiceError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionGateway for FailingCompletion {
    async fn complete(
        &self,
        _model: &Model,
        _role_context: &str,
        _prompt: &str,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Returns a fixed reply
pub(crate) struct FixedCompletion(pub(crate) String);

#[async_trait]
impl CompletionGateway for FixedCompletion {
    async fn complete(
        &self,
        _model: &Model,
        _role_context: &str,
        _prompt: &str,
    ) -> Result<String, ServiceError> {
        Ok(self.0.clone())
    }
}

/// Never answers within any reasonable timeout
pub(crate) struct StalledCompletion;

#[async_trait]
impl CompletionGateway for StalledCompletion {
    async fn complete(
        &self,
        _model: &Model,
        _role_context: &str,
        _prompt: &str,
    ) -> Result<String, ServiceError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(String::new())
    }
}
