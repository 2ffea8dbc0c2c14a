//! Research agent use case
//!
//! One agent runs a bounded number of searches for its role and turns the
//! snippets into scored, deduplicated evidence fragments. Queries come from
//! the research model when a [`QueryWriter`] is attached, topped up or
//! replaced by the role's templates.

use crate::config::RetryPolicy;
use crate::ports::completion::CompletionGateway;
use crate::ports::search::{SearchHit, SearchService};
use crate::ports::service_error::ServiceError;
use crate::rate_limiter::RateLimiter;
use crate::use_cases::shared::call_with_retry;
use debate_domain::{
    AgentRole, DebatePhase, DebatePromptTemplate, Degradation, DegradationKind,
    EvidenceFragment, EvidenceStore, Model, RelevanceBrief, Team, parse_queries,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// What an agent is asked to research
#[derive(Debug, Clone)]
pub struct ResearchBrief {
    pub topic: String,
    pub position: String,
    pub team: Team,
    pub round: usize,
    pub max_queries: usize,
    pub max_fragments: usize,
    pub min_relevance: f64,
    /// Queries the team already ran in earlier rounds
    pub already_run: HashSet<String>,
}

/// Outcome of one agent run
#[derive(Debug, Clone)]
pub struct ResearchReport {
    pub agent_id: String,
    pub role: AgentRole,
    /// Best fragments, relevance descending, at most `max_fragments`
    pub fragments: Vec<EvidenceFragment>,
    /// Queries sent to the search service, in order
    pub queries: Vec<String>,
    pub queries_run: usize,
    pub queries_failed: usize,
    /// Snippets discarded for integrity or relevance reasons
    pub dropped: usize,
    pub degradations: Vec<Degradation>,
}

/// Asks the research model to phrase an agent's search queries
#[derive(Clone)]
pub struct QueryWriter {
    completion: Arc<dyn CompletionGateway>,
    limiter: Arc<RateLimiter>,
    model: Model,
    timeout: Duration,
}

impl QueryWriter {
    pub fn new(
        completion: Arc<dyn CompletionGateway>,
        limiter: Arc<RateLimiter>,
        model: Model,
        timeout: Duration,
    ) -> Self {
        Self {
            completion,
            limiter,
            model,
            timeout,
        }
    }

    /// One attempt, no retries; callers fall back to templates on error
    async fn write(
        &self,
        role: AgentRole,
        brief: &ResearchBrief,
    ) -> Result<Vec<String>, ServiceError> {
        let mut earlier: Vec<&str> = brief.already_run.iter().map(String::as_str).collect();
        earlier.sort_unstable();
        let system = DebatePromptTemplate::query_writer_system(role);
        let prompt = DebatePromptTemplate::query_prompt(
            role,
            &brief.topic,
            &brief.position,
            brief.team,
            brief.max_queries,
            &earlier,
        );

        self.limiter.acquire().await;
        let response = timeout(
            self.timeout,
            self.completion.complete(&self.model, &system, &prompt),
        )
        .await
        .map_err(|_| ServiceError::Timeout)??;
        Ok(parse_queries(&response, brief.max_queries))
    }
}

/// A single specialized research worker
pub struct ResearchAgent<S: SearchService + 'static> {
    id: String,
    role: AgentRole,
    search: Arc<S>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    query_writer: Option<QueryWriter>,
}

impl<S: SearchService + 'static> ResearchAgent<S> {
    pub fn new(
        id: impl Into<String>,
        role: AgentRole,
        search: Arc<S>,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            search,
            limiter,
            retry,
            query_writer: None,
        }
    }

    pub fn with_query_writer(mut self, writer: QueryWriter) -> Self {
        self.query_writer = Some(writer);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// Queries for this run: written ones first, then templates, never
    /// more than `max_queries` and never a query the team already ran
    /// while a fresh template remains.
    async fn plan_queries(&self, brief: &ResearchBrief) -> Vec<String> {
        let templated = self.role.queries(
            &brief.topic,
            &brief.position,
            brief.round,
            brief.max_queries,
            &brief.already_run,
        );
        let Some(writer) = &self.query_writer else {
            return templated;
        };
        if brief.max_queries == 0 {
            return templated;
        }

        let written = match writer.write(self.role, brief).await {
            Ok(written) => written,
            Err(e) => {
                warn!(agent = %self.id, "Query writing failed, using templates: {}", e);
                return templated;
            }
        };
        let mut queries: Vec<String> = written
            .into_iter()
            .filter(|q| !brief.already_run.contains(q))
            .collect();
        if queries.is_empty() {
            debug!(agent = %self.id, "No usable written queries; using templates");
            return templated;
        }
        for query in templated {
            if queries.len() >= brief.max_queries {
                break;
            }
            if !queries.contains(&query) {
                queries.push(query);
            }
        }
        queries
    }

    /// Run the agent. Never fails; problems are reported as degradations.
    pub async fn run(&self, brief: &ResearchBrief) -> ResearchReport {
        let queries = self.plan_queries(brief).await;
        info!(
            agent = %self.id,
            role = %self.role,
            "Researching: {}",
            self.role.brief(&brief.topic, &brief.position, brief.team)
        );

        let relevance = RelevanceBrief {
            topic: &brief.topic,
            position: &brief.position,
            role: self.role,
        };

        let mut report = ResearchReport {
            agent_id: self.id.clone(),
            role: self.role,
            fragments: Vec::new(),
            queries: Vec::new(),
            queries_run: 0,
            queries_failed: 0,
            dropped: 0,
            degradations: Vec::new(),
        };
        let mut found = EvidenceStore::new();

        for query in &queries {
            report.queries_run += 1;
            report.queries.push(query.clone());
            let search = &self.search;
            let query_str = query.as_str();
            let hits = match call_with_retry(&self.limiter, &self.retry, "search", move || {
                search.search(query_str)
            })
            .await
            {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(agent = %self.id, "Query '{}' skipped: {}", query, e);
                    report.queries_failed += 1;
                    report.degradations.push(Degradation::new(
                        brief.round,
                        brief.team,
                        DebatePhase::Research,
                        DegradationKind::SearchFailed,
                        format!("{}: query '{}' failed: {}", self.id, query, e),
                    ));
                    continue;
                }
            };

            debug!(agent = %self.id, "Query '{}' returned {} hit(s)", query, hits.len());
            for hit in hits {
                match self.to_fragment(hit, &relevance, brief) {
                    Some(fragment) => {
                        found.merge(fragment);
                    }
                    None => report.dropped += 1,
                }
            }
        }

        report.fragments = found.top_k(brief.round, 1.0, brief.max_fragments);
        if report.fragments.is_empty() {
            report.degradations.push(Degradation::new(
                brief.round,
                brief.team,
                DebatePhase::Research,
                DegradationKind::NoEvidence,
                format!("{} found no usable evidence", self.id),
            ));
        }

        info!(
            agent = %self.id,
            "Found {} fragment(s) ({} dropped, {}/{} queries failed)",
            report.fragments.len(),
            report.dropped,
            report.queries_failed,
            report.queries_run
        );
        report
    }

    fn to_fragment(
        &self,
        hit: SearchHit,
        relevance: &RelevanceBrief<'_>,
        brief: &ResearchBrief,
    ) -> Option<EvidenceFragment> {
        let score = relevance.score(&hit.source_id, &hit.title, &hit.snippet);
        if score < brief.min_relevance {
            debug!(agent = %self.id, "Dropping {} (relevance {:.2})", hit.source_id, score);
            return None;
        }
        match EvidenceFragment::new(
            hit.source_id,
            hit.title,
            hit.snippet,
            score,
            self.role,
            brief.round,
        ) {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                debug!(agent = %self.id, "Dropping malformed snippet: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{
        FailingCompletion, FailingSearch, FixedCompletion, FixedSearch, ScriptedSearch,
        StalledCompletion,
    };

    fn brief(max_queries: usize, max_fragments: usize) -> ResearchBrief {
        ResearchBrief {
            topic: "AI in the workplace".to_string(),
            position: "AI improves productivity".to_string(),
            team: Team::Pro,
            round: 1,
            max_queries,
            max_fragments,
            min_relevance: 0.0,
            already_run: HashSet::new(),
        }
    }

    fn writer(completion: Arc<dyn CompletionGateway>) -> QueryWriter {
        QueryWriter::new(
            completion,
            Arc::new(RateLimiter::new("completion", Duration::from_millis(10))),
            Model::Gpt41Nano,
            Duration::from_secs(5),
        )
    }

    const TEMPLATED: [&str; 2] = [
        "economic impact ai in the workplace improves productivity",
        "cost benefit analysis ai in the workplace improves productivity",
    ];

    fn agent<S: SearchService + 'static>(search: S) -> ResearchAgent<S> {
        ResearchAgent::new(
            "pro-economic-1",
            AgentRole::Economic,
            Arc::new(search),
            Arc::new(RateLimiter::new("search", Duration::from_millis(10))),
            RetryPolicy::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_snippets_are_deduplicated_across_queries() {
        let search = FixedSearch::workplace();
        let report = agent(search.clone()).run(&brief(2, 5)).await;

        // Both queries return the same three snippets
        assert_eq!(search.calls(), 2);
        assert_eq!(report.queries_run, 2);
        assert_eq!(report.fragments.len(), 3);
        assert!(report.degradations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fragments_sorted_and_truncated() {
        let report = agent(FixedSearch::workplace()).run(&brief(1, 2)).await;
        assert_eq!(report.fragments.len(), 2);
        assert!(report.fragments[0].relevance >= report.fragments[1].relevance);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_cap_is_respected() {
        let search = FixedSearch::workplace();
        agent(search.clone()).run(&brief(1, 5)).await;
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_search_degrades_to_empty() {
        let search = FailingSearch::transient();
        let report = agent(search.clone()).run(&brief(2, 5)).await;

        assert!(report.fragments.is_empty());
        assert_eq!(report.queries_failed, 2);
        // Each query is attempted max_attempts times
        assert_eq!(search.calls(), 6);
        let kinds: Vec<_> = report.degradations.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DegradationKind::SearchFailed,
                DegradationKind::SearchFailed,
                DegradationKind::NoEvidence,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_snippets_are_dropped() {
        let search = ScriptedSearch::new(vec![Ok(vec![
            SearchHit::new("", "", "A long snippet without any source or title at all."),
            SearchHit::new("a.org", "Short", "tiny"),
            SearchHit::new(
                "a.org",
                "Report",
                "Workplace AI improves productivity according to the survey.",
            ),
        ])]);
        let report = agent(search).run(&brief(1, 5)).await;
        assert_eq!(report.fragments.len(), 1);
        assert_eq!(report.dropped, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_relevance_filters_candidates() {
        let mut strict = brief(1, 5);
        strict.min_relevance = 0.99;
        let report = agent(FixedSearch::workplace()).run(&strict).await;
        assert!(report.fragments.is_empty());
        assert_eq!(report.dropped, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queries_follow_team_position() {
        let pro_search = FixedSearch::workplace();
        let contra_search = FixedSearch::workplace();
        let mut contra = brief(2, 5);
        contra.team = Team::Contra;
        contra.position = "AI eliminates jobs".to_string();

        agent(pro_search.clone()).run(&brief(2, 5)).await;
        agent(contra_search.clone()).run(&contra).await;

        assert_eq!(pro_search.queries(), TEMPLATED);
        assert_eq!(contra_search.queries().len(), 2);
        assert!(contra_search.queries().iter().all(|q| q.ends_with("eliminates jobs")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_written_queries_lead_and_templates_fill() {
        let search = FixedSearch::workplace();
        let completion = Arc::new(FixedCompletion(
            "Searches:\n1. automation wage growth survey\n".to_string(),
        ));
        let report = agent(search.clone())
            .with_query_writer(writer(completion))
            .run(&brief(2, 5))
            .await;

        assert_eq!(search.queries(), vec!["automation wage growth survey", TEMPLATED[0]]);
        assert_eq!(report.queries, search.queries());
    }

    #[tokio::test(start_paused = true)]
    async fn test_written_queries_skip_those_already_run() {
        let search = FixedSearch::workplace();
        let completion = Arc::new(FixedCompletion(
            "automation wage growth survey\nrobot adoption and hiring".to_string(),
        ));
        let mut later = brief(2, 5);
        later.round = 2;
        later.already_run.insert("automation wage growth survey".to_string());

        agent(search.clone())
            .with_query_writer(writer(completion))
            .run(&later)
            .await;

        let queries = search.queries();
        assert_eq!(queries[0], "robot adoption and hiring");
        assert!(!queries.contains(&"automation wage growth survey".to_string()));
        assert_eq!(queries.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_query_writing_falls_back_to_templates() {
        let search = FixedSearch::workplace();
        let completion = Arc::new(FailingCompletion::new(ServiceError::Transient("503".into())));
        let report = agent(search.clone())
            .with_query_writer(writer(completion.clone()))
            .run(&brief(2, 5))
            .await;

        // Query writing is a single attempt
        assert_eq!(completion.calls(), 1);
        assert_eq!(search.queries(), TEMPLATED);
        assert!(report.degradations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_query_writer_times_out() {
        let search = FixedSearch::workplace();
        let start = tokio::time::Instant::now();
        agent(search.clone())
            .with_query_writer(writer(Arc::new(StalledCompletion)))
            .run(&brief(2, 5))
            .await;

        assert_eq!(search.queries(), TEMPLATED);
        assert!(start.elapsed() < Duration::from_secs(60));
    }
}
