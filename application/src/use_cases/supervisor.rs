//! Team supervisor
//!
//! A supervisor owns one team's evidence store. It runs the team's research
//! agents concurrently, selects evidence, and synthesizes arguments and
//! rebuttals through the completion gateway. It never sees the opposing
//! team's store; the only opponent input it receives is argument text the
//! orchestrator has explicitly revealed.

use crate::config::ExecutionParams;
use crate::ports::completion::CompletionGateway;
use crate::ports::progress::DebateProgressNotifier;
use crate::ports::search::SearchService;
use crate::rate_limiter::RateLimiter;
use crate::use_cases::research_agent::{QueryWriter, ResearchAgent, ResearchBrief};
use crate::use_cases::shared::call_with_retry;
use debate_domain::{
    AgentRole, Argument, ArgumentOrigin, ArgumentStrategy, DebateConfig, DebatePhase,
    DebatePromptTemplate, Degradation, DegradationKind, EvidenceFragment, EvidenceStore,
    SynthesisContext, Team, TeamSummary, is_substantial, parse_confidence, strip_confidence,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, info, warn};

/// Confidence used when there is no evidence to judge from
const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Distinct sources needed for full diversity credit
const DIVERSITY_SATURATION: f64 = 3.0;

/// Multiplier applied to the evidence-based confidence of templated arguments
const FALLBACK_CONFIDENCE_FACTOR: f64 = 0.5;

/// Shared services handed to each supervisor
pub struct SupervisorServices<C, S> {
    pub completion: Arc<C>,
    pub search: Arc<S>,
    pub completion_limiter: Arc<RateLimiter>,
    pub search_limiter: Arc<RateLimiter>,
}

impl<C, S> Clone for SupervisorServices<C, S> {
    fn clone(&self) -> Self {
        Self {
            completion: Arc::clone(&self.completion),
            search: Arc::clone(&self.search),
            completion_limiter: Arc::clone(&self.completion_limiter),
            search_limiter: Arc::clone(&self.search_limiter),
        }
    }
}

/// Evidence-based self-confidence.
///
/// `0.6 * mean relevance + 0.2 * quantity + 0.2 * source diversity`, where
/// quantity is the share of the `top_k` slots filled.
pub fn evidence_confidence(evidence: &[EvidenceFragment], top_k: usize) -> f64 {
    if evidence.is_empty() {
        return NEUTRAL_CONFIDENCE;
    }
    let mean = evidence.iter().map(|f| f.relevance).sum::<f64>() / evidence.len() as f64;
    let quantity = (evidence.len() as f64 / top_k.max(1) as f64).min(1.0);
    let sources: HashSet<&str> = evidence.iter().map(|f| f.source_id.as_str()).collect();
    let diversity = (sources.len() as f64 / DIVERSITY_SATURATION).min(1.0);
    (0.6 * mean + 0.2 * quantity + 0.2 * diversity).clamp(0.0, 1.0)
}

pub struct Supervisor<C: CompletionGateway + 'static, S: SearchService + 'static> {
    team: Team,
    config: Arc<DebateConfig>,
    params: ExecutionParams,
    services: SupervisorServices<C, S>,
    store: EvidenceStore,
    /// Every search query the team's agents have sent
    queries_run: HashSet<String>,
    /// Opponent arguments and rebuttals revealed so far, oldest first
    revealed: Vec<Argument>,
    /// Own arguments and rebuttals, oldest first
    produced: Vec<Argument>,
}

impl<C: CompletionGateway + 'static, S: SearchService + 'static> Supervisor<C, S> {
    pub fn new(
        team: Team,
        config: Arc<DebateConfig>,
        params: ExecutionParams,
        services: SupervisorServices<C, S>,
    ) -> Self {
        Self {
            team,
            config,
            params,
            services,
            store: EvidenceStore::new(),
            queries_run: HashSet::new(),
            revealed: Vec::new(),
            produced: Vec::new(),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn store(&self) -> &EvidenceStore {
        &self.store
    }

    fn position(&self) -> &str {
        self.config.position(self.team)
    }

    // ==================== Research ====================

    /// Run `agents_per_team` agents concurrently and merge their fragments.
    ///
    /// Agents still running at the research deadline are cancelled; whatever
    /// finished in time is kept. Afterwards the store is trimmed to
    /// [`DebateConfig::max_fragments_per_team`] by composite score.
    pub async fn research(
        &mut self,
        round: usize,
        progress: &dyn DebateProgressNotifier,
    ) -> Vec<Degradation> {
        let brief = ResearchBrief {
            topic: self.config.topic.clone(),
            position: self.position().to_string(),
            team: self.team,
            round,
            max_queries: self.config.limits.max_queries_per_agent,
            max_fragments: self.config.limits.max_fragments_per_agent,
            min_relevance: self.config.limits.min_relevance,
            already_run: self.queries_run.clone(),
        };
        let writer = self.params.query_writing.then(|| {
            let completion: Arc<dyn CompletionGateway> = self.services.completion.clone();
            QueryWriter::new(
                completion,
                Arc::clone(&self.services.completion_limiter),
                self.config.models.research_agent.clone(),
                self.params.query_timeout,
            )
        });

        let mut join_set = JoinSet::new();
        for (i, role) in AgentRole::assign(self.config.agents_per_team)
            .into_iter()
            .enumerate()
        {
            let agent = ResearchAgent::new(
                format!("{}-{}-{}", self.team.as_str(), role, i + 1),
                role,
                Arc::clone(&self.services.search),
                Arc::clone(&self.services.search_limiter),
                self.params.retry.clone(),
            );
            let agent = match &writer {
                Some(writer) => agent.with_query_writer(writer.clone()),
                None => agent,
            };
            let brief = brief.clone();
            join_set.spawn(async move { agent.run(&brief).await });
        }

        let deadline = Instant::now() + self.params.research_timeout;
        let mut degradations = Vec::new();
        loop {
            match timeout_at(deadline, join_set.join_next()).await {
                Ok(Some(Ok(report))) => {
                    progress.on_agent_complete(self.team, report.role, report.fragments.len());
                    self.queries_run.extend(report.queries);
                    let added = self.store.merge_all(report.fragments);
                    debug!(
                        team = %self.team,
                        agent = %report.agent_id,
                        "Merged {} new fragment(s)",
                        added
                    );
                    degradations.extend(report.degradations);
                }
                Ok(Some(Err(e))) => {
                    warn!(team = %self.team, "Research agent task failed: {}", e);
                    degradations.push(Degradation::new(
                        round,
                        self.team,
                        DebatePhase::Research,
                        DegradationKind::AgentFailed,
                        e.to_string(),
                    ));
                }
                Ok(None) => break,
                Err(_) => {
                    let pending = join_set.len();
                    join_set.abort_all();
                    warn!(
                        team = %self.team,
                        "Research timed out after {:?}; cancelled {} agent(s)",
                        self.params.research_timeout,
                        pending
                    );
                    degradations.push(Degradation::new(
                        round,
                        self.team,
                        DebatePhase::Research,
                        DegradationKind::ResearchTimeout,
                        format!("{pending} agent(s) cancelled at the research deadline"),
                    ));
                    break;
                }
            }
        }

        let evicted = self.store.retain_top(
            round,
            self.config.scoring.round_decay,
            self.config.max_fragments_per_team(),
        );
        if evicted > 0 {
            debug!(team = %self.team, "Evicted {} low-ranked fragment(s)", evicted);
        }

        info!(
            team = %self.team,
            round,
            "Research complete: {} fragment(s) in store",
            self.store.len()
        );
        degradations
    }

    /// Top-K evidence for synthesis in `round`
    pub fn select_evidence(&self, round: usize) -> Vec<EvidenceFragment> {
        self.store.top_k(
            round,
            self.config.scoring.round_decay,
            self.config.limits.evidence_top_k,
        )
    }

    /// Fragments from this team's store cited by `argument`
    pub fn cited_fragments(&self, argument: &Argument) -> Vec<EvidenceFragment> {
        argument
            .cited
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    // ==================== Synthesis ====================

    /// Build this team's argument for `round`.
    ///
    /// Inputs are the team's own store and opponent text revealed in earlier
    /// rounds; nothing from the opponent's current round is reachable here.
    pub async fn build_argument(&self, round: usize) -> (Argument, Vec<Degradation>) {
        let previous = self
            .revealed
            .iter()
            .rev()
            .find(|a| a.round < round)
            .map(|a| a.text.as_str());
        let strategy =
            ArgumentStrategy::for_argument(round, self.config.max_rounds, previous.is_some());
        let evidence = self.select_evidence(round);
        let ctx = self.context(round, strategy, &evidence);
        let prompt = DebatePromptTemplate::argument_prompt(&ctx, previous);
        self.synthesize(round, DebatePhase::Argument, strategy, evidence, prompt)
            .await
    }

    /// Answer the opponent's argument revealed for this round
    pub async fn rebut(&self, round: usize, opponent: &Argument) -> (Argument, Vec<Degradation>) {
        let strategy = ArgumentStrategy::for_rebuttal(
            &opponent.text,
            self.revealed.len(),
            round,
            self.config.max_rounds,
        );
        let evidence = self.select_evidence(round);
        let ctx = self.context(round, strategy, &evidence);
        let prompt = DebatePromptTemplate::rebuttal_prompt(&ctx, &opponent.text);
        self.synthesize(round, DebatePhase::Rebuttal, strategy, evidence, prompt)
            .await
    }

    /// Make an opponent argument visible to this team
    pub fn receive_revealed(&mut self, argument: Argument) {
        debug_assert_eq!(argument.team, self.team.opponent());
        self.revealed.push(argument);
    }

    /// Remember an argument this team produced
    pub fn record_own(&mut self, argument: Argument) {
        self.produced.push(argument);
    }

    pub fn summary(&self) -> TeamSummary {
        TeamSummary {
            team: self.team,
            position: self.position().to_string(),
            fragments: self.store.len(),
            average_relevance: self.store.average_relevance(),
            arguments: self.produced.len(),
            fallback_arguments: self.produced.iter().filter(|a| a.is_fallback()).count(),
        }
    }

    fn context<'a>(
        &'a self,
        round: usize,
        strategy: ArgumentStrategy,
        evidence: &'a [EvidenceFragment],
    ) -> SynthesisContext<'a> {
        SynthesisContext {
            topic: &self.config.topic,
            position: self.position(),
            team: self.team,
            round,
            strategy,
            evidence,
        }
    }

    async fn synthesize(
        &self,
        round: usize,
        phase: DebatePhase,
        strategy: ArgumentStrategy,
        evidence: Vec<EvidenceFragment>,
        prompt: String,
    ) -> (Argument, Vec<Degradation>) {
        if evidence.is_empty() {
            return self.fallback(
                round,
                phase,
                strategy,
                &evidence,
                DegradationKind::NoEvidence,
                "no evidence to synthesize from".to_string(),
            );
        }

        let model = self.config.models.supervisor_for(self.team);
        let system = DebatePromptTemplate::supervisor_system(self.team, self.position());
        let top_k = self.config.limits.evidence_top_k;

        info!(
            team = %self.team,
            round,
            phase = phase.as_str(),
            strategy = strategy.as_str(),
            "Synthesizing with {} fragment(s)",
            evidence.len()
        );

        let completion = &self.services.completion;
        let (system_ref, prompt_ref) = (system.as_str(), prompt.as_str());
        let call = call_with_retry(
            &self.services.completion_limiter,
            &self.params.retry,
            "completion",
            move || completion.complete(model, system_ref, prompt_ref),
        );

        let failure = match timeout(self.params.synthesis_timeout, call).await {
            Ok(Ok(response)) => {
                let body = strip_confidence(&response);
                if is_substantial(&body) {
                    let confidence = parse_confidence(&response)
                        .unwrap_or_else(|| evidence_confidence(&evidence, top_k));
                    let cited = cited_ids(&body, &evidence);
                    let argument = Argument::new(
                        self.team,
                        round,
                        body,
                        cited,
                        confidence,
                        strategy,
                        ArgumentOrigin::Synthesized,
                    );
                    return (argument, Vec::new());
                }
                (
                    DegradationKind::InvalidArgument,
                    format!("response too thin ({} chars)", body.chars().count()),
                )
            }
            Ok(Err(e)) => (DegradationKind::SynthesisFailed, e.to_string()),
            Err(_) => (
                DegradationKind::SynthesisTimeout,
                format!("no answer within {:?}", self.params.synthesis_timeout),
            ),
        };

        let (kind, detail) = failure;
        self.fallback(round, phase, strategy, &evidence, kind, detail)
    }

    /// Templated argument recorded with the degradation that caused it
    fn fallback(
        &self,
        round: usize,
        phase: DebatePhase,
        strategy: ArgumentStrategy,
        evidence: &[EvidenceFragment],
        kind: DegradationKind,
        detail: String,
    ) -> (Argument, Vec<Degradation>) {
        warn!(
            team = %self.team,
            round,
            phase = phase.as_str(),
            "Using templated argument: {} ({})",
            kind,
            detail
        );
        let text = DebatePromptTemplate::fallback_argument(self.team, self.position(), evidence);
        let confidence = evidence_confidence(evidence, self.config.limits.evidence_top_k)
            * FALLBACK_CONFIDENCE_FACTOR;
        let cited = evidence.iter().map(|f| f.id.clone()).collect();
        let argument = Argument::new(
            self.team,
            round,
            text,
            cited,
            confidence,
            strategy,
            ArgumentOrigin::Fallback,
        );
        let degradation = Degradation::new(round, self.team, phase, kind, detail);
        (argument, vec![degradation])
    }
}

/// Ids mentioned in the text, or every selected id when none are mentioned
fn cited_ids(text: &str, evidence: &[EvidenceFragment]) -> Vec<String> {
    let mentioned: Vec<String> = evidence
        .iter()
        .filter(|f| text.contains(&f.id))
        .map(|f| f.id.clone())
        .collect();
    if mentioned.is_empty() {
        evidence.iter().map(|f| f.id.clone()).collect()
    } else {
        mentioned
    }
}
