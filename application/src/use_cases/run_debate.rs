//! Run Debate use case
//!
//! Orchestrates the full debate: for each round both teams research,
//! argue, rebut and are scored, then a winner is declared.

use crate::config::ExecutionParams;
use crate::ports::completion::CompletionGateway;
use crate::ports::debate_logger::{DebateEvent, DebateLogger, NoDebateLogger};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::ports::search::SearchService;
use crate::rate_limiter::RateLimiter;
use crate::use_cases::supervisor::{Supervisor, SupervisorServices};
use debate_domain::{
    DebateConfig, DebatePhase, DebateResult, DebateState, Degradation, DomainError, RoundResult,
    ScoringEngine, Team,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a debate
///
/// Service failures never surface here; they degrade the affected round
/// and are listed in [`DebateResult::degradations`].
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate configuration: {0}")]
    Configuration(DomainError),

    #[error("Debate state error: {0}")]
    State(DomainError),
}

/// Use case for running a debate
pub struct RunDebateUseCase<C: CompletionGateway + 'static, S: SearchService + 'static> {
    completion: Arc<C>,
    search: Arc<S>,
    params: ExecutionParams,
    logger: Arc<dyn DebateLogger>,
}

impl<C: CompletionGateway + 'static, S: SearchService + 'static> RunDebateUseCase<C, S> {
    pub fn new(completion: Arc<C>, search: Arc<S>) -> Self {
        Self {
            completion,
            search,
            params: ExecutionParams::default(),
            logger: Arc::new(NoDebateLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DebateLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, config: DebateConfig) -> Result<DebateResult, RunDebateError> {
        self.execute_with_progress(config, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        config: DebateConfig,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, RunDebateError> {
        // ==================== INIT ====================
        config.validate().map_err(RunDebateError::Configuration)?;
        let config = Arc::new(config);

        info!(
            topic = %config.topic,
            rounds = config.max_rounds,
            agents = config.agents_per_team,
            "Starting debate"
        );
        self.log(
            "debate_started",
            json!({
                "topic": config.topic,
                "pro_position": config.pro_position,
                "contra_position": config.contra_position,
                "max_rounds": config.max_rounds,
                "agents_per_team": config.agents_per_team,
            }),
        );
        progress.on_debate_start(&config.topic, config.max_rounds);

        let services = SupervisorServices {
            completion: Arc::clone(&self.completion),
            search: Arc::clone(&self.search),
            completion_limiter: Arc::new(RateLimiter::new(
                "completion",
                config.limits.min_delay_between_calls,
            )),
            search_limiter: Arc::new(RateLimiter::new(
                "search",
                config.limits.min_delay_between_searches,
            )),
        };
        let mut pro = Supervisor::new(
            Team::Pro,
            Arc::clone(&config),
            self.params.clone(),
            services.clone(),
        );
        let mut contra = Supervisor::new(
            Team::Contra,
            Arc::clone(&config),
            self.params.clone(),
            services,
        );

        let scoring = ScoringEngine::new(config.scoring.clone());
        let mut state = DebateState::new(config.max_rounds);
        let mut degradations: Vec<Degradation> = Vec::new();
        let mut stopped_early = false;

        loop {
            // ==================== RESEARCH ====================
            state
                .transition(DebatePhase::Research)
                .map_err(RunDebateError::State)?;
            let round = state.current_round();
            self.phase_started(round, DebatePhase::Research, progress);

            let (pro_degraded, contra_degraded) = tokio::join!(
                pro.research(round, progress),
                contra.research(round, progress)
            );
            self.teams_complete(
                round,
                DebatePhase::Research,
                [!pro.store().is_empty(), !contra.store().is_empty()],
                progress,
            );
            self.record_degradations(&mut degradations, pro_degraded);
            self.record_degradations(&mut degradations, contra_degraded);
            self.log(
                "research_complete",
                json!({
                    "round": round,
                    "pro_fragments": pro.store().len(),
                    "contra_fragments": contra.store().len(),
                }),
            );
            progress.on_phase_complete(round, DebatePhase::Research);

            // ==================== ARGUMENT ====================
            state
                .transition(DebatePhase::Argument)
                .map_err(RunDebateError::State)?;
            self.phase_started(round, DebatePhase::Argument, progress);

            let ((pro_argument, pro_degraded), (contra_argument, contra_degraded)) =
                tokio::join!(pro.build_argument(round), contra.build_argument(round));
            self.teams_complete(
                round,
                DebatePhase::Argument,
                [!pro_argument.is_fallback(), !contra_argument.is_fallback()],
                progress,
            );
            self.record_degradations(&mut degradations, pro_degraded);
            self.record_degradations(&mut degradations, contra_degraded);
            self.log("argument", json!(pro_argument));
            self.log("argument", json!(contra_argument));
            progress.on_phase_complete(round, DebatePhase::Argument);

            // ==================== REBUTTAL ====================
            state
                .transition(DebatePhase::Rebuttal)
                .map_err(RunDebateError::State)?;
            self.phase_started(round, DebatePhase::Rebuttal, progress);

            // Both arguments are complete; only now may each side see the other's
            pro.receive_revealed(contra_argument.clone());
            contra.receive_revealed(pro_argument.clone());

            let ((pro_rebuttal, pro_degraded), (contra_rebuttal, contra_degraded)) = tokio::join!(
                pro.rebut(round, &contra_argument),
                contra.rebut(round, &pro_argument)
            );
            self.teams_complete(
                round,
                DebatePhase::Rebuttal,
                [!pro_rebuttal.is_fallback(), !contra_rebuttal.is_fallback()],
                progress,
            );
            self.record_degradations(&mut degradations, pro_degraded);
            self.record_degradations(&mut degradations, contra_degraded);
            self.log("rebuttal", json!(pro_rebuttal));
            self.log("rebuttal", json!(contra_rebuttal));

            pro.receive_revealed(contra_rebuttal.clone());
            contra.receive_revealed(pro_rebuttal.clone());
            pro.record_own(pro_argument.clone());
            pro.record_own(pro_rebuttal.clone());
            contra.record_own(contra_argument.clone());
            contra.record_own(contra_rebuttal.clone());
            progress.on_phase_complete(round, DebatePhase::Rebuttal);

            // ==================== SCORE ====================
            state
                .transition(DebatePhase::Score)
                .map_err(RunDebateError::State)?;
            self.phase_started(round, DebatePhase::Score, progress);

            let pro_score = scoring.score(&pro_argument, &pro.cited_fragments(&pro_argument));
            let contra_score =
                scoring.score(&contra_argument, &contra.cited_fragments(&contra_argument));
            info!(
                round,
                pro = pro_score.total,
                contra = contra_score.total,
                "Round scored"
            );
            self.log(
                "round_scored",
                json!({ "round": round, "pro": pro_score, "contra": contra_score }),
            );
            progress.on_round_scored(round, &pro_score, &contra_score);

            state
                .record_round(RoundResult {
                    round,
                    pro_argument,
                    contra_argument,
                    pro_rebuttal: Some(pro_rebuttal),
                    contra_rebuttal: Some(contra_rebuttal),
                    pro_score,
                    contra_score,
                })
                .map_err(RunDebateError::State)?;
            progress.on_phase_complete(round, DebatePhase::Score);

            if state.is_last_round() {
                break;
            }
            if self
                .params
                .early_stop
                .should_stop(pro.store().len(), contra.store().len())
            {
                warn!(
                    round,
                    "Stopping early: both teams lack evidence ({} / {} fragments)",
                    pro.store().len(),
                    contra.store().len()
                );
                stopped_early = true;
                break;
            }
        }

        // ==================== DECISION ====================
        state
            .transition(DebatePhase::Decision)
            .map_err(RunDebateError::State)?;
        let (rounds, final_scores) = state.into_rounds().map_err(RunDebateError::State)?;
        let winner = scoring.decide(&final_scores);
        let rationale = scoring.rationale(winner, &final_scores, rounds.len());

        info!(
            winner = winner.as_str(),
            pro = final_scores.pro,
            contra = final_scores.contra,
            degradations = degradations.len(),
            "Debate decided: {}",
            rationale
        );
        self.log(
            "debate_finished",
            json!({
                "winner": winner,
                "final_scores": final_scores,
                "rounds": rounds.len(),
                "stopped_early": stopped_early,
                "degradations": degradations.len(),
            }),
        );
        progress.on_decision(winner);

        Ok(DebateResult {
            topic: config.topic.clone(),
            rounds,
            final_scores,
            winner,
            rationale,
            teams: vec![pro.summary(), contra.summary()],
            degradations,
            stopped_early,
        })
    }

    fn phase_started(
        &self,
        round: usize,
        phase: DebatePhase,
        progress: &dyn DebateProgressNotifier,
    ) {
        info!("Round {}: {}", round, phase.display_name());
        progress.on_phase_start(round, phase, Team::BOTH.len());
        self.log(
            "phase_started",
            json!({ "round": round, "phase": phase.as_str() }),
        );
    }

    fn teams_complete(
        &self,
        round: usize,
        phase: DebatePhase,
        succeeded: [bool; 2],
        progress: &dyn DebateProgressNotifier,
    ) {
        for (team, success) in Team::BOTH.into_iter().zip(succeeded) {
            progress.on_team_complete(round, phase, team, success);
        }
    }

    fn record_degradations(&self, ledger: &mut Vec<Degradation>, new: Vec<Degradation>) {
        for degradation in new {
            warn!("Degraded: {}", degradation);
            self.log("degradation", json!(degradation));
            ledger.push(degradation);
        }
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.logger.log(DebateEvent::new(event_type, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EarlyStop;
    use crate::ports::service_error::ServiceError;
    use crate::use_cases::testing::{
        EchoCompletion, FailingCompletion, FailingSearch, FixedSearch, UniqueSearch,
    };
    use debate_domain::{ArgumentOrigin, DegradationKind, Winner};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn workplace(rounds: usize, agents: usize) -> DebateConfig {
        DebateConfig::builder(
            "AI in the workplace",
            "AI makes workplaces more productive and humane",
            "AI in the workplace harms workers and job security",
        )
        .with_max_rounds(rounds)
        .with_agents_per_team(agents)
        .build()
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl DebateProgressNotifier for RecordingProgress {
        fn on_phase_start(&self, round: usize, phase: DebatePhase, _total_tasks: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{round}:{}", phase.as_str()));
        }
        fn on_team_complete(&self, _: usize, _: DebatePhase, _: Team, _: bool) {}
        fn on_phase_complete(&self, _: usize, _: DebatePhase) {}
        fn on_decision(&self, winner: Winner) {
            self.events
                .lock()
                .unwrap()
                .push(format!("winner:{}", winner.as_str()));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl DebateLogger for RecordingLogger {
        fn log(&self, event: DebateEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_workplace_debate_plays_every_round() {
        let use_case = RunDebateUseCase::new(
            Arc::new(EchoCompletion::new()),
            Arc::new(FixedSearch::workplace()),
        );
        let result = use_case.execute(workplace(2, 2)).await.unwrap();

        assert_eq!(result.rounds.len(), 2);
        assert!(!result.stopped_early);
        for (i, round) in result.rounds.iter().enumerate() {
            assert_eq!(round.round, i + 1);
            assert!(round.pro_rebuttal.is_some());
            assert!(round.contra_rebuttal.is_some());
        }

        let pro_total: f64 = result.rounds.iter().map(|r| r.pro_score.total).sum();
        let contra_total: f64 = result.rounds.iter().map(|r| r.contra_score.total).sum();
        assert!((result.final_scores.pro - pro_total).abs() < 1e-12);
        assert!((result.final_scores.contra - contra_total).abs() < 1e-12);
        assert!(result.degradations.is_empty());
        assert_eq!(result.teams.len(), 2);
        assert!(!result.rationale.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_runs_agree() {
        let mut winners = Vec::new();
        for _ in 0..2 {
            let use_case = RunDebateUseCase::new(
                Arc::new(EchoCompletion::new()),
                Arc::new(FixedSearch::workplace()),
            );
            let result = use_case.execute(workplace(2, 2)).await.unwrap();
            winners.push((result.winner, result.final_scores));
        }
        assert_eq!(winners[0], winners[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_search_still_decides() {
        let working = RunDebateUseCase::new(
            Arc::new(EchoCompletion::new()),
            Arc::new(FixedSearch::workplace()),
        )
        .execute(workplace(2, 2))
        .await
        .unwrap();

        let search = FailingSearch::transient();
        let degraded =
            RunDebateUseCase::new(Arc::new(EchoCompletion::new()), Arc::new(search.clone()))
                .execute(workplace(2, 2))
                .await
                .unwrap();

        assert_eq!(degraded.rounds.len(), 2);
        assert!(search.calls() > 0);
        for team in Team::BOTH {
            assert_eq!(degraded.team_summary(team).unwrap().fragments, 0);
        }
        assert!(
            degraded
                .degradations
                .iter()
                .any(|d| d.kind == DegradationKind::NoEvidence)
        );

        let quality = |r: &DebateResult| -> f64 {
            r.rounds
                .iter()
                .map(|r| r.pro_score.evidence_quality + r.contra_score.evidence_quality)
                .sum()
        };
        assert_eq!(quality(&degraded), 0.0);
        assert!(quality(&degraded) < quality(&working));

        // Without evidence every argument and rebuttal is templated
        for round in &degraded.rounds {
            assert_eq!(round.pro_argument.origin, ArgumentOrigin::Fallback);
            assert_eq!(round.contra_argument.origin, ArgumentOrigin::Fallback);
            for rebuttal in [&round.pro_rebuttal, &round.contra_rebuttal].into_iter().flatten() {
                assert_eq!(rebuttal.origin, ArgumentOrigin::Fallback);
            }
        }
        for round in &working.rounds {
            assert_eq!(round.pro_argument.origin, ArgumentOrigin::Synthesized);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_bounded_by_team_capacity() {
        // Every search returns five snippets nobody has seen, so each round
        // brings a full store's worth of new evidence
        let config = workplace(3, 2);
        let capacity = config.max_fragments_per_team();
        let result = RunDebateUseCase::new(
            Arc::new(EchoCompletion::new()),
            Arc::new(UniqueSearch::new(5)),
        )
        .execute(config)
        .await
        .unwrap();

        assert_eq!(result.rounds.len(), 3);
        for summary in &result.teams {
            assert_eq!(summary.fragments, capacity);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_queries_never_repeat_across_teams_or_rounds() {
        let search = FixedSearch::workplace();
        RunDebateUseCase::new(Arc::new(EchoCompletion::new()), Arc::new(search.clone()))
            .execute(workplace(2, 1))
            .await
            .unwrap();

        // One agent per team, two queries each, two rounds
        let queries = search.queries();
        assert_eq!(queries.len(), 8);
        let distinct: HashSet<&String> = queries.iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_round_arguments_see_no_opponent_text() {
        let completion = EchoCompletion::new();
        let result = RunDebateUseCase::new(
            Arc::new(completion.clone()),
            Arc::new(FixedSearch::workplace()),
        )
        .execute(workplace(1, 1))
        .await
        .unwrap();

        let prompts = completion.synthesis_prompts();
        assert_eq!(prompts.len(), 4);
        let arguments: Vec<_> = prompts
            .iter()
            .filter(|(_, p)| !p.contains("OPPONENT'S ARGUMENT TO ANSWER"))
            .collect();
        assert_eq!(arguments.len(), 2);
        for (_, prompt) in arguments {
            assert!(!prompt.contains("OPPONENT'S"));
        }

        // Each rebuttal answers the opponent's argument from the same round
        let round = &result.rounds[0];
        let pro_rebuttal_prompt = prompts
            .iter()
            .find(|(ctx, p)| {
                ctx.contains("PRO team") && p.contains("OPPONENT'S ARGUMENT TO ANSWER")
            })
            .unwrap();
        assert!(pro_rebuttal_prompt.1.contains(round.contra_argument.text.trim()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_makes_no_calls() {
        let completion = EchoCompletion::new();
        let search = FixedSearch::workplace();
        let mut config = workplace(2, 2);
        config.max_rounds = 0;

        let err = RunDebateUseCase::new(Arc::new(completion.clone()), Arc::new(search.clone()))
            .execute(config)
            .await
            .unwrap_err();

        assert!(matches!(err, RunDebateError::Configuration(ref e) if e.is_configuration()));
        assert_eq!(search.calls(), 0);
        assert!(completion.prompts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_outage_uses_templates() {
        let result = RunDebateUseCase::new(
            Arc::new(FailingCompletion::new(ServiceError::Permanent(
                "401 unauthorized".into(),
            ))),
            Arc::new(FixedSearch::workplace()),
        )
        .execute(workplace(1, 1))
        .await
        .unwrap();

        let round = &result.rounds[0];
        assert!(round.pro_argument.is_fallback());
        assert!(round.contra_argument.is_fallback());
        assert!(round.pro_argument.text.starts_with("The PRO team"));
        assert_eq!(
            result
                .degradations
                .iter()
                .filter(|d| d.kind == DegradationKind::SynthesisFailed)
                .count(),
            4
        );
        assert_eq!(result.team_summary(Team::Pro).unwrap().fallback_arguments, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_stop_without_evidence() {
        let result = RunDebateUseCase::new(
            Arc::new(EchoCompletion::new()),
            Arc::new(FailingSearch::transient()),
        )
        .with_params(
            ExecutionParams::default()
                .with_early_stop(EarlyStop::InsufficientEvidence { min_fragments: 1 }),
        )
        .execute(workplace(3, 1))
        .await
        .unwrap();

        assert_eq!(result.rounds.len(), 1);
        assert!(result.stopped_early);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_and_log_follow_phases() {
        let progress = RecordingProgress::default();
        let logger = Arc::new(RecordingLogger::default());
        let result = RunDebateUseCase::new(
            Arc::new(EchoCompletion::new()),
            Arc::new(FixedSearch::workplace()),
        )
        .with_logger(logger.clone())
        .execute_with_progress(workplace(2, 1), &progress)
        .await
        .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "1:research".to_string(),
                "1:argument".to_string(),
                "1:rebuttal".to_string(),
                "1:score".to_string(),
                "2:research".to_string(),
                "2:argument".to_string(),
                "2:rebuttal".to_string(),
                "2:score".to_string(),
                format!("winner:{}", result.winner.as_str()),
            ]
        );

        let logged = logger.events.lock().unwrap().clone();
        assert_eq!(logged.first(), Some(&"debate_started"));
        assert_eq!(logged.last(), Some(&"debate_finished"));
        assert_eq!(logged.iter().filter(|e| **e == "round_scored").count(), 2);
    }
}
