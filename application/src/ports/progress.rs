//! Progress notification port
//!
//! Defines the interface for reporting progress while a debate runs.

use debate_domain::{AgentRole, DebatePhase, RoundScore, Team, Winner};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once before the first round
    fn on_debate_start(&self, _topic: &str, _max_rounds: usize) {}

    /// Called when a phase starts; `total_tasks` counts team-level tasks
    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize);

    /// Called when one team finishes its part of a phase
    fn on_team_complete(&self, round: usize, phase: DebatePhase, team: Team, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, round: usize, phase: DebatePhase);

    /// Called when a research agent returns
    fn on_agent_complete(&self, _team: Team, _role: AgentRole, _fragments: usize) {}

    /// Called after SCORE with the round's per-team breakdown
    fn on_round_scored(&self, _round: usize, _pro: &RoundScore, _contra: &RoundScore) {}

    /// Called once the winner is known
    fn on_decision(&self, _winner: Winner) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_phase_start(&self, _round: usize, _phase: DebatePhase, _total_tasks: usize) {}
    fn on_team_complete(&self, _round: usize, _phase: DebatePhase, _team: Team, _success: bool) {}
    fn on_phase_complete(&self, _round: usize, _phase: DebatePhase) {}
}
