//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::DebateProgressNotifier;
use debate_domain::{AgentRole, DebatePhase, RoundScore, Team, Winner};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a debate with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    max_rounds: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            phase_bar: Mutex::new(None),
            max_rounds: Mutex::new(0),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn phase_label(&self, round: usize, phase: DebatePhase) -> String {
        let max_rounds = self.max_rounds.lock().map(|m| *m).unwrap_or(0);
        if max_rounds > 0 {
            format!("Round {}/{} {}", round, max_rounds, phase.display_name())
        } else {
            format!("Round {} {}", round, phase.display_name())
        }
    }

    fn println(&self, line: String) {
        // Hidden targets reject println; nothing to show then
        let _ = self.multi.println(line);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, topic: &str, max_rounds: usize) {
        if let Ok(mut max) = self.max_rounds.lock() {
            *max = max_rounds;
        }
        self.println(format!(
            "{} {} ({} rounds)",
            "Debating:".cyan().bold(),
            topic,
            max_rounds
        ));
    }

    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(self.phase_label(round, phase));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.phase_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_team_complete(&self, _round: usize, _phase: DebatePhase, team: Team, success: bool) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), team)
            } else {
                format!("{} {} (degraded)", "!".yellow(), team)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _round: usize, phase: DebatePhase) {
        if let Ok(mut bar) = self.phase_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }

    fn on_agent_complete(&self, team: Team, role: AgentRole, fragments: usize) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("{} {} agent: {} fragment(s)", team, role, fragments));
        }
    }

    fn on_round_scored(&self, round: usize, pro: &RoundScore, contra: &RoundScore) {
        self.println(format!(
            "  {} PRO {:.3} / CONTRA {:.3}",
            format!("Round {} scores:", round).bold(),
            pro.total,
            contra.total
        ));
    }

    fn on_decision(&self, winner: Winner) {
        self.println(format!("{} {}", "Winner:".cyan().bold(), winner));
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, topic: &str, max_rounds: usize) {
        eprintln!("{} {} ({} rounds)", "->".cyan(), topic.bold(), max_rounds);
    }

    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize) {
        eprintln!(
            "{} Round {}: {} ({} tasks)",
            "->".cyan(),
            round,
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_team_complete(&self, _round: usize, _phase: DebatePhase, team: Team, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), team);
        } else {
            eprintln!("  {} {} (degraded)", "!".yellow(), team);
        }
    }

    fn on_phase_complete(&self, _round: usize, _phase: DebatePhase) {}

    fn on_round_scored(&self, round: usize, pro: &RoundScore, contra: &RoundScore) {
        eprintln!(
            "  Round {} scores: PRO {:.3} / CONTRA {:.3}",
            round, pro.total, contra.total
        );
    }

    fn on_decision(&self, winner: Winner) {
        eprintln!("{} Winner: {}", "->".cyan(), winner.to_string().bold());
    }
}
