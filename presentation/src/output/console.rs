//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use debate_domain::{Argument, DebateResult, RoundScore, Team, TeamSummary, Winner};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every round of the debate
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), result.topic));
        for summary in &result.teams {
            output.push_str(&format!(
                "{} {}\n",
                format!("{}:", summary.team).cyan().bold(),
                summary.position
            ));
        }
        output.push_str(&format!(
            "{} {}{}\n",
            "Rounds:".cyan().bold(),
            result.rounds.len(),
            if result.stopped_early {
                " (stopped early)"
            } else {
                ""
            }
        ));

        for round in &result.rounds {
            output.push_str(&Self::section_header(&format!("Round {}", round.round)));

            for team in Team::BOTH {
                output.push_str(&Self::argument_block(round.argument(team), "argument"));
            }
            for team in Team::BOTH {
                if let Some(rebuttal) = round.rebuttal(team) {
                    output.push_str(&Self::argument_block(rebuttal, "rebuttal"));
                }
            }

            output.push_str(&format!("\n{}\n", "Scores:".cyan().bold()));
            output.push_str(&Self::score_line(Team::Pro, &round.pro_score));
            output.push_str(&Self::score_line(Team::Contra, &round.contra_score));
        }

        output.push_str(&Self::section_header("Teams"));
        for summary in &result.teams {
            output.push_str(&Self::team_line(summary));
        }

        if result.is_degraded() {
            output.push_str(&Self::section_header("Degradations"));
            for degradation in &result.degradations {
                output.push_str(&format!("  {} {}\n", "!".yellow(), degradation));
            }
        }

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&Self::decision(result));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format winner, scores and rationale (concise output)
    pub fn format_summary(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Debate Arena Verdict ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), result.topic));

        output.push_str(&format!(
            "{} {}\n\n",
            "Rounds played:".dimmed(),
            result.rounds.len()
        ));

        output.push_str(&Self::decision(result));

        if result.is_degraded() {
            output.push_str(&format!(
                "\n{} {} degraded step(s); use --output full for details\n",
                "Note:".yellow().bold(),
                result.degradations.len()
            ));
        }

        output
    }

    fn argument_block(argument: &Argument, kind: &str) -> String {
        let title = format!(
            "── {} {} ({}, confidence {:.2}) ──",
            argument.team, kind, argument.strategy, argument.confidence
        );
        let title = if argument.is_fallback() {
            format!("{} [fallback]", title).red().bold()
        } else {
            title.yellow().bold()
        };

        let mut block = format!("\n{}\n{}\n", title, argument.text.trim());

        if !argument.key_points.is_empty() {
            block.push_str(&format!("\n{}\n", "Key Points:".cyan().bold()));
            for point in &argument.key_points {
                block.push_str(&format!("  * {}\n", point));
            }
        }

        let cited = if argument.cited.is_empty() {
            "none".to_string()
        } else {
            argument.cited.join(", ")
        };
        block.push_str(&format!("{} {}\n", "Cited:".dimmed(), cited));

        block
    }

    fn score_line(team: Team, score: &RoundScore) -> String {
        format!(
            "  {:<7} evidence {:.3}  coherence {:.3}  confidence {:.3}  total {}\n",
            team.label(),
            score.evidence_quality,
            score.coherence,
            score.confidence,
            format!("{:.3}", score.total).bold()
        )
    }

    fn team_line(summary: &TeamSummary) -> String {
        format!(
            "  {:<7} {} fragment(s), average relevance {:.3}, {} argument(s), {} fallback(s)\n",
            summary.team.label(),
            summary.fragments,
            summary.average_relevance,
            summary.arguments,
            summary.fallback_arguments
        )
    }

    fn decision(result: &DebateResult) -> String {
        let winner = match result.winner {
            Winner::Pro | Winner::Contra => result.winner.as_str().green().bold(),
            Winner::Tie => result.winner.as_str().yellow().bold(),
        };
        format!(
            "{} {}\n{} PRO {:.3} / CONTRA {:.3}\n\n{}\n",
            "Winner:".cyan().bold(),
            winner,
            "Final scores:".cyan().bold(),
            result.final_scores.pro,
            result.final_scores.contra,
            result.rationale
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DebateResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DebateResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &DebateResult) -> String {
        Self::format_summary(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        ArgumentOrigin, ArgumentStrategy, DebatePhase, Degradation, DegradationKind,
        OutputFormat, RoundResult, TeamScores,
    };

    fn argument(team: Team, text: &str, origin: ArgumentOrigin) -> Argument {
        Argument::new(
            team,
            1,
            text,
            vec![format!("{}-1", team.as_str())],
            0.8,
            ArgumentStrategy::InitialPosition,
            origin,
        )
    }

    fn result(degradations: Vec<Degradation>) -> DebateResult {
        let pro_score = RoundScore {
            evidence_quality: 0.6,
            coherence: 0.7,
            confidence: 0.8,
            total: 0.68,
        };
        let contra_score = RoundScore {
            evidence_quality: 0.4,
            coherence: 0.5,
            confidence: 0.4,
            total: 0.44,
        };
        DebateResult {
            topic: "Remote work".to_string(),
            rounds: vec![RoundResult {
                round: 1,
                pro_argument: argument(
                    Team::Pro,
                    "Remote work raises output per hour.",
                    ArgumentOrigin::Synthesized,
                ),
                contra_argument: argument(
                    Team::Contra,
                    "Evidence from the CONTRA research.",
                    ArgumentOrigin::Fallback,
                ),
                pro_rebuttal: Some(argument(
                    Team::Pro,
                    "The collaboration claim is overstated.",
                    ArgumentOrigin::Synthesized,
                )),
                contra_rebuttal: None,
                pro_score,
                contra_score,
            }],
            final_scores: TeamScores {
                pro: 0.68,
                contra: 0.44,
            },
            winner: Winner::Pro,
            rationale: "PRO wins after 1 round(s).".to_string(),
            teams: vec![
                TeamSummary {
                    team: Team::Pro,
                    position: "improves productivity".to_string(),
                    fragments: 4,
                    average_relevance: 0.55,
                    arguments: 2,
                    fallback_arguments: 0,
                },
                TeamSummary {
                    team: Team::Contra,
                    position: "hurts collaboration".to_string(),
                    fragments: 0,
                    average_relevance: 0.0,
                    arguments: 1,
                    fallback_arguments: 1,
                },
            ],
            degradations,
            stopped_early: false,
        }
    }

    #[test]
    fn test_full_output_shows_rounds_and_decision() {
        let output = ConsoleFormatter::format(&result(Vec::new()));
        assert!(output.contains("Remote work raises output per hour."));
        assert!(output.contains("The collaboration claim is overstated."));
        assert!(output.contains("[fallback]"));
        assert!(output.contains("pro-1"));
        assert!(output.contains("improves productivity"));
        assert!(output.contains("PRO wins after 1 round(s)."));
        assert!(!output.contains("Degradations"));
    }

    #[test]
    fn test_full_output_lists_degradations() {
        let degradation = Degradation::new(
            1,
            Team::Contra,
            DebatePhase::Argument,
            DegradationKind::SynthesisFailed,
            "service unavailable",
        );
        let output = ConsoleFormatter::format(&result(vec![degradation]));
        assert!(output.contains("Degradations"));
        assert!(output.contains("service unavailable"));
    }

    #[test]
    fn test_summary_is_concise() {
        let output = ConsoleFormatter::format_summary(&result(Vec::new()));
        assert!(output.contains("Remote work"));
        assert!(output.contains("PRO wins after 1 round(s)."));
        assert!(!output.contains("Remote work raises output per hour."));
    }

    #[test]
    fn test_json_round_trips_result() {
        let original = result(Vec::new());
        let json = ConsoleFormatter::format_json(&original);
        let parsed: DebateResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let result = result(Vec::new());
        let formatter = ConsoleFormatter;
        let json = formatter.render(&result, OutputFormat::Json);
        assert!(json.trim_start().starts_with('{'));
        assert_eq!(
            formatter.render(&result, OutputFormat::Summary),
            ConsoleFormatter::format_summary(&result)
        );
    }
}
