//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round with arguments, rebuttals, citations and scores
    Full,
    /// Winner, final scores and rationale
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Summary => debate_domain::OutputFormat::Summary,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for debate-arena
#[derive(Parser, Debug)]
#[command(name = "debate-arena")]
#[command(author, version, about = "Debate Arena - PRO and CONTRA research teams argue a topic")]
#[command(long_about = r#"
Debate Arena runs a multi-round debate between two teams of research agents.

Each round has four phases:
1. Research:  every agent searches for evidence for its own team
2. Argument:  each supervisor synthesizes an argument from its team's evidence
3. Rebuttal:  each supervisor answers the opponent's argument
4. Score:     arguments are scored on evidence quality, coherence and confidence

After the last round the team with the higher cumulative score wins.

Configuration files are loaded from (in priority order):
1. DEBATE_<SECTION>__<KEY>                 Environment overrides
2. --config <path>                         Explicit config file
3. ./debate.toml                           Project-level config
4. ~/.config/debate-arena/config.toml      Global config

Example:
  debate-arena "Remote work" --pro "improves productivity" --contra "hurts collaboration"
  debate-arena "Nuclear power" --pro "is essential" --contra "is too risky" -r 2 -o full
  debate-arena --check
"#)]
pub struct Cli {
    /// The debate topic (falls back to [debate].topic in the config)
    pub topic: Option<String>,

    /// Position defended by the PRO team
    #[arg(long, value_name = "POSITION")]
    pub pro: Option<String>,

    /// Position defended by the CONTRA team
    #[arg(long, value_name = "POSITION")]
    pub contra: Option<String>,

    /// Number of rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Research agents per team
    #[arg(short, long, value_name = "N")]
    pub agents: Option<usize>,

    /// Output format (defaults to [output].format, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Validate configuration and credentials, then exit
    #[arg(long)]
    pub check: bool,

    /// Write debate events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub debate_log: Option<PathBuf>,

    /// Write tracing logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// True when the invocation only inspects configuration
    pub fn is_inspection(&self) -> bool {
        self.show_config || self.check
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "debate-arena",
            "Remote work",
            "--pro",
            "improves productivity",
            "--contra",
            "hurts collaboration",
            "-r",
            "2",
            "-a",
            "3",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.topic.as_deref(), Some("Remote work"));
        assert_eq!(cli.pro.as_deref(), Some("improves productivity"));
        assert_eq!(cli.contra.as_deref(), Some("hurts collaboration"));
        assert_eq!(cli.rounds, Some(2));
        assert_eq!(cli.agents, Some(3));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert!(!cli.is_inspection());
    }

    #[test]
    fn test_defaults_leave_room_for_config() {
        let cli = Cli::try_parse_from(["debate-arena"]).unwrap();
        assert!(cli.topic.is_none());
        assert!(cli.rounds.is_none());
        assert!(cli.output.is_none());
        assert!(cli.debate_log.is_none());
    }

    #[test]
    fn test_check_is_inspection() {
        let cli = Cli::try_parse_from(["debate-arena", "--check"]).unwrap();
        assert!(cli.is_inspection());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["debate-arena", "t", "-o", "yaml"]).is_err());
    }

    #[test]
    fn test_format_maps_to_domain() {
        assert_eq!(
            debate_domain::OutputFormat::from(OutputFormat::Summary),
            debate_domain::OutputFormat::Summary
        );
    }
}
