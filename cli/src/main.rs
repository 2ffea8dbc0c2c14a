//! CLI entrypoint for debate-arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    DebateLogger, DebateProgressNotifier, ExecutionParams, NoDebateLogger, NoProgress,
    RunDebateUseCase, SearchService,
};
use debate_domain::{ConfigIssue, DebateConfig, DebateResult, OutputFormat, Severity};
use debate_infrastructure::{
    CachedSearch, ConfigLoader, FileConfig, GitHubModelsGateway, JsonlDebateLogger,
    SearchBackend, SearchProvider,
};
use debate_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&cli, &mut config);

    let log_dir = config.logging.log_dir.clone();
    let _log_guard = init_logging(cli.verbose, log_dir.as_deref());

    if !config.output.color {
        colored::control::set_override(false);
    }

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        println!();
        println!(
            "{}",
            toml::to_string_pretty(&config).context("Failed to render configuration")?
        );
        return Ok(());
    }

    let issues = config.validate();
    if cli.check {
        return check(&cli, &issues);
    }

    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<&ConfigIssue> = issues.iter().filter(|i| i.is_error()).collect();
    if !errors.is_empty() {
        for issue in &errors {
            eprintln!("error: {}", issue.message);
        }
        bail!("Configuration has {} error(s); run with --check for details", errors.len());
    }

    // === Debate ===
    let topic = cli.topic.clone().or_else(|| config.debate.topic.clone());
    let pro = cli.pro.clone().or_else(|| config.debate.pro_position.clone());
    let contra = cli
        .contra
        .clone()
        .or_else(|| config.debate.contra_position.clone());
    let (Some(topic), Some(pro), Some(contra)) = (topic, pro, contra) else {
        bail!("A topic, --pro and --contra are required (or set them in the [debate] config section)");
    };

    let debate = config.to_debate_config(&topic, &pro, &contra)?;
    let format = config.output.format.unwrap_or_default();

    info!("Starting debate-arena");

    // === Dependency Injection ===
    let gateway = Arc::new(
        GitHubModelsGateway::from_config(&config.completion)
            .context("Failed to create completion client")?,
    );

    let logger: Arc<dyn DebateLogger> = match &config.logging.debate_log {
        Some(path) => Arc::new(
            JsonlDebateLogger::create(path)
                .with_context(|| format!("Failed to open debate log {}", path.display()))?,
        ),
        None => Arc::new(NoDebateLogger),
    };

    let progress: Box<dyn DebateProgressNotifier> =
        if cli.quiet || !config.output.show_progress {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

    if !cli.quiet && format != OutputFormat::Json {
        print_header(&debate);
    }

    let provider = config
        .search
        .parse_provider()
        .0
        .unwrap_or(SearchProvider::Tavily);
    let backend = SearchBackend::from_config(provider, &config.search)
        .context("Failed to create search client")?;
    let params = config.execution.to_execution_params();

    let result = if config.search.cache {
        run_debate(
            gateway,
            CachedSearch::new(backend),
            params,
            logger,
            debate,
            progress.as_ref(),
        )
        .await?
    } else {
        run_debate(gateway, backend, params, logger, debate, progress.as_ref()).await?
    };

    println!("{}", ConsoleFormatter.render(&result, format));

    Ok(())
}

/// CLI flags win over every configuration source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(rounds) = cli.rounds {
        config.debate.max_rounds = rounds;
    }
    if let Some(agents) = cli.agents {
        config.debate.agents_per_team = agents;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if let Some(path) = &cli.debate_log {
        config.logging.debate_log = Some(path.clone());
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.log_dir = Some(dir.clone());
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` takes precedence
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "debate-arena.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

/// Print configuration sources and issues; fail when any issue is an error
fn check(cli: &Cli, issues: &[ConfigIssue]) -> Result<()> {
    for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
        println!("{}", line);
    }
    println!();

    if issues.is_empty() {
        println!("No configuration issues found.");
        return Ok(());
    }

    for issue in issues {
        let label = match issue.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!("[{}] {}", label, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration check failed with {} error(s)", errors);
    }
    Ok(())
}

fn print_header(debate: &DebateConfig) {
    println!();
    println!("+============================================================+");
    println!("|           Debate Arena - PRO vs CONTRA                     |");
    println!("+============================================================+");
    println!();
    println!("Topic:  {}", debate.topic);
    println!("PRO:    {}", debate.pro_position);
    println!("CONTRA: {}", debate.contra_position);
    println!(
        "Rounds: {}, agents per team: {}",
        debate.max_rounds, debate.agents_per_team
    );
    println!();
}

async fn run_debate<S: SearchService + 'static>(
    gateway: Arc<GitHubModelsGateway>,
    search: S,
    params: ExecutionParams,
    logger: Arc<dyn DebateLogger>,
    debate: DebateConfig,
    progress: &dyn DebateProgressNotifier,
) -> Result<DebateResult> {
    let use_case = RunDebateUseCase::new(gateway, Arc::new(search))
        .with_params(params)
        .with_logger(logger);
    Ok(use_case.execute_with_progress(debate, progress).await?)
}
