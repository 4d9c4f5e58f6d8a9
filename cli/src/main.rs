//! CLI entrypoint for buildcrew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use buildcrew_application::{GenerationService, Orchestrator};
use buildcrew_domain::OutputFormat;
use buildcrew_infrastructure::{ConfigLoader, FileConfig, FixtureGenerationService, JsonlMessageLog};
use buildcrew_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let Some(requirement) = cli.requirement else {
        bail!("A requirement is required, e.g. buildcrew \"A todo app with user accounts\"");
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = config
        .output
        .resolve_format(cli.output.map(OutputFormat::from));

    info!("Starting buildcrew");

    let run = BuildRun {
        requirement: &requirement,
        format,
        quiet: cli.quiet,
        config: &config,
    };

    // === Dependency Injection ===
    if let Some(path) = &cli.fixtures {
        let fixtures = FixtureGenerationService::from_file(path)?;
        info!(
            "Answering from fixture {} ({} shapes)",
            path.display(),
            fixtures.keys().count()
        );
        return run.execute(Arc::new(fixtures)).await;
    }

    execute_http(&run).await
}

#[cfg(feature = "http")]
async fn execute_http(run: &BuildRun<'_>) -> Result<ExitCode> {
    let generation = &run.config.generation;
    let service = buildcrew_infrastructure::HttpGenerationService::from_config(generation)?;
    info!("Using model {} at {}", service.model(), generation.endpoint);
    run.execute(Arc::new(service)).await
}

#[cfg(not(feature = "http"))]
async fn execute_http(_run: &BuildRun<'_>) -> Result<ExitCode> {
    bail!("Built without the `http` feature; use --fixtures <PATH>")
}

/// Everything a single build needs besides the generation backend
struct BuildRun<'a> {
    requirement: &'a str,
    format: OutputFormat,
    quiet: bool,
    config: &'a FileConfig,
}

impl BuildRun<'_> {
    async fn execute<G: GenerationService + 'static>(&self, generation: Arc<G>) -> Result<ExitCode> {
        let mut orchestrator =
            Orchestrator::new(generation).with_config(self.config.pipeline.to_pipeline_config());

        if let Some(path) = &self.config.logging.message_log {
            match JsonlMessageLog::new(path) {
                Some(log) => {
                    info!("Mirroring messages to {}", log.path().display());
                    orchestrator = orchestrator.with_message_log(Arc::new(log));
                }
                None => warn!("Message log disabled: could not open {}", path.display()),
            }
        }

        if !self.quiet {
            orchestrator = if std::io::stderr().is_terminal() {
                orchestrator.with_progress(Arc::new(ProgressReporter::new()))
            } else {
                orchestrator.with_progress(Arc::new(SimpleProgress))
            };
            if self.format != OutputFormat::Json {
                println!();
                println!("Requirement: {}", self.requirement);
                println!();
            }
        }

        // Dropping the run future on Ctrl-C marks the run as failed
        let outcome = tokio::select! {
            outcome = orchestrator.run(self.requirement) => outcome,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                eprintln!("Interrupted");
                return Ok(ExitCode::from(130));
            }
        };

        match outcome {
            Ok(project) => {
                println!("{}", ConsoleFormatter::format(&project, self.format));
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                eprintln!(
                    "{}",
                    ConsoleFormatter::format_failure(
                        &error.to_string(),
                        &orchestrator.status_snapshot(),
                        &orchestrator.message_log(),
                    )
                );
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Console logging filtered by verbosity, plus an optional file log
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "buildcrew.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}
