// ABOUTME: Main entry point for the muxdev session provisioner
// Parses the CLI, loads the config, drives the builder, and attaches

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{error, info, warn};

use muxdev::config::SessionConfig;
use muxdev::tmux::{BuildOutcome, SessionBuilder, TmuxRunner};

#[derive(Parser)]
#[command(
    name = "muxdev",
    version,
    about = "Provision a tmux session from a YAML config and attach to it"
)]
struct Cli {
    /// Path to the session YAML file
    config: Option<PathBuf>,

    /// Record the tmux calls instead of executing them, printing them at exit
    #[arg(short = 'd', long = "dry-run")]
    dry_run: bool,
}

fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();

    let Some(config_path) = cli.config else {
        // No config file is not an error, just show usage.
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    println!("This utility assumes your tmux index starts at 1 and not 0");

    match run(&config_path, cli.dry_run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, dry_run: bool) -> Result<()> {
    let config = SessionConfig::load(config_path)
        .with_context(|| format!("failed to load session config {}", config_path.display()))?;

    let mut runner = if dry_run {
        TmuxRunner::dry_run()
    } else {
        TmuxRunner::new()?
    };

    let outcome = SessionBuilder::new(&config, &mut runner).build()?;
    if outcome == BuildOutcome::Created {
        info!("session {} provisioned", config.name);
    }

    // Provisioning already succeeded; a failed attach is reported but does
    // not change the exit status.
    if let Err(e) = runner.attach(&config.name) {
        warn!("attach to session {} failed: {e}", config.name);
    }

    if runner.is_dry_run() {
        println!("Dry run:");
        for line in runner.log() {
            println!("{line}");
        }
    }

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muxdev=info".into()),
        )
        .init();
}
