//! ireval CLI - information retrieval evaluation
//!
//! This binary scores query results against a gold standard of relevance
//! judgements and writes the metrics as YAML or JSON reports.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};
use ireval::runner::{run_evaluation, run_kappa};
use ireval_core::config::{Config, InputFormat, OutputFormat};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ireval")]
#[command(about = "Evaluate information retrieval results against a gold standard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Gold standard file
    #[arg(short, long, value_name = "FILE", global = true)]
    load: Option<PathBuf>,

    /// Query result file (YAML)
    #[arg(short, long, value_name = "FILE", global = true)]
    queries: Option<PathBuf>,

    /// Gold standard format: yaml or plain
    #[arg(short, long, value_name = "FORMAT", global = true)]
    format: Option<InputFormat>,

    /// Prefix of the written report files
    #[arg(short, long, value_name = "PREFIX", global = true)]
    output: Option<String>,

    /// Report format: yaml or json
    #[arg(long, value_name = "FORMAT", global = true)]
    output_format: Option<OutputFormat>,

    /// Verbose logging and console tables
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score query results and write the reports (default)
    Evaluate,
    /// Print the average pairwise kappa of the gold standard
    Kappa,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Some(Commands::Kappa) => {
            let kappa = run_kappa(&config)?;
            println!("Average pairwise kappa: {kappa}");
            Ok(())
        }
        Some(Commands::Evaluate) | None => {
            run_evaluation(&config, cli.queries.as_deref()).map(|_| ())
        }
    }
}

/// Initialize logging system
///
/// `RUST_LOG` takes precedence over the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ireval={level},ireval_core={level},ireval_loaders={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layered configuration with command-line flags applied last
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(load) = &cli.load {
        config.input.gold_standard_file = Some(load.clone());
    }
    if let Some(format) = cli.format {
        config.input.format = format;
    }
    if let Some(output) = &cli.output {
        config.output.prefix = output.clone();
    }
    if let Some(format) = cli.output_format {
        config.output.format = format;
    }
    if cli.verbose {
        config.report.verbose = true;
    }

    config.validate()?;
    Ok(config)
}
