//! conda-envgen - Generate a conda environment.yml from pyproject.toml
//!
//! Requirements available on the conda channel are listed as conda
//! dependencies; the rest are installed through pip.

use clap::Parser;
use colored::Colorize;
use conda_envgen::cli::CliArgs;
use conda_envgen::orchestrator::Orchestrator;
use conda_envgen::output::{write_environment, OutputFormat};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_logging(&args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr tracing subscriber; RUST_LOG overrides the CLI level
fn init_logging(args: &CliArgs) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("conda_envgen={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    if args.verbose {
        eprintln!("conda-envgen v{}", env!("CARGO_PKG_VERSION"));
    }

    let format = OutputFormat::from_cli(args.json);
    let output = args.output.clone();

    let orchestrator = Orchestrator::new(args)?;
    let result = orchestrator.run().await?;

    tracing::info!(
        conda = result.resolution.repository_matches.len(),
        pip = result.resolution.unresolved.len(),
        ignored = result.resolution.ignored.len(),
        malformed = result.resolution.malformed.len(),
        "resolved requirements"
    );

    let mut stdout = io::stdout().lock();
    write_environment(
        &result.environment,
        format,
        output.as_deref(),
        &mut stdout,
    )?;

    Ok(())
}
