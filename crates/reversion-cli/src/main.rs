//! # reversion CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reversion_cli::eligibility::{run_evaluate, run_regime, EvaluateArgs, RegimeArgs};
use reversion_cli::exit_code_for;
use reversion_cli::schedule::{run_schedule, ScheduleArgs};

/// Copyright termination eligibility
///
/// Computes when a U.S. copyright grant can be terminated, when notice of
/// termination can be served, and where today falls relative to both.
#[derive(Parser, Debug)]
#[command(name = "reversion", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate termination eligibility for a work.
    Evaluate(EvaluateArgs),

    /// Classify a release date as Section 203 or Section 304.
    Regime(RegimeArgs),

    /// List every statutory termination window for a work.
    Schedule(ScheduleArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Evaluate(args) => run_evaluate(&args, &mut stdout),
        Commands::Regime(args) => run_regime(&args, &mut stdout),
        Commands::Schedule(args) => run_schedule(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}
