//! # donation-matcher CLI entry point
//!
//! Loads the donation CSV and the optional round-policy file, runs the
//! matching pass and writes every report into the output directory.
//! Both inputs are fully parsed before anything is written.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use donation_matcher::engine::{EngineConfig, MatchingEngine, DEFAULT_ALUMNI_MARKER};
use donation_matcher::io::{load_donations, load_rounds, write_all, write_unused_summary};

/// Compute donation matching and fundraising statistics.
#[derive(Parser, Debug)]
#[command(name = "donation-matcher", version, about, long_about = None)]
struct Cli {
    /// Donation CSV file.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the report CSVs.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Expected number of donations (pre-sizes the engine).
    #[arg(short = 'n', long, default_value_t = 0)]
    num_donations: usize,

    /// Matching criteria file. Without it nothing is matched.
    #[arg(short, long)]
    criteria: Option<PathBuf>,

    /// Relation substring that marks an alumnus donor.
    #[arg(long, default_value = DEFAULT_ALUMNI_MARKER)]
    alumni_marker: String,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let rounds = match &cli.criteria {
        Some(path) => load_rounds(path)
            .with_context(|| format!("failed to load matching criteria from {}", path.display()))?,
        None => {
            tracing::warn!("no matching criteria given; nothing will be matched");
            Vec::new()
        }
    };
    let donations = load_donations(&cli.input)
        .with_context(|| format!("failed to load donations from {}", cli.input.display()))?;
    tracing::info!(
        rounds = rounds.len(),
        donations = donations.len(),
        "inputs loaded"
    );

    let config = EngineConfig::default()
        .with_capacity(cli.num_donations.max(donations.len()))
        .with_alumni_marker(cli.alumni_marker.clone());
    let outcome = MatchingEngine::run(rounds, &donations, config).context("matching pass failed")?;

    write_unused_summary(io::stdout().lock(), &outcome.unused_funds)
        .context("failed to print unused funds")?;
    write_all(&cli.output, &outcome)
        .with_context(|| format!("failed to write reports to {}", cli.output.display()))?;

    tracing::info!(
        output = %cli.output.display(),
        state_root = %outcome.receipt.state_root_hex(),
        "reports written"
    );
    Ok(())
}
