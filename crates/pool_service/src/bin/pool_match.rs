//! Match a batch file from the command line and print the JSON result.
//!
//! Run with: cargo run -p pool_service --bin pool_match -- --input batch.json

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pool_core::cost::CostMode;
use pool_core::matching::MatchMode;
use pool_service::cli::{load_batch, read_input};
use pool_service::service::run_batch;
use tracing::Level;

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Min-cost max-flow with greedy comparison
    Mcmf,
    /// Greedy baseline only
    Greedy,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mcmf => MatchMode::Mcmf,
            ModeArg::Greedy => MatchMode::Greedy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CostModeArg {
    /// Euclidean degree distance, whole minutes
    Approx,
    /// Haversine distance at 40 km/h
    Real,
}

impl From<CostModeArg> for CostMode {
    fn from(mode: CostModeArg) -> Self {
        match mode {
            CostModeArg::Approx => CostMode::Approx,
            CostModeArg::Real => CostMode::Real,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "pool_match",
    about = "Assign trip requests to vehicles from a JSON batch",
    long_about = "Reads a batch {\"vehicles\": [...], \"requests\": [...], \"mode\"?, \"costMode\"?}\n\
                  and prints the match result as JSON. Flags override modes in the file."
)]
struct Cli {
    /// Batch file, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    input: PathBuf,
    /// Matching strategy
    #[arg(long, value_enum, env = "POOL_MATCH_MODE")]
    mode: Option<ModeArg>,
    /// Pickup cost model
    #[arg(long, value_enum, env = "POOL_COST_MODE")]
    cost_mode: Option<CostModeArg>,
    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
    /// Log solver progress to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let raw = read_input(&cli.input)?;
    let mode = cli.mode.map(MatchMode::from);
    let cost_mode = cli.cost_mode.map(CostMode::from);
    let batch = load_batch(&raw, mode, cost_mode)?;

    let response = run_batch(&batch);
    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");
    Ok(())
}
