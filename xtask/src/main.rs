use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride-pooling matcher workspace",
    long_about = "A unified CLI for serving, matching batch files, benchmarks,\n\
                  load tests and CI checks in the ride-pooling workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP matching service
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3001)]
        port: u16,
    },
    /// Match a JSON batch file and print the result
    Match {
        /// Batch file path
        input: String,
        /// Matching strategy (mcmf or greedy)
        #[arg(long)]
        mode: Option<String>,
        /// Pickup cost model (approx or real)
        #[arg(long)]
        cost_mode: Option<String>,
    },
    /// Run the reference batch example
    Example,
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in pool_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run examples
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "pool_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test pool_core");
    run_cargo(&["test", "-p", "pool_core"]);

    step("Test pool_service");
    run_cargo(&["test", "-p", "pool_service"]);
}

fn ci_examples() {
    step("Run reference_batch");
    run_cargo(&["run", "-p", "pool_core", "--example", "reference_batch"]);
}

fn ci_bench() {
    step("Run benchmarks");
    bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            std::env::set_var("PORT", port.to_string());
            run_cargo(&[
                "run",
                "-p",
                "pool_service",
                "--bin",
                "pool_server",
                "--release",
            ]);
        }
        Commands::Match {
            input,
            mode,
            cost_mode,
        } => {
            let mut args = vec![
                "run",
                "-q",
                "-p",
                "pool_service",
                "--bin",
                "pool_match",
                "--",
                "--input",
                input.as_str(),
                "--pretty",
            ];
            if let Some(mode) = mode.as_deref() {
                args.extend(["--mode", mode]);
            }
            if let Some(cost_mode) = cost_mode.as_deref() {
                args.extend(["--cost-mode", cost_mode]);
            }
            run_cargo(&args);
        }
        Commands::Example => {
            run_cargo(&["run", "-p", "pool_core", "--example", "reference_batch"]);
        }
        Commands::Bench => bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "pool_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
