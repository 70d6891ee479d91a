//! Command-line parsing for the greedy best-subset selector.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! selection/math code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::RankPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bestsubset", version, about = "Greedy best-subset feature selection for least squares")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run greedy selection on a CSV file and print the path.
    Select(SelectArgs),
    /// Run greedy selection on a seeded synthetic sparse problem.
    Demo(DemoArgs),
    /// Print a previously exported path JSON.
    Show(ShowArgs),
}

/// Options shared by every command that runs a selection.
#[derive(Debug, Args, Clone)]
pub struct SelectionArgs {
    /// Stop after this many features (defaults to all).
    #[arg(short = 'k', long)]
    pub max_features: Option<usize>,

    /// What to do when a candidate is collinear with the active features.
    #[arg(long, value_enum, default_value_t = RankPolicy::FailFast)]
    pub rank_policy: RankPolicy,

    /// Relative Cholesky pivot tolerance.
    #[arg(long, default_value_t = 1e-12)]
    pub pivot_tolerance: f64,

    /// Evaluate candidates in parallel (same result as sequential).
    #[arg(long)]
    pub parallel: bool,

    /// Cross-check every step against a direct least-squares refit.
    #[arg(long)]
    pub verify: bool,

    /// Export the coefficient table to CSV.
    #[arg(long = "export-weights", value_name = "CSV")]
    pub export_weights: Option<PathBuf>,

    /// Export the full path (order, coefficients, diagnostics) to JSON.
    #[arg(long = "export-path", value_name = "JSON")]
    pub export_path: Option<PathBuf>,
}

/// Options for selecting on a CSV file.
#[derive(Debug, Parser, Clone)]
pub struct SelectArgs {
    /// Input CSV with a header row.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Response column (defaults to the last column).
    #[arg(short = 'y', long)]
    pub response: Option<String>,

    /// Comma-separated feature columns (defaults to every other column).
    #[arg(long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Options for the synthetic demo.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of observations.
    #[arg(short = 'm', long, default_value_t = 200)]
    pub rows: usize,

    /// Number of candidate features.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub cols: usize,

    /// Number of features with a non-zero true coefficient.
    #[arg(long, default_value_t = 4)]
    pub informative: usize,

    /// Standard deviation of the response noise.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Options for printing a saved path.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Path JSON produced by `--export-path`.
    #[arg(long, value_name = "JSON")]
    pub path: PathBuf,
}
