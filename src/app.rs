//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads a CSV problem or generates a synthetic one
//! - runs greedy selection (+ optional verification)
//! - prints reports and writes optional exports

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use crate::cli::{Command, DemoArgs, SelectArgs, SelectionArgs, ShowArgs};
use crate::data::{SampleConfig, generate_problem};
use crate::domain::SelectOptions;
use crate::error::AppError;
use crate::io::{IngestConfig, load_problem, read_path_json};

pub mod pipeline;

/// A run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub options: SelectOptions,
    pub verify: bool,
    pub export_weights: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
}

/// Entry point for the `bestsubset` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Select(args) => handle_select(args),
        Command::Demo(args) => handle_demo(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A second init (e.g. from tests) is harmless; keep the first logger.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let ingest = load_problem(&IngestConfig {
        csv_path: args.csv.clone(),
        response: args.response.clone(),
        features: args.features.clone(),
    })?;

    if !ingest.row_errors.is_empty() {
        eprintln!(
            "Skipped {} of {} rows (see warnings for details).",
            ingest.row_errors.len(),
            ingest.rows_read
        );
    }

    let config = run_config_from_args(&args.selection);
    let run = pipeline::run_selection(&ingest.problem, &ingest.feature_names, &config)?;

    println!("Response: {}", ingest.response_name);
    println!("{}", crate::report::format_path_summary(&run.file));
    if let Some(check) = &run.check {
        println!("{}", crate::report::format_check(check));
    }
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let synthetic = generate_problem(&SampleConfig {
        rows: args.rows,
        cols: args.cols,
        informative: args.informative,
        noise: args.noise,
        seed: args.seed,
    })?;

    let config = run_config_from_args(&args.selection);
    let names = pipeline::default_feature_names(args.cols);
    let run = pipeline::run_selection(&synthetic.problem, &names, &config)?;

    println!("{}", crate::report::format_path_summary(&run.file));
    print!("{}", crate::report::format_recovery(&run.file, &synthetic.support));
    if let Some(check) = &run.check {
        println!("\n{}", crate::report::format_check(check));
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = read_path_json(&args.path)?;
    println!("{}", crate::report::format_path_summary(&file));
    Ok(())
}

pub fn run_config_from_args(args: &SelectionArgs) -> RunConfig {
    RunConfig {
        options: SelectOptions {
            max_features: args.max_features,
            rank_policy: args.rank_policy,
            pivot_tolerance: args.pivot_tolerance,
            parallel: args.parallel,
        },
        verify: args.verify,
        export_weights: args.export_weights.clone(),
        export_path: args.export_path.clone(),
    }
}
