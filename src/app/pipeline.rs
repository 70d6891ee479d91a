//! Shared "selection pipeline" used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! problem -> greedy path -> diagnostics -> optional verification -> exports
//!
//! The commands then only differ in where the problem comes from.

use log::{info, warn};

use crate::domain::{PathFile, Problem, SelectOptions, SelectionPath};
use crate::error::AppError;
use crate::io::{build_path_file, write_path_json, write_weights_csv};
use crate::select::{PathCheck, select_with, verify_path};

use super::RunConfig;

/// All computed outputs of a single selection run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub selection: SelectionPath,
    pub file: PathFile,
    pub check: Option<PathCheck>,
}

/// Run greedy selection on `problem` and write the requested exports.
pub fn run_selection(problem: &Problem, names: &[String], config: &RunConfig) -> Result<RunOutput, AppError> {
    let selection = select_with(problem, &config.options)?;

    if let Some(step) = selection.first_non_finite_step() {
        warn!(
            "selection path is non-finite from size {} on (rank-deficient design)",
            step + 1
        );
    }

    let file = build_path_file(&selection, names);
    let check = config.verify.then(|| verify_path(problem, &selection));

    if let Some(path) = &config.export_weights {
        write_weights_csv(path, &selection, names)?;
        info!("wrote coefficient table to {}", path.display());
    }
    if let Some(path) = &config.export_path {
        write_path_json(path, &file)?;
        info!("wrote path JSON to {}", path.display());
    }

    Ok(RunOutput { selection, file, check })
}

/// Generated names `x0..x{n-1}` for problems without a header.
pub fn default_feature_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("x{i}")).collect()
}

impl RunConfig {
    pub fn with_options(options: SelectOptions) -> Self {
        Self {
            options,
            verify: false,
            export_weights: None,
            export_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_builds_file_and_check() {
        let problem =
            Problem::from_row_major(3, 2, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0], vec![3.0, 5.0, 7.0])
                .unwrap();
        let mut config = RunConfig::with_options(SelectOptions::default());
        config.verify = true;

        let run = run_selection(&problem, &default_feature_names(2), &config).unwrap();
        assert_eq!(run.file.order, vec![1, 0]);
        assert_eq!(run.file.feature_names, vec!["x0", "x1"]);
        assert!(run.check.unwrap().within(1e-9, 1e-9));
    }

    #[test]
    fn rank_deficiency_maps_to_numerical_exit_code() {
        let problem =
            Problem::from_row_major(3, 2, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0], vec![1.0, 0.0, 1.0])
                .unwrap();
        let config = RunConfig::with_options(SelectOptions::default());
        let err = run_selection(&problem, &default_feature_names(2), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
