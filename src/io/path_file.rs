//! Read/write selection path JSON files.
//!
//! A path file is the portable representation of one run:
//! - problem dimensions + feature names
//! - selection order and the per-step coefficient rows
//! - per-step diagnostics and the recommended subset size
//!
//! The schema is defined by `domain::PathFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{PathFile, SelectionPath};
use crate::error::AppError;
use crate::select::{recommend_size, step_quality};

/// Assemble the serializable form of a run.
pub fn build_path_file(selection: &SelectionPath, names: &[String]) -> PathFile {
    let steps = step_quality(selection);
    let recommended_size = recommend_size(&steps);
    PathFile {
        tool: "bestsubset".to_string(),
        generated: Utc::now(),
        n_obs: selection.n_obs,
        n_features: selection.n_features,
        feature_names: names.to_vec(),
        order: selection.features.clone(),
        coefficients: (0..selection.len())
            .map(|step| selection.coefficients(step).to_vec())
            .collect(),
        steps,
        recommended_size,
    }
}

/// Write a path JSON file.
pub fn write_path_json(path: &Path, file: &PathFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create path JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write path JSON: {e}")))?;

    Ok(())
}

/// Read a path JSON file.
pub fn read_path_json(path: &Path) -> Result<PathFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open path JSON '{}': {e}", path.display())))?;
    let saved: PathFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid path JSON: {e}")))?;
    check_path_file(&saved)?;
    Ok(saved)
}

/// Reject files whose parts disagree with each other (hand-edited or truncated).
pub fn check_path_file(file: &PathFile) -> Result<(), AppError> {
    let invalid = |msg: String| Err(AppError::new(2, format!("Inconsistent path JSON: {msg}")));
    let steps = file.order.len();

    if file.coefficients.len() != steps || file.steps.len() != steps {
        return invalid(format!(
            "{} selected features, {} coefficient rows, {} step records",
            steps,
            file.coefficients.len(),
            file.steps.len()
        ));
    }
    if file.feature_names.len() != file.n_features {
        return invalid(format!(
            "{} feature names for {} features",
            file.feature_names.len(),
            file.n_features
        ));
    }
    if let Some(row) = file.coefficients.iter().position(|r| r.len() != file.n_features) {
        return invalid(format!("coefficient row {row} does not have {} entries", file.n_features));
    }
    if let Some(&f) = file.order.iter().find(|&&f| f >= file.n_features) {
        return invalid(format!("feature index {f} out of range"));
    }
    match file.recommended_size {
        Some(size) if size == 0 || size > steps => {
            invalid(format!("recommended size {size} outside 1..={steps}"))
        }
        _ => Ok(()),
    }
}
