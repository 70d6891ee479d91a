//! Export the coefficient table to CSV.
//!
//! One row per greedy step, one coefficient column per feature, so the file
//! opens directly in a spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SelectionPath;
use crate::error::AppError;

/// Write `step,size,feature,rss,<name_0>,…,<name_n-1>` rows.
pub fn write_weights_csv(path: &Path, selection: &SelectionPath, names: &[String]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_weights(&mut file, selection, names)
}

pub fn write_weights<W: Write>(out: &mut W, selection: &SelectionPath, names: &[String]) -> Result<(), AppError> {
    if names.len() != selection.n_features {
        return Err(AppError::new(
            2,
            format!(
                "Feature name count ({}) does not match feature count ({}).",
                names.len(),
                selection.n_features
            ),
        ));
    }

    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec![
        "step".to_string(),
        "size".to_string(),
        "feature".to_string(),
        "rss".to_string(),
    ];
    header.extend(names.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for step in 0..selection.len() {
        let mut record = vec![
            step.to_string(),
            (step + 1).to_string(),
            names[selection.features[step]].clone(),
            format!("{:.12e}", selection.rss[step]),
        ];
        record.extend(selection.coefficients(step).iter().map(|v| format!("{v:.12e}")));
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}
