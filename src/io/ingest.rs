//! CSV ingest of a design matrix and response.
//!
//! This module is responsible for turning a headered numeric CSV into a
//! validated `Problem`: one column is the response, the others (or an explicit
//! list) are candidate features.
//!
//! Design goals:
//! - **Strict schema** for the selected columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior**: feature order is the CSV column order, or the
//!   order given with `--features`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::StringRecord;
use log::warn;

use crate::domain::Problem;
use crate::error::AppError;

/// Which file and columns to load.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub csv_path: PathBuf,
    /// Response column name; the last column when `None`.
    pub response: Option<String>,
    /// Feature column names; every non-response column when `None`.
    pub features: Option<Vec<String>>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated problem + column names + row accounting.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub problem: Problem,
    pub feature_names: Vec<String>,
    pub response_name: String,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the CSV named in `config`.
pub fn load_problem(config: &IngestConfig) -> Result<IngestedData, AppError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", config.csv_path.display()),
        )
    })?;
    read_problem(file, config)
}

/// Parse CSV content from any reader.
pub fn read_problem<R: Read>(source: R, config: &IngestConfig) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let (response_idx, feature_idx) = resolve_columns(&headers, config)?;
    let feature_names: Vec<String> = feature_idx
        .iter()
        .map(|&i| clean_header(&headers[i]).to_string())
        .collect();
    let response_name = clean_header(&headers[response_idx]).to_string();

    let n = feature_idx.len();
    let mut a = Vec::new();
    let mut b = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, response_idx, &feature_idx, &headers) {
            Ok((features, response)) => {
                a.extend(features);
                b.push(response);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        warn!("skipping CSV line {}: {}", err.line, err.message);
    }

    let rows_used = b.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows remain after validation."));
    }

    let problem = Problem::from_row_major(rows_used, n, a, b)?;

    Ok(IngestedData {
        problem,
        feature_names,
        response_name,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn clean_header(name: &str) -> &str {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header.
    name.trim().trim_start_matches('\u{feff}')
}

fn resolve_columns(headers: &StringRecord, config: &IngestConfig) -> Result<(usize, Vec<usize>), AppError> {
    if headers.len() < 2 {
        return Err(AppError::new(
            2,
            "CSV needs at least two columns (one feature and the response).",
        ));
    }

    let header_map: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (clean_header(name), idx))
        .collect();
    if header_map.len() != headers.len() {
        return Err(AppError::new(2, "CSV header contains duplicate column names."));
    }

    let response_idx = match &config.response {
        Some(name) => *header_map
            .get(name.as_str())
            .ok_or_else(|| AppError::new(2, format!("Missing response column: `{name}`")))?,
        None => headers.len() - 1,
    };

    let feature_idx = match &config.features {
        Some(names) => {
            let mut out = Vec::with_capacity(names.len());
            for name in names {
                let idx = *header_map
                    .get(name.as_str())
                    .ok_or_else(|| AppError::new(2, format!("Missing feature column: `{name}`")))?;
                if idx == response_idx {
                    return Err(AppError::new(
                        2,
                        format!("Column `{name}` cannot be both a feature and the response."),
                    ));
                }
                if out.contains(&idx) {
                    return Err(AppError::new(2, format!("Feature column `{name}` listed twice.")));
                }
                out.push(idx);
            }
            out
        }
        None => (0..headers.len()).filter(|&i| i != response_idx).collect(),
    };

    if feature_idx.is_empty() {
        return Err(AppError::new(2, "No feature columns selected."));
    }

    Ok((response_idx, feature_idx))
}

fn parse_row(
    record: &StringRecord,
    response_idx: usize,
    feature_idx: &[usize],
    headers: &StringRecord,
) -> Result<(Vec<f64>, f64), String> {
    let response = parse_cell(record, response_idx, headers)?;
    let features = feature_idx
        .iter()
        .map(|&i| parse_cell(record, i, headers))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((features, response))
}

fn parse_cell(record: &StringRecord, idx: usize, headers: &StringRecord) -> Result<f64, String> {
    let name = clean_header(&headers[idx]);
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing value for `{name}`."))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid number for `{name}`: '{raw}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite value for `{name}`."));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(response: Option<&str>, features: Option<&[&str]>) -> IngestConfig {
        IngestConfig {
            csv_path: PathBuf::from("unused.csv"),
            response: response.map(str::to_string),
            features: features.map(|f| f.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn defaults_to_last_column_as_response() {
        let csv = "x1,x2,y\n1,0,3\n0,1,5\n0,0,7\n";
        let data = read_problem(csv.as_bytes(), &config(None, None)).unwrap();
        assert_eq!(data.feature_names, vec!["x1", "x2"]);
        assert_eq!(data.response_name, "y");
        assert_eq!(data.problem.n_obs(), 3);
        assert_eq!(data.problem.design(), &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(data.problem.response(), &[3.0, 5.0, 7.0]);
    }

    #[test]
    fn explicit_columns_follow_requested_order() {
        let csv = "\u{feff}y,a,b,c\n1,2,3,4\n5,6,7,8\n";
        let data = read_problem(csv.as_bytes(), &config(Some("y"), Some(&["c", "a"][..]))).unwrap();
        assert_eq!(data.feature_names, vec!["c", "a"]);
        assert_eq!(data.problem.design(), &[4.0, 2.0, 8.0, 6.0]);
        assert_eq!(data.problem.response(), &[1.0, 5.0]);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "x,y\n1,2\nfoo,3\n4,\n5,6\n";
        let data = read_problem(csv.as_bytes(), &config(None, None)).unwrap();
        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn schema_errors_use_exit_code_two() {
        let csv = "x,y\n1,2\n";
        let err = read_problem(csv.as_bytes(), &config(Some("z"), None)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = read_problem(csv.as_bytes(), &config(Some("y"), Some(&["y"][..]))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_usable_rows_is_insufficient_data() {
        let csv = "x,y\nnan,1\n";
        let err = read_problem(csv.as_bytes(), &config(None, None)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
