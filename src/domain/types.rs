//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during selection
//! - exported to JSON/CSV
//! - reloaded later for reporting

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::SelectError;

/// A validated regression problem: design matrix `A` (m × n, row-major) and
/// response `b` (length m).
///
/// Construction is the only place where shapes and finiteness are checked.
/// The numeric core trusts a `Problem` unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    m: usize,
    n: usize,
    a: Vec<f64>,
    b: Vec<f64>,
}

impl Problem {
    /// Build from a row-major design buffer.
    pub fn from_row_major(m: usize, n: usize, a: Vec<f64>, b: Vec<f64>) -> Result<Self, SelectError> {
        if m == 0 || n == 0 {
            return Err(SelectError::Shape(format!(
                "design matrix must be non-empty, got {m}x{n}"
            )));
        }
        let expected = m
            .checked_mul(n)
            .ok_or_else(|| SelectError::Shape(format!("design matrix {m}x{n} is too large")))?;
        if a.len() != expected {
            return Err(SelectError::Shape(format!(
                "design buffer has {} entries, expected {m}x{n}={expected}",
                a.len()
            )));
        }
        if b.len() != m {
            return Err(SelectError::Shape(format!(
                "shape mismatch between A and b: A has {m} rows, b has {} entries",
                b.len()
            )));
        }
        if let Some(index) = a.iter().position(|v| !v.is_finite()) {
            return Err(SelectError::NonFinite { what: "A", index });
        }
        if let Some(index) = b.iter().position(|v| !v.is_finite()) {
            return Err(SelectError::NonFinite { what: "b", index });
        }
        Ok(Self { m, n, a, b })
    }

    /// Build from nalgebra types (column-major storage is copied to row-major).
    pub fn from_matrix(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<Self, SelectError> {
        let (m, n) = a.shape();
        let mut data = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                data.push(a[(i, j)]);
            }
        }
        Self::from_row_major(m, n, data, b.iter().copied().collect())
    }

    /// Number of observations (rows of `A`).
    pub fn n_obs(&self) -> usize {
        self.m
    }

    /// Number of candidate features (columns of `A`).
    pub fn n_features(&self) -> usize {
        self.n
    }

    pub fn design(&self) -> &[f64] {
        &self.a
    }

    pub fn response(&self) -> &[f64] {
        &self.b
    }

    /// Design matrix restricted to `columns`, in that order.
    pub fn submatrix(&self, columns: &[usize]) -> DMatrix<f64> {
        DMatrix::from_fn(self.m, columns.len(), |i, k| self.a[i * self.n + columns[k]])
    }
}

/// What to do when a candidate's Cholesky pivot is not safely positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankPolicy {
    /// Stop the run with `SelectError::RankDeficient`.
    #[default]
    #[value(name = "fail")]
    FailFast,
    /// Mark the pivot NaN and keep going; the caller must inspect the output.
    Propagate,
}

/// Knobs for a selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptions {
    /// Stop after this many greedy steps (defaults to all features).
    pub max_features: Option<usize>,
    pub rank_policy: RankPolicy,
    /// Relative pivot tolerance, see `math::cholesky_update`.
    pub pivot_tolerance: f64,
    /// Evaluate the candidates of each step on the rayon pool.
    pub parallel: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            max_features: None,
            rank_policy: RankPolicy::FailFast,
            pivot_tolerance: 1e-12,
            parallel: false,
        }
    }
}

/// Output of a greedy run.
///
/// Step `i` corresponds to the best subset of size `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPath {
    pub n_obs: usize,
    pub n_features: usize,
    /// Features in the order they were added.
    pub features: Vec<usize>,
    /// `steps × n_features`, row-major; row `i` is indexed by feature.
    pub weights: Vec<f64>,
    /// Residual sum of squares of the committed subset at each step.
    pub rss: Vec<f64>,
    /// `b·b`, the residual sum of squares of the empty model.
    pub total_sum_of_squares: f64,
}

impl SelectionPath {
    /// Number of completed steps.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Coefficient row for the subset of size `step + 1`, indexed by feature.
    pub fn coefficients(&self, step: usize) -> &[f64] {
        let n = self.n_features;
        &self.weights[step * n..(step + 1) * n]
    }

    /// Active features at `step`, in selection order.
    pub fn active(&self, step: usize) -> &[usize] {
        &self.features[..=step]
    }

    /// First step whose coefficients or RSS are not finite.
    pub fn first_non_finite_step(&self) -> Option<usize> {
        (0..self.len()).find(|&step| {
            !self.rss[step].is_finite() || self.coefficients(step).iter().any(|v| !v.is_finite())
        })
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite_step().is_none()
    }
}

/// Per-step quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepQuality {
    pub size: usize,
    pub feature: usize,
    pub rss: f64,
    pub rmse: f64,
    pub bic: f64,
}

/// A saved selection path (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub n_obs: usize,
    pub n_features: usize,
    pub feature_names: Vec<String>,
    /// Selection order (feature indices).
    pub order: Vec<usize>,
    /// One coefficient row per step, indexed by feature.
    pub coefficients: Vec<Vec<f64>>,
    pub steps: Vec<StepQuality>,
    pub recommended_size: Option<usize>,
}
