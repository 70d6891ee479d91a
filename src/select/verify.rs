//! Step-by-step cross-check of a greedy path against direct least squares.

use log::warn;

use crate::domain::{Problem, SelectionPath};
use crate::math::subset_least_squares;

/// Largest disagreement between the greedy path and a direct refit.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCheck {
    /// Max |greedy − direct| over all coefficients of all steps.
    pub max_coefficient_deviation: f64,
    /// Max |rss_greedy − rss_direct| / max(rss_direct, b·b · ε).
    pub max_rss_deviation: f64,
    /// Step with the largest coefficient deviation.
    pub worst_step: Option<usize>,
    /// Steps the direct solver could not solve.
    pub unsolved_steps: Vec<usize>,
}

impl PathCheck {
    pub fn within(&self, coefficient_tol: f64, rss_tol: f64) -> bool {
        self.unsolved_steps.is_empty()
            && self.max_coefficient_deviation <= coefficient_tol
            && self.max_rss_deviation <= rss_tol
    }
}

/// Refit every step of `path` on exactly its active set and compare.
pub fn verify_path(problem: &Problem, path: &SelectionPath) -> PathCheck {
    let mut check = PathCheck {
        max_coefficient_deviation: 0.0,
        max_rss_deviation: 0.0,
        worst_step: None,
        unsolved_steps: Vec::new(),
    };
    let rss_floor = path.total_sum_of_squares * f64::EPSILON;

    for step in 0..path.len() {
        let active = path.active(step);
        let Some((beta, rss_direct)) = subset_least_squares(problem, active) else {
            warn!("direct least squares failed at step {step}");
            check.unsolved_steps.push(step);
            continue;
        };

        let row = path.coefficients(step);
        let step_dev = active
            .iter()
            .zip(&beta)
            .map(|(&f, &b)| deviation(row[f], b))
            .fold(0.0, f64::max);
        if step_dev > check.max_coefficient_deviation {
            check.max_coefficient_deviation = step_dev;
            check.worst_step = Some(step);
        }

        let scale = rss_direct.max(rss_floor).max(f64::MIN_POSITIVE);
        let rss_dev = deviation(path.rss[step], rss_direct) / scale;
        check.max_rss_deviation = check.max_rss_deviation.max(rss_dev);
    }

    check
}

/// `|a − b|`, with NaN mapped to infinity so it cannot pass as small.
fn deviation(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d.is_nan() { f64::INFINITY } else { d }
}
