//! Greedy forward selection driver.
//!
//! Step `i` tries every remaining feature at position `i`, keeps the one with
//! the smallest residual sum of squares, and commits it. Committed choices are
//! never revisited, so step `i` costs O((n − i)·i²) instead of refactoring every
//! candidate subset from scratch.
//!
//! Tie-break: candidates are scanned in working-set order and the first
//! strictly smaller objective wins. The parallel mode collects trial results in
//! that same order before scanning, so it returns bit-identical paths.

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::domain::{Problem, RankPolicy, SelectOptions, SelectionPath};
use crate::error::SelectError;
use crate::select::evaluator::{Trial, evaluate};
use crate::select::workspace::{Moments, Workspace};

/// Run the full greedy path with default options.
pub fn select(problem: &Problem) -> Result<SelectionPath, SelectError> {
    select_with(problem, &SelectOptions::default())
}

/// Run the greedy path.
///
/// Columns of `A` restricted to any subset the search may try should be
/// linearly independent. When they are not, `options.rank_policy` decides
/// between an early `SelectError::RankDeficient` and NaN-marked output.
pub fn select_with(problem: &Problem, options: &SelectOptions) -> Result<SelectionPath, SelectError> {
    let n = problem.n_features();
    let steps = resolve_steps(n, options.max_features)?;
    let tolerance = options.pivot_tolerance;
    if !(tolerance.is_finite() && tolerance >= 0.0) {
        return Err(SelectError::InvalidOption(format!(
            "pivot tolerance must be finite and >= 0, got {tolerance}"
        )));
    }

    let moments = Moments::compute(problem);
    let mut ws = Workspace::new(n);

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut features: Vec<usize> = Vec::with_capacity(steps);
    let mut weights = vec![0.0; steps * n];
    let mut rss = Vec::with_capacity(steps);

    for i in 0..steps {
        let trials: Vec<Trial> = if options.parallel {
            remaining
                .par_iter()
                .map_init(
                    || ws.clone(),
                    |local, &a| evaluate(&moments, local, &features, a, tolerance),
                )
                .collect()
        } else {
            remaining
                .iter()
                .map(|&a| evaluate(&moments, &mut ws, &features, a, tolerance))
                .collect()
        };

        let best_pos = match pick_best(i, &trials, options.rank_policy)? {
            Some(pos) => pos,
            None => {
                warn!(
                    "step {i}: no candidate has a finite objective; committing feature {} (outputs from here on are NaN)",
                    remaining[0]
                );
                0
            }
        };

        let winner = remaining.swap_remove(best_pos);
        let committed = evaluate(&moments, &mut ws, &features, winner, tolerance);
        features.push(winner);

        let row = &mut weights[i * n..(i + 1) * n];
        for (&f, &x) in features.iter().zip(ws.coefficients(i + 1)) {
            row[f] = x;
        }
        rss.push(committed.objective);

        debug!(
            "step {i}: added feature {winner} out of {} candidates, rss={:.6e}",
            trials.len(),
            committed.objective
        );
    }

    info!(
        "greedy selection finished: m={}, n={n}, steps={steps}, final rss={:.6e}",
        problem.n_obs(),
        rss.last().copied().unwrap_or(moments.constant)
    );

    Ok(SelectionPath {
        n_obs: problem.n_obs(),
        n_features: n,
        features,
        weights,
        rss,
        total_sum_of_squares: moments.constant,
    })
}

fn resolve_steps(n: usize, max_features: Option<usize>) -> Result<usize, SelectError> {
    match max_features {
        None => Ok(n),
        Some(0) => Err(SelectError::InvalidOption(
            "max features must be at least 1".to_string(),
        )),
        Some(k) => Ok(k.min(n)),
    }
}

/// Position (in `trials`) of the winner, or `None` when no objective compares
/// below infinity.
fn pick_best(step: usize, trials: &[Trial], policy: RankPolicy) -> Result<Option<usize>, SelectError> {
    let mut best: Option<usize> = None;
    let mut best_obj = f64::INFINITY;

    for (pos, trial) in trials.iter().enumerate() {
        if let (Some(pivot), RankPolicy::FailFast) = (trial.deficient, policy) {
            return Err(SelectError::RankDeficient {
                step,
                feature: trial.feature,
                pivot: pivot.value,
            });
        }
        if trial.objective < best_obj {
            best = Some(pos);
            best_obj = trial.objective;
        }
    }

    Ok(best)
}
