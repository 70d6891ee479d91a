//! One candidate trial: extend the active set by a feature and score it.
//!
//! The score is the residual sum of squares of the least-squares fit on the
//! extended set, obtained without a residual vector from
//!
//! ```text
//! ‖b − A x‖² = b·b − 2·(Aᵗb)·x + x·(AᵗA)·x
//! ```
//!
//! which holds for any `x`, and is the RSS of the fit when `x` solves the
//! normal equations.

use crate::math::{
    NonPositivePivot, back_substitution, cholesky_update, dot, forward_substitution, matrix_vector,
};
use crate::select::workspace::{Moments, Workspace};

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub feature: usize,
    /// RSS of the extended subset; NaN when the pivot was rejected.
    pub objective: f64,
    /// Set when the candidate's Cholesky pivot was rejected.
    pub deficient: Option<NonPositivePivot>,
}

/// Evaluate `candidate` at position `active.len()`.
///
/// Writes row/column `i = active.len()` of the workspace and the solve
/// buffers. Committed rows `< i` are only read, so any number of trials can
/// run back to back; re-evaluating the winner leaves the workspace holding
/// its factor and coefficients.
pub fn evaluate(
    moments: &Moments,
    ws: &mut Workspace,
    active: &[usize],
    candidate: usize,
    pivot_tolerance: f64,
) -> Trial {
    let n = moments.n;
    let i = active.len();
    let g = &moments.gram;

    for (k, &f) in active.iter().enumerate() {
        let v = g[candidate * n + f];
        ws.gram[i * n + k] = v;
        ws.gram[k * n + i] = v;
    }
    ws.gram[i * n + i] = g[candidate * n + candidate];
    ws.cross[i] = moments.cross[candidate];

    let deficient = cholesky_update(n, i, &mut ws.factor, &ws.gram, pivot_tolerance).err();

    let count = i + 1;
    forward_substitution(n, count, &ws.factor, &ws.cross, &mut ws.forward);
    back_substitution(n, count, &ws.factor, &ws.forward, &mut ws.coef);

    matrix_vector(n, count, &ws.gram, &ws.coef, &mut ws.product);
    let objective = moments.constant - 2.0 * dot(count, &ws.cross, &ws.coef)
        + dot(count, &ws.coef, &ws.product);

    Trial {
        feature: candidate,
        objective,
        deficient,
    }
}
