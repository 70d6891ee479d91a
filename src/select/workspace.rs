//! Fixed-size working memory for one selection run.
//!
//! `Moments` holds the quantities computed once from the raw problem (Gram
//! matrix, cross-products, `b·b`) and is read-only afterwards.
//!
//! `Workspace` is the scratch arena: every buffer is sized once to `n` (or
//! `n × n` with row stride `n`) and only its leading `k` (or `k × k`) part is
//! meaningful at subset size `k`. Rows below the current position are the
//! committed state; the row at the current position is overwritten by every
//! trial and becomes committed when the winner is re-evaluated.

use crate::domain::Problem;
use crate::math::{dot, gramian, matrix_transpose_vector};

/// `AᵗA`, `Aᵗb` and `b·b` of a problem.
#[derive(Debug, Clone)]
pub struct Moments {
    pub n: usize,
    /// `n × n`, row-major.
    pub gram: Vec<f64>,
    pub cross: Vec<f64>,
    pub constant: f64,
}

impl Moments {
    pub fn compute(problem: &Problem) -> Self {
        let m = problem.n_obs();
        let n = problem.n_features();
        let a = problem.design();
        let b = problem.response();

        let mut gram = vec![0.0; n * n];
        gramian(m, n, a, &mut gram);

        let mut cross = vec![0.0; n];
        matrix_transpose_vector(m, n, a, b, &mut cross);

        Self {
            n,
            gram,
            cross,
            constant: dot(m, b, b),
        }
    }
}

/// Scratch buffers indexed by active-set position.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Gram matrix restricted to the active set (plus the trial row/column).
    pub(crate) gram: Vec<f64>,
    /// Partial Cholesky factor of `gram`.
    pub(crate) factor: Vec<f64>,
    /// Cross-products restricted to the active set.
    pub(crate) cross: Vec<f64>,
    /// Forward-substitution result.
    pub(crate) forward: Vec<f64>,
    /// Coefficients of the current (trial or committed) subset.
    pub(crate) coef: Vec<f64>,
    /// `gram · coef`.
    pub(crate) product: Vec<f64>,
}

impl Workspace {
    pub fn new(n: usize) -> Self {
        Self {
            gram: vec![0.0; n * n],
            factor: vec![0.0; n * n],
            cross: vec![0.0; n],
            forward: vec![0.0; n],
            coef: vec![0.0; n],
            product: vec![0.0; n],
        }
    }

    /// Coefficients of the last evaluated subset of size `count`, in
    /// active-set order.
    pub fn coefficients(&self, count: usize) -> &[f64] {
        &self.coef[..count]
    }

    /// Row `i` of the partial Cholesky factor, up to the diagonal.
    #[cfg(test)]
    pub(crate) fn factor_row(&self, i: usize) -> &[f64] {
        let n = self.cross.len();
        &self.factor[i * n..=i * n + i]
    }
}
