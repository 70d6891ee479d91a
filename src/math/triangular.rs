//! Forward and back substitution against a lower-triangular factor.
//!
//! Together they solve `L·Lᵗ·x = rhs`, i.e. the normal equations of the active
//! set once `L` is its Cholesky factor. Only the leading `count × count` block
//! of `l` is read; `stride` is its allocated row width.
//!
//! A zero diagonal entry produces `inf`/`NaN`. The Cholesky update is the
//! place where near-singular pivots are detected, so no check happens here.

/// Solve `L·y = rhs` for `y`, ascending.
pub fn forward_substitution(stride: usize, count: usize, l: &[f64], rhs: &[f64], y: &mut [f64]) {
    for i in 0..count {
        let row = &l[i * stride..];
        let mut p = 0.0;
        for j in 0..i {
            p += row[j] * y[j];
        }
        y[i] = (rhs[i] - p) / row[i];
    }
}

/// Solve `Lᵗ·x = y` for `x`, descending.
///
/// `Lᵗ[i][j] = L[j][i]`, so column `i` of `l` is walked below the diagonal.
pub fn back_substitution(stride: usize, count: usize, l: &[f64], y: &[f64], x: &mut [f64]) {
    for i in (0..count).rev() {
        let mut p = 0.0;
        for j in (i + 1..count).rev() {
            p += l[j * stride + i] * x[j];
        }
        x[i] = (y[i] - p) / l[i * stride + i];
    }
}
