//! Incremental Cholesky factorization: grow `L` by one row.
//!
//! Given `L` with `L·Lᵗ = A[0..i, 0..i]` and a symmetric `A` whose row `i` has
//! just been filled in, compute row `i` of `L` so that the leading
//! `(i+1) × (i+1)` block satisfies the same identity. Rows `< i` are never
//! written. Cost is O(i²), against O(i³) for refactoring from scratch.

/// The squared diagonal of the new row was not safely positive.
///
/// `value` is `A[i][i] − Σ L[i][k]²`, the quantity that would have gone under
/// the square root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonPositivePivot {
    pub value: f64,
}

/// Extend `l` by row `i` from row `i` of the symmetric matrix `a`.
///
/// Both buffers are row-major with row width `stride`.
///
/// The pivot is rejected when `A[i][i] − Σ L[i][k]² <= tolerance · A[i][i]`
/// (this includes negative and NaN values). On rejection the diagonal is set
/// to NaN, so that anything derived from the row is visibly non-finite, and
/// the offending value is returned.
pub fn cholesky_update(
    stride: usize,
    i: usize,
    l: &mut [f64],
    a: &[f64],
    tolerance: f64,
) -> Result<(), NonPositivePivot> {
    for j in 0..i {
        let mut p = 0.0;
        for k in 0..j {
            p += l[i * stride + k] * l[j * stride + k];
        }
        l[i * stride + j] = (a[i * stride + j] - p) / l[j * stride + j];
    }

    let mut p = 0.0;
    for k in 0..i {
        let v = l[i * stride + k];
        p += v * v;
    }

    let diag = a[i * stride + i];
    let d = diag - p;
    if !(d > tolerance * diag) {
        l[i * stride + i] = f64::NAN;
        return Err(NonPositivePivot { value: d });
    }

    l[i * stride + i] = d.sqrt();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn builds_full_factor_row_by_row() {
        // SPD matrix with a known factor:
        // L = [[2, 0, 0], [1, 3, 0], [4, -1, 5]]
        let lt = [[2.0, 0.0, 0.0], [1.0, 3.0, 0.0], [4.0, -1.0, 5.0]];
        let mut a = vec![0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                a[r * 3 + c] = (0..3).map(|k| lt[r][k] * lt[c][k]).sum();
            }
        }

        let mut l = vec![0.0; 9];
        for i in 0..3 {
            cholesky_update(3, i, &mut l, &a, TOL).unwrap();
        }
        for r in 0..3 {
            for c in 0..=r {
                assert!((l[r * 3 + c] - lt[r][c]).abs() < 1e-12, "L[{r}][{c}]={}", l[r * 3 + c]);
            }
        }
    }

    #[test]
    fn earlier_rows_are_untouched() {
        let a = [4.0, 2.0, 2.0, 10.0];
        let mut l = vec![0.0; 4];
        cholesky_update(2, 0, &mut l, &a, TOL).unwrap();
        let before = l[0];
        cholesky_update(2, 1, &mut l, &a, TOL).unwrap();
        assert_eq!(l[0], before);
        assert_eq!(l[1], 0.0);
        assert_eq!(l[2], 1.0);
        assert_eq!(l[3], 3.0);
    }

    #[test]
    fn collinear_row_is_rejected_with_nan_diagonal() {
        // Second column is exactly twice the first: A = [[1, 2], [2, 4]].
        let a = [1.0, 2.0, 2.0, 4.0];
        let mut l = vec![0.0; 4];
        cholesky_update(2, 0, &mut l, &a, TOL).unwrap();
        let err = cholesky_update(2, 1, &mut l, &a, TOL).unwrap_err();
        assert!(err.value.abs() < 1e-12);
        assert!(l[3].is_nan());
    }

    #[test]
    fn zero_column_is_rejected() {
        let a = [0.0];
        let mut l = vec![0.0];
        assert!(cholesky_update(1, 0, &mut l, &a, 0.0).is_err());
    }
}
