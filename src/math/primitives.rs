//! Dense kernels on flat row-major buffers.
//!
//! Every routine takes an explicit row stride. The selection workspace keeps
//! `n × n` scratch blocks and only uses their leading `count × count` corner,
//! so the stride is the allocated width rather than the logical size.

/// `Σ a[i]·b[i]` over the first `n` entries.
pub fn dot(n: usize, a: &[f64], b: &[f64]) -> f64 {
    let mut acc = 0.0;
    for i in 0..n {
        acc += a[i] * b[i];
    }
    acc
}

/// `y = A·x` restricted to the leading `count × count` block of `a`.
///
/// `stride` is the row width of `a` as allocated (not `count`).
pub fn matrix_vector(stride: usize, count: usize, a: &[f64], x: &[f64], y: &mut [f64]) {
    for i in 0..count {
        let row = &a[i * stride..i * stride + count];
        y[i] = dot(count, row, x);
    }
}

/// `c = Aᵗ·b` for an `m × n` row-major `a` and a length-`m` `b`.
pub fn matrix_transpose_vector(m: usize, n: usize, a: &[f64], b: &[f64], c: &mut [f64]) {
    for i in 0..n {
        let mut acc = 0.0;
        for j in 0..m {
            acc += a[j * n + i] * b[j];
        }
        c[i] = acc;
    }
}

/// Gram matrix `G = Aᵗ·A` (`n × n`, row-major) of an `m × n` row-major `a`.
///
/// O(m·n²). Only the upper triangle is accumulated; the lower one is mirrored,
/// which keeps `G` exactly symmetric.
pub fn gramian(m: usize, n: usize, a: &[f64], g: &mut [f64]) {
    for k in 0..n {
        for j in k..n {
            let mut acc = 0.0;
            for i in 0..m {
                acc += a[i * n + k] * a[i * n + j];
            }
            g[k * n + j] = acc;
            g[j * n + k] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_only_reads_prefix() {
        let a = [1.0, 2.0, 3.0, 100.0];
        let b = [4.0, 5.0, 6.0, f64::NAN];
        assert_eq!(dot(3, &a, &b), 32.0);
    }

    #[test]
    fn dot_propagates_nan() {
        let a = [1.0, f64::NAN];
        let b = [1.0, 1.0];
        assert!(dot(2, &a, &b).is_nan());
    }

    #[test]
    fn matrix_vector_uses_full_stride() {
        // 3x3 buffer, only the leading 2x2 block is meaningful.
        let a = [1.0, 2.0, 99.0, 3.0, 4.0, 99.0, 99.0, 99.0, 99.0];
        let x = [1.0, 1.0, 99.0];
        let mut y = [0.0; 3];
        matrix_vector(3, 2, &a, &x, &mut y);
        assert_eq!(&y[..2], &[3.0, 7.0]);
        assert_eq!(y[2], 0.0);
    }

    #[test]
    fn transpose_vector_and_gramian() {
        // A = [[1, 2], [3, 4], [5, 6]]
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0, 0.0, -1.0];

        let mut c = [0.0; 2];
        matrix_transpose_vector(3, 2, &a, &b, &mut c);
        assert_eq!(c, [-4.0, -4.0]);

        let mut g = [0.0; 4];
        gramian(3, 2, &a, &mut g);
        assert_eq!(g, [35.0, 44.0, 44.0, 56.0]);
    }
}
