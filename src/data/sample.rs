//! Synthetic sparse regression problems.
//!
//! The design has i.i.d. standard-normal entries. A handful of "informative"
//! columns carry non-zero coefficients with magnitude in `[1, 3]` and a random
//! sign; the response is `A·x_true + noise·ε`. Everything is driven by one
//! seeded `StdRng`, so a config always yields the same problem.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use rand_distr::Normal;

use crate::domain::Problem;
use crate::error::AppError;

/// Smallest and largest absolute value of an informative coefficient.
const COEF_RANGE: (f64, f64) = (1.0, 3.0);

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub rows: usize,
    pub cols: usize,
    pub informative: usize,
    pub noise: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct SyntheticProblem {
    pub problem: Problem,
    /// Length `cols`; zero outside `support`.
    pub true_coefficients: Vec<f64>,
    /// Informative features, ascending.
    pub support: Vec<usize>,
}

pub fn generate_problem(config: &SampleConfig) -> Result<SyntheticProblem, AppError> {
    if config.rows == 0 || config.cols == 0 {
        return Err(AppError::new(2, "Synthetic problem needs at least one row and one column."));
    }
    if config.informative > config.cols {
        return Err(AppError::new(
            2,
            format!(
                "Informative feature count ({}) exceeds column count ({}).",
                config.informative, config.cols
            ),
        ));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise level must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let (m, n) = (config.rows, config.cols);
    let a: Vec<f64> = (0..m * n).map(|_| normal.sample(&mut rng)).collect();

    let mut support = index::sample(&mut rng, n, config.informative).into_vec();
    support.sort_unstable();

    let mut true_coefficients = vec![0.0; n];
    for &f in &support {
        let magnitude = rng.gen_range(COEF_RANGE.0..=COEF_RANGE.1);
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        true_coefficients[f] = sign * magnitude;
    }

    let b: Vec<f64> = (0..m)
        .map(|i| {
            let signal: f64 = support.iter().map(|&f| a[i * n + f] * true_coefficients[f]).sum();
            signal + config.noise * normal.sample(&mut rng)
        })
        .collect();

    let problem = Problem::from_row_major(m, n, a, b)?;
    Ok(SyntheticProblem {
        problem,
        true_coefficients,
        support,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SampleConfig {
        SampleConfig {
            rows: 40,
            cols: 8,
            informative: 3,
            noise: 0.1,
            seed: 7,
        }
    }

    #[test]
    fn same_seed_same_problem() {
        let a = generate_problem(&config()).unwrap();
        let b = generate_problem(&config()).unwrap();
        assert_eq!(a.problem, b.problem);
        assert_eq!(a.support, b.support);
    }

    #[test]
    fn support_matches_non_zero_coefficients() {
        let s = generate_problem(&config()).unwrap();
        assert_eq!(s.support.len(), 3);
        for (f, &c) in s.true_coefficients.iter().enumerate() {
            assert_eq!(c != 0.0, s.support.contains(&f));
            if c != 0.0 {
                assert!(c.abs() >= 1.0 && c.abs() <= 3.0);
            }
        }
    }

    #[test]
    fn rejects_bad_configs() {
        let mut c = config();
        c.informative = 9;
        assert_eq!(generate_problem(&c).unwrap_err().exit_code(), 2);

        let mut c = config();
        c.noise = f64::NAN;
        assert!(generate_problem(&c).is_err());

        let mut c = config();
        c.rows = 0;
        assert!(generate_problem(&c).is_err());
    }
}
