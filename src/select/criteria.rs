//! Subset-size diagnostics along a greedy path.
//!
//! For each size k the path gives one subset and its RSS. We report:
//! - RMSE = sqrt(RSS / m)
//! - BIC = m * ln(RSS/m) + k * ln(m)
//!
//! Size recommendation:
//! 1. Find the minimum BIC over finite steps
//! 2. Pick the smallest size within 2 BIC points of it

use crate::domain::{SelectionPath, StepQuality};

/// ΔBIC below which a smaller subset is preferred.
const BIC_SIMPLICITY_MARGIN: f64 = 2.0;

pub fn bic(m: usize, rss: f64, k: usize) -> f64 {
    let m_f = m as f64;
    let rss_per = (rss / m_f).max(1e-12);
    m_f * rss_per.ln() + (k as f64) * m_f.ln()
}

/// Quality diagnostics for every step of `path`.
pub fn step_quality(path: &SelectionPath) -> Vec<StepQuality> {
    let m = path.n_obs;
    path.features
        .iter()
        .zip(&path.rss)
        .enumerate()
        .map(|(i, (&feature, &rss))| StepQuality {
            size: i + 1,
            feature,
            rss,
            rmse: (rss.max(0.0) / m as f64).sqrt(),
            bic: bic(m, rss, i + 1),
        })
        .collect()
}

/// Recommended subset size, or `None` when no step is finite.
pub fn recommend_size(steps: &[StepQuality]) -> Option<usize> {
    let best_bic = steps
        .iter()
        .map(|s| s.bic)
        .filter(|b| b.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !best_bic.is_finite() {
        return None;
    }

    steps
        .iter()
        .find(|s| s.bic.is_finite() && s.bic <= best_bic + BIC_SIMPLICITY_MARGIN)
        .map(|s| s.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quality(size: usize, bic: f64) -> StepQuality {
        StepQuality {
            size,
            feature: size - 1,
            rss: 0.0,
            rmse: 0.0,
            bic,
        }
    }

    #[test]
    fn prefers_simpler_when_close() {
        let steps = vec![quality(1, 30.0), quality(2, 11.5), quality(3, 10.0), quality(4, 12.0)];
        assert_eq!(recommend_size(&steps), Some(2));
    }

    #[test]
    fn skips_non_finite_steps() {
        let steps = vec![quality(1, 5.0), quality(2, f64::NAN)];
        assert_eq!(recommend_size(&steps), Some(1));
        assert_eq!(recommend_size(&[quality(1, f64::NAN)]), None);
    }

    #[test]
    fn bic_penalizes_size() {
        assert!(bic(100, 10.0, 3) > bic(100, 10.0, 2));
        // Perfect fits are floored instead of producing -inf.
        assert!(bic(10, 0.0, 1).is_finite());
    }
}
