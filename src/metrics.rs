//! Classification scoring.
use statrs::distribution::{Beta, ContinuousCDF};

use crate::error::BenchError;

/// Fraction of positions at which two label vectors agree, in [0, 1].
///
/// Purely elementwise, so the result is symmetric in its arguments.
/// Empty inputs agree vacuously and score 1.0.
pub fn accuracy(predictions: &[u32], truth: &[u32]) -> Result<f32, BenchError> {
    if predictions.len() != truth.len() {
        return Err(BenchError::LengthMismatch {
            expected: truth.len(),
            actual: predictions.len(),
        });
    }
    if predictions.is_empty() {
        return Ok(1.0);
    }
    let matches = predictions
        .iter()
        .zip(truth.iter())
        .filter(|(a, b)| a == b)
        .count();
    Ok(matches as f32 / predictions.len() as f32)
}

/// Clopper-Pearson binomial interval for `correct` successes out of `total`.
///
/// Returns `(lower, upper)` at confidence `1 - alpha`. The lower bound is 0
/// when nothing was correct and the upper bound is 1 when everything was.
pub fn accuracy_confidence_interval(correct: usize, total: usize, alpha: f64) -> (f64, f64) {
    assert!(total > 0, "interval requires at least one trial");
    assert!(correct <= total, "more successes than trials");

    let k = correct as f64;
    let n = total as f64;

    let lower = if correct == 0 {
        0.0
    } else {
        Beta::new(k, n - k + 1.0)
            .expect("valid Beta parameters")
            .inverse_cdf(alpha / 2.0)
    };
    let upper = if correct == total {
        1.0
    } else {
        Beta::new(k + 1.0, n - k)
            .expect("valid Beta parameters")
            .inverse_cdf(1.0 - alpha / 2.0)
    };
    (lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_agreement_scores_one() {
        let a = vec![0, 1, 1, 0];
        assert_eq!(accuracy(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn total_disagreement_scores_zero() {
        let a = vec![0, 0, 0];
        let b = vec![1, 1, 1];
        assert_eq!(accuracy(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn accuracy_is_symmetric() {
        let a = vec![0, 1, 0, 1, 1];
        let b = vec![0, 1, 1, 1, 0];
        assert_eq!(accuracy(&a, &b).unwrap(), accuracy(&b, &a).unwrap());
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let a = vec![0, 1];
        let b = vec![0, 1, 1];
        assert_eq!(
            accuracy(&a, &b),
            Err(BenchError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn interval_brackets_the_point_estimate() {
        let (lo, hi) = accuracy_confidence_interval(90, 100, 0.05);
        assert!(lo < 0.9 && 0.9 < hi);
        assert!(lo > 0.8 && hi < 1.0);
    }

    #[test]
    fn interval_degenerate_ends() {
        let (lo, _) = accuracy_confidence_interval(0, 10, 0.05);
        assert_eq!(lo, 0.0);
        let (_, hi) = accuracy_confidence_interval(10, 10, 0.05);
        assert_eq!(hi, 1.0);
    }
}
