use anyhow::Result;

use crate::math::Array2;

/// Uniform contract over the benchmarked predictive engines.
///
/// After `fit(train_x, train_y)`, `predict(test_x)` returns exactly one
/// class index per row of `test_x`. Implementations must not use held-out
/// statistics: each row's prediction is independent of all other rows
/// passed to the same call.
pub trait ClassifierModel {
    /// Fit the model. `y` holds class indices starting at 0, row-aligned
    /// with `x`.
    fn fit(&mut self, x: &Array2<f32>, y: &[u32]) -> Result<()>;

    /// Per-class probabilities, one row per input row, each summing to ~1.
    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<Vec<f32>>>;

    /// Hard labels; the first maximal class wins on ties.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<u32>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.iter().map(|row| argmax_label(row)).collect())
    }

    /// Human readable name for the model.
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Index of the first maximal entry.
pub fn argmax_label(row: &[f32]) -> u32 {
    let mut best = 0usize;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v > best_value {
            best_value = v;
            best = i;
        }
    }
    best as u32
}
