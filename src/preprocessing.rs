//! Feature standardization.
//!
//! The transformer adapter standardizes inputs against training-set
//! statistics; tree models consume raw features.

use crate::math::Array2;

/// Per-column mean/std standardizer.
#[derive(Clone, Debug)]
pub struct Scaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    /// Fit column statistics from a matrix whose rows are samples.
    pub fn fit(x: &Array2<f32>) -> Scaler {
        let (nrows, ncols) = x.shape();
        assert!(nrows > 0 && ncols > 0, "Scaler::fit requires a non-empty matrix");

        let mut mean = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                mean[c] += x[(r, c)];
            }
        }
        let nrows_f = nrows as f32;
        for v in mean.iter_mut() {
            *v /= nrows_f;
        }

        let mut std = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                let d = x[(r, c)] - mean[c];
                std[c] += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows_f).sqrt().max(Self::MIN_STD);
        }

        Scaler { mean, std }
    }

    /// Standardize all rows against the fitted statistics.
    pub fn transform(&self, x: &Array2<f32>) -> Array2<f32> {
        let (nrows, ncols) = x.shape();
        assert_eq!(ncols, self.mean.len(), "Scaler fitted on a different width");

        let mut out = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                out.push((x[(r, c)] - self.mean[c]) / self.std[c]);
            }
        }
        Array2::from_shape_vec((nrows, ncols), out).expect("Scaler::transform: shape mismatch")
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}
