use crate::error::BenchError;
use crate::math::{Array1, Array2};

/// An in-memory labeled tabular dataset.
///
/// `x` holds one row of real-valued attributes per sample; `y` holds the
/// class index for the same row. Both are immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<u32>,
    /// Column names, aligned with the columns of `x`.
    pub feature_names: Vec<String>,
    /// Human-readable names indexed by class id.
    pub class_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        x: Array2<f32>,
        y: Array1<u32>,
        feature_names: Vec<String>,
        class_names: Vec<String>,
    ) -> Result<Self, BenchError> {
        if x.nrows() != y.len() {
            return Err(BenchError::LengthMismatch {
                expected: x.nrows(),
                actual: y.len(),
            });
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
            class_names,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of distinct classes. Derived from the class-name table when
    /// present, otherwise from the largest label seen.
    pub fn n_classes(&self) -> usize {
        if !self.class_names.is_empty() {
            return self.class_names.len();
        }
        self.y
            .iter()
            .max()
            .map(|&m| m as usize + 1)
            .unwrap_or(0)
    }

    pub fn log_summary(&self) {
        log::info!(
            "Loaded {} samples with {} features across {} classes",
            self.n_rows(),
            self.n_features(),
            self.n_classes()
        );
        for (id, name) in self.class_names.iter().enumerate() {
            let count = self.y.iter().filter(|&&v| v as usize == id).count();
            log::debug!("class {} ({}): {} samples", id, name, count);
        }
    }
}
