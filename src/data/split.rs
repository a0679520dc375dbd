//! Deterministic train/test partitioning.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::Dataset;
use crate::error::BenchError;
use crate::math::{Array1, Array2};

/// A single train/test partition of a dataset.
///
/// Invariants: `train_indices` and `test_indices` are disjoint, sorted, and
/// together cover every row of the source dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f32>,
    pub x_test: Array2<f32>,
    pub y_train: Array1<u32>,
    pub y_test: Array1<u32>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    pub fn n_train(&self) -> usize {
        self.train_indices.len()
    }

    pub fn n_test(&self) -> usize {
        self.test_indices.len()
    }
}

/// Partition `dataset` into train and held-out rows.
///
/// The partition is a pure function of `(seed, test_fraction, n_rows)`:
/// row indices are shuffled with a seeded RNG and the first
/// `round(n * test_fraction)` of them (clamped so neither side is empty)
/// become the test set.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f32,
    seed: u64,
) -> Result<TrainTestSplit, BenchError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(BenchError::InvalidFraction(test_fraction));
    }
    let n_samples = dataset.n_rows();
    if n_samples < 2 {
        return Err(BenchError::EmptyDataset);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);

    let n_test = ((n_samples as f32) * test_fraction).round() as usize;
    let n_test = n_test.clamp(1, n_samples - 1);

    let mut test_indices: Vec<usize> = indices[..n_test].to_vec();
    let mut train_indices: Vec<usize> = indices[n_test..].to_vec();
    test_indices.sort_unstable();
    train_indices.sort_unstable();

    log::debug!(
        "split: {} train / {} test rows (fraction {}, seed {})",
        train_indices.len(),
        test_indices.len(),
        test_fraction,
        seed
    );

    Ok(TrainTestSplit {
        x_train: dataset.x.select_rows(&train_indices),
        x_test: dataset.x.select_rows(&test_indices),
        y_train: dataset.y.select(&train_indices),
        y_test: dataset.y.select(&test_indices),
        train_indices,
        test_indices,
    })
}
