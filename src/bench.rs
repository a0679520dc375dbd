//! The benchmark runner: load -> split -> fit/predict per model -> score.
use anyhow::{Context, Result};

use crate::config::BenchConfig;
use crate::data::{train_test_split, Dataset};
use crate::metrics;
use crate::models::factory;

/// Outcome for a single benchmarked model.
#[derive(Debug, Clone)]
pub struct ModelResult {
    pub name: String,
    pub accuracy: f32,
    pub correct: usize,
    pub total: usize,
    pub predictions: Vec<u32>,
    /// Per-class probability rows, aligned with `predictions`.
    pub probabilities: Vec<Vec<f32>>,
}

/// Outcome of a full benchmark run.
#[derive(Debug, Clone)]
pub struct BenchSummary {
    pub n_rows: usize,
    pub n_features: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub test_fraction: f32,
    pub seed: u64,
    pub truth: Vec<u32>,
    pub results: Vec<ModelResult>,
}

pub struct BenchmarkRunner {
    config: BenchConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Run every configured model against one deterministic split, strictly
    /// one at a time. Any model failure aborts the whole run.
    pub fn run(&self, dataset: &Dataset) -> Result<BenchSummary> {
        dataset.log_summary();

        let split = train_test_split(dataset, self.config.test_fraction, self.config.seed)?;
        log::info!(
            "Benchmarking {} models on {} train / {} test rows",
            self.config.models.len(),
            split.n_train(),
            split.n_test()
        );

        let mut results = Vec::with_capacity(self.config.models.len());
        for model_config in &self.config.models {
            let name = model_config.display_name();
            let mut model = factory::build_model(model_config.clone())?;

            log::info!("Training {}", name);
            model
                .fit(&split.x_train, split.y_train.as_slice())
                .with_context(|| format!("Training failed for '{}'", name))?;

            log::info!("Evaluating {}", name);
            let probabilities = model
                .predict_proba(&split.x_test)
                .with_context(|| format!("Prediction failed for '{}'", name))?;
            let predictions: Vec<u32> = probabilities
                .iter()
                .map(|row| crate::models::argmax_label(row))
                .collect();

            let accuracy = metrics::accuracy(&predictions, split.y_test.as_slice())?;
            let correct = predictions
                .iter()
                .zip(split.y_test.iter())
                .filter(|(a, b)| a == b)
                .count();
            let (lo, hi) = metrics::accuracy_confidence_interval(correct, split.n_test(), 0.05);
            log::debug!(
                "{}: {}/{} correct, 95% interval [{:.4}, {:.4}]",
                name,
                correct,
                split.n_test(),
                lo,
                hi
            );

            results.push(ModelResult {
                name,
                accuracy,
                correct,
                total: split.n_test(),
                predictions,
                probabilities,
            });
        }

        Ok(BenchSummary {
            n_rows: dataset.n_rows(),
            n_features: dataset.n_features(),
            n_train: split.n_train(),
            n_test: split.n_test(),
            test_fraction: self.config.test_fraction,
            seed: self.config.seed,
            truth: split.y_test.to_vec(),
            results,
        })
    }
}
