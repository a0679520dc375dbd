use anyhow::{anyhow, bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::config::{ModelConfig, ModelType};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;

/// Gradient-boosted decision tree classifier.
///
/// Binary only: the wrapped engine trains on {-1, +1} labels with a
/// log-likelihood loss, so class indices {0, 1} are remapped on the way in
/// and `predict` yields the probability of class 1 on the way out.
pub struct GbdtClassifier {
    model: Option<GBDT>,
    learning_rate: f32,
    max_depth: u32,
    num_boost_round: u32,
    debug: bool,
    training_optimization_level: u8,
    loss_type: String,
}

impl GbdtClassifier {
    pub fn new(config: ModelConfig) -> Result<Self> {
        match config.model_type {
            ModelType::Gbdt {
                learning_rate,
                max_depth,
                num_boost_round,
                debug,
                training_optimization_level,
                loss_type,
            } => Ok(GbdtClassifier {
                model: None,
                learning_rate,
                max_depth,
                num_boost_round,
                debug,
                training_optimization_level,
                loss_type,
            }),
            other => bail!("Expected Gbdt params, got {:?}", other),
        }
    }
}

impl ClassifierModel for GbdtClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[u32]) -> Result<()> {
        if x.nrows() != y.len() {
            bail!("{} rows but {} labels", x.nrows(), y.len());
        }
        if let Some(&bad) = y.iter().find(|&&v| v > 1) {
            bail!(
                "GBDT adapter supports binary classification; found class index {}",
                bad
            );
        }

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_shrinkage(self.learning_rate);
        config.set_max_depth(self.max_depth);
        config.set_iterations(self.num_boost_round as usize);
        config.set_debug(self.debug);
        config.set_training_optimization_level(self.training_optimization_level);
        config.set_loss(&self.loss_type);

        let mut gbdt = GBDT::new(&config);

        let mut train_x = DataVec::new();
        for (i, row) in (0..x.nrows()).map(|r| (r, x.row_slice(r))) {
            // Engine label convention: class 0 -> -1, class 1 -> +1.
            let label = if y[i] == 1 { 1.0 } else { -1.0 };
            train_x.push(Data::new_training_data(row.to_vec(), 1.0, label, None));
        }

        gbdt.fit(&mut train_x);
        self.model = Some(gbdt);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<Vec<f32>>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("GBDT model has not been fitted"))?;

        let mut test_x = DataVec::new();
        for row in 0..x.nrows() {
            test_x.push(Data::new_training_data(x.row_slice(row).to_vec(), 1.0, 0.0, None));
        }

        let predictions = model.predict(&test_x);
        Ok(predictions
            .into_iter()
            .map(|p| {
                let p = p.clamp(0.0, 1.0);
                vec![1.0 - p, p]
            })
            .collect())
    }

    fn name(&self) -> &str {
        "GBDT"
    }
}
