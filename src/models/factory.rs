use anyhow::{Context, Result};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Build a boxed classifier model from a `ModelConfig`.
///
/// Fallible because transformer construction touches the device and an
/// optional weights checkpoint.
pub fn build_model(config: ModelConfig) -> Result<Box<dyn ClassifierModel>> {
    let name = config.display_name();
    match config.model_type {
        ModelType::TabTransformer { .. } => {
            let model = crate::models::tab_transformer::TabTransformerClassifier::new(config)
                .with_context(|| format!("Failed to build model '{}'", name))?;
            Ok(Box::new(model))
        }
        ModelType::Gbdt { .. } => {
            let model = crate::models::gbdt::GbdtClassifier::new(config)
                .with_context(|| format!("Failed to build model '{}'", name))?;
            Ok(Box::new(model))
        }
    }
}
