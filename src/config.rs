use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    /// Pretrained ensembling in-context transformer predictor.
    TabTransformer {
        /// Number of ensemble configurations (feature permutations).
        n_estimators: u32,
        embed_dim: usize,
        num_heads: usize,
        num_layers: usize,
        ff_dim: usize,
        /// Fixed input width; rows with fewer features are zero-padded.
        max_features: usize,
        /// Class capacity of the network head.
        max_classes: usize,
        /// Compute device, "cpu" or "cuda:N".
        device: String,
        /// Optional safetensors checkpoint. Random init when absent.
        weights: Option<PathBuf>,
    },
    /// Gradient-boosted decision trees.
    Gbdt {
        learning_rate: f32,
        max_depth: u32,
        num_boost_round: u32,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
}

impl ModelType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::TabTransformer { .. } => "TabTransformer",
            ModelType::Gbdt { .. } => "GBDT",
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::TabTransformer {
            n_estimators: 4,
            embed_dim: 128,
            num_heads: 4,
            num_layers: 4,
            ff_dim: 256,
            max_features: 100,
            max_classes: 10,
            device: "cpu".to_string(),
            weights: None,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab_transformer" => Ok(ModelType::default()),
            "gbdt" => Ok(ModelType::Gbdt {
                learning_rate: 0.1,
                max_depth: 6,
                num_boost_round: 50,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            }),
            _ => Err(format!(
                "Unknown model type: {}. Expected one of: tab_transformer, gbdt",
                s
            )),
        }
    }
}

/// One benchmarked model: its hyper-parameters plus an optional display
/// label override for reports.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(flatten)]
    pub model_type: ModelType,
}

impl ModelConfig {
    pub fn new(model_type: ModelType) -> Self {
        Self {
            label: None,
            model_type,
        }
    }

    pub fn with_label(model_type: ModelType, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            model_type,
        }
    }

    /// Label shown in the summary and report.
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.model_type.display_name().to_string())
    }
}

fn default_test_fraction() -> f32 {
    0.33
}

fn default_seed() -> u64 {
    42
}

fn default_models() -> Vec<ModelConfig> {
    vec![
        ModelConfig::new(ModelType::default()),
        ModelConfig::new("gbdt".parse().expect("builtin model type")),
    ]
}

/// Full benchmark configuration: split settings plus the model roster.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BenchConfig {
    /// Fraction of rows held out for evaluation, in (0, 1).
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f32,
    /// Seed for the split (and nothing else).
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            models: default_models(),
        }
    }
}

impl BenchConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config: {}", path.as_ref().display()))
    }
}
