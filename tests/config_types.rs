//! Integration tests for configuration types.

use tabbench::config::{BenchConfig, ModelConfig, ModelType};

// ---------------------------------------------------------------------------
// ModelType
// ---------------------------------------------------------------------------

#[test]
fn model_type_default_is_the_transformer() {
    match ModelType::default() {
        ModelType::TabTransformer { n_estimators, .. } => assert!(n_estimators > 0),
        other => panic!("default ModelType should be TabTransformer, got {:?}", other),
    }
}

#[test]
fn model_type_from_str_gbdt() {
    let mt: ModelType = "gbdt".parse().unwrap();
    match mt {
        ModelType::Gbdt { max_depth, num_boost_round, .. } => {
            assert_eq!(max_depth, 6);
            assert!(num_boost_round > 0);
        }
        other => panic!("expected Gbdt, got {:?}", other),
    }
}

#[test]
fn model_type_from_str_tab_transformer() {
    let mt: ModelType = "tab_transformer".parse().unwrap();
    match mt {
        ModelType::TabTransformer { device, weights, .. } => {
            assert_eq!(device, "cpu");
            assert!(weights.is_none());
        }
        other => panic!("expected TabTransformer, got {:?}", other),
    }
}

#[test]
fn model_type_from_str_unknown_errors() {
    let result: Result<ModelType, _> = "random_forest".parse();
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

#[test]
fn model_config_display_name_defaults_to_variant() {
    let cfg = ModelConfig::new("gbdt".parse().unwrap());
    assert_eq!(cfg.display_name(), "GBDT");
}

#[test]
fn model_config_label_overrides_display_name() {
    let cfg = ModelConfig::with_label("gbdt".parse().unwrap(), "trees-v2");
    assert_eq!(cfg.display_name(), "trees-v2");
}

#[test]
fn model_config_serializes_to_json() {
    let cfg = ModelConfig::new(ModelType::default());
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("TabTransformer"));
    assert!(json.contains("n_estimators"));
}

#[test]
fn model_config_round_trips_json() {
    let cfg = ModelConfig::with_label("gbdt".parse().unwrap(), "trees");
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: ModelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg2.display_name(), "trees");
    match cfg2.model_type {
        ModelType::Gbdt { learning_rate, .. } => {
            assert!((learning_rate - 0.1).abs() < 1e-6);
        }
        other => panic!("expected Gbdt, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// BenchConfig
// ---------------------------------------------------------------------------

#[test]
fn bench_config_defaults() {
    let cfg = BenchConfig::default();
    assert!((cfg.test_fraction - 0.33).abs() < 1e-6);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.models.len(), 2);
}

#[test]
fn bench_config_partial_json_fills_defaults() {
    let cfg: BenchConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
    assert_eq!(cfg.seed, 7);
    assert!((cfg.test_fraction - 0.33).abs() < 1e-6);
    assert_eq!(cfg.models.len(), 2);
}

#[test]
fn bench_config_round_trips_json() {
    let cfg = BenchConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: BenchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg.seed, cfg2.seed);
    assert_eq!(cfg.models.len(), cfg2.models.len());
}
