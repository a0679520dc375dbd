//! tabbench: a benchmarking harness for tabular classification models.
//!
//! The crate wires one linear pipeline: a dataset loader, a deterministic
//! train/test splitter, two model adapters behind a shared fit/predict
//! contract (a pretrained in-context transformer predictor and a
//! gradient-boosted tree model), an accuracy scorer, and a reporter. The
//! predictive engines themselves are external; this crate only adapts them.
//!
//! Execution is sequential and single-threaded throughout: models run one
//! at a time against the same split, with no shared mutable state.
pub mod bench;
pub mod config;
pub mod data;
pub mod error;
pub mod math;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod report;
