//! Model adapters and the shared classifier contract.
pub mod classifier_trait;
pub mod factory;
pub mod gbdt;
pub mod nn;
pub mod tab_transformer;

pub use classifier_trait::{argmax_label, ClassifierModel};
