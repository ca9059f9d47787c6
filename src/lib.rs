//! Rust implementation of multinomial logistic regression
//!
//! Ships with the Iris flower dataset and a small demo that trains on a
//! random split, reports held-out accuracy and classifies one measurement.

pub mod api;
pub mod core;
pub mod data;
pub mod demo;
pub mod input;
pub mod objective;
pub mod optimizer;
pub mod solver;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{ConfusionMatrix, LogisticRegression, ModelInfo, TrainedModel};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{LogitError, Result};
pub use crate::data::{InMemoryDataset, IrisDataset, Species};
pub use crate::demo::{run_demo, DemoConfig, DemoReport};
pub use crate::objective::{Objective, SoftmaxCrossEntropy};
pub use crate::optimizer::{LogisticRegressionOptimizer, TrainedLogisticRegression};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
