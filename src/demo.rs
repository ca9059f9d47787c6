//! The Iris classifier demo: split, fit, score, and classify one query

use crate::api::{LogisticRegression, ModelInfo};
use crate::core::{DenseVector, OptimizerConfig, Prediction, Result};
use crate::data::{train_test_split, IrisDataset, Species};
use crate::input::InputCoercion;
use log::info;
use std::io::{self, Write};

/// Settings for one demo run
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Fraction of the dataset held out for scoring
    pub test_size: f64,
    /// Fixed shuffle seed; `None` draws a fresh split every run
    pub seed: Option<u64>,
    /// How typed measurements are parsed
    pub coercion: InputCoercion,
    pub optimizer: OptimizerConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            test_size: 0.1,
            seed: None,
            coercion: InputCoercion::Float,
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Outcome of a demo run
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Mean accuracy on the held-out partition
    pub accuracy: f64,
    /// Species predicted for the query
    pub species: Species,
    pub prediction: Prediction,
    pub model: ModelInfo,
}

impl DemoReport {
    /// Print the two result lines: accuracy, then species name
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{:?}", self.accuracy)?;
        writeln!(out, "{}", self.species)
    }
}

/// Split the dataset, fit on the training part, score on the test part and
/// classify `query`
pub fn run_demo(dataset: &IrisDataset, query: &DenseVector, config: &DemoConfig) -> Result<DemoReport> {
    let split = train_test_split(dataset, config.test_size, config.seed)?;
    info!(
        "Split {} samples into {} for training and {} for testing",
        dataset.samples().len(),
        split.train.samples().len(),
        split.test.samples().len()
    );

    let model = LogisticRegression::with_config(config.optimizer.clone()).train(&split.train)?;
    let info = model.info();
    info!(
        "Training finished after {} iterations ({:?}), objective {:.6}",
        info.iterations, info.termination, info.objective_value
    );

    let accuracy = model.evaluate(&split.test)?;
    let prediction = model.predict(query)?;
    let species = Species::from_index(prediction.label)?;
    info!(
        "Query {:?} classified as {species} with probability {:.3}",
        query.as_slice(),
        prediction.confidence()
    );

    Ok(DemoReport {
        accuracy,
        species,
        prediction,
        model: info,
    })
}
