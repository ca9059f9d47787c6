//! High-level API for logistic regression
//!
//! This module provides a user-friendly interface for common tasks,
//! including training, prediction, and model evaluation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rlogit::api::LogisticRegression;
//! use rlogit::data::{train_test_split, IrisDataset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let iris = IrisDataset::load();
//! let split = train_test_split(&iris, 0.1, Some(42))?;
//!
//! let model = LogisticRegression::new()
//!     .with_c(1.0)
//!     .with_max_iterations(10_000)
//!     .train(&split.train)?;
//!
//! println!("Accuracy: {:.2}%", model.evaluate(&split.test)? * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{
    Classifier, Dataset, DenseVector, LogitError, OptimizerConfig, Prediction, Result, Sample,
    SolverKind, Termination,
};
use crate::optimizer::{LogisticRegressionOptimizer, TrainedLogisticRegression};
use crate::utils::scaling::ScalingMethod;

/// High-level logistic regression interface with builder pattern
#[derive(Debug, Clone, Default)]
pub struct LogisticRegression {
    config: OptimizerConfig,
}

impl LogisticRegression {
    /// Create a new model with default parameters (L-BFGS, C = 1, 10,000 iterations)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Set inverse regularization strength C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set maximum number of iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Choose the solver
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.config.solver = solver;
        self
    }

    /// Set the gradient descent step size
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set how many correction pairs L-BFGS keeps
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.config.history_size = history_size;
        self
    }

    /// Scale features before fitting; queries are scaled the same way
    pub fn with_feature_scaling(mut self, method: ScalingMethod) -> Self {
        self.config.feature_scaling = Some(method);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Train on a dataset
    pub fn train<D: Dataset>(self, dataset: &D) -> Result<TrainedModel> {
        let optimizer = LogisticRegressionOptimizer::new(self.config);
        let model = optimizer.train(dataset)?;
        Ok(TrainedModel { model })
    }

    /// Train on samples labelled with classes `0..n_classes`
    pub fn train_samples(self, samples: &[Sample], n_classes: usize) -> Result<TrainedModel> {
        let optimizer = LogisticRegressionOptimizer::new(self.config);
        let model = optimizer.train_samples(samples, n_classes)?;
        Ok(TrainedModel { model })
    }
}

/// Trained model with high-level prediction interface
#[derive(Debug, Clone)]
pub struct TrainedModel {
    model: TrainedLogisticRegression,
}

impl TrainedModel {
    /// Predict a single feature vector
    pub fn predict(&self, features: &DenseVector) -> Result<Prediction> {
        self.model.predict(features)
    }

    /// Predict multiple feature vectors
    pub fn predict_batch(&self, features: &[DenseVector]) -> Result<Vec<Prediction>> {
        self.model.predict_batch(features)
    }

    /// Predict every sample of a dataset
    pub fn predict_dataset<D: Dataset>(&self, dataset: &D) -> Result<Vec<Prediction>> {
        (0..dataset.len())
            .map(|i| self.model.predict(&dataset.get_sample(i).features))
            .collect()
    }

    /// Mean accuracy on a dataset
    pub fn evaluate<D: Dataset>(&self, dataset: &D) -> Result<f64> {
        let samples: Vec<Sample> = (0..dataset.len()).map(|i| dataset.get_sample(i)).collect();
        self.evaluate_samples(&samples)
    }

    /// Mean accuracy on labelled samples
    pub fn evaluate_samples(&self, samples: &[Sample]) -> Result<f64> {
        if samples.is_empty() {
            return Err(LogitError::EmptyDataset);
        }

        let mut correct = 0;
        for sample in samples {
            if self.model.predict(&sample.features)?.label == sample.label {
                correct += 1;
            }
        }

        Ok(correct as f64 / samples.len() as f64)
    }

    /// Confusion matrix over a dataset
    pub fn evaluate_detailed<D: Dataset>(&self, dataset: &D) -> Result<ConfusionMatrix> {
        let predictions = self.predict_dataset(dataset)?;
        let mut matrix = ConfusionMatrix::new(self.model.n_classes());

        for (pred, actual) in predictions.iter().zip(dataset.get_labels()) {
            matrix.record(actual, pred.label);
        }

        Ok(matrix)
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        let optimization = self.model.optimization();
        ModelInfo {
            n_classes: self.model.n_classes(),
            n_features: self.model.n_features(),
            iterations: optimization.iterations,
            objective_value: optimization.objective_value,
            termination: optimization.termination,
            converged: optimization.converged(),
        }
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &TrainedLogisticRegression {
        &self.model
    }
}

/// Multi-class confusion matrix; rows are true classes, columns predictions
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Empty matrix for `n_classes` classes
    pub fn new(n_classes: usize) -> Self {
        Self {
            counts: vec![vec![0; n_classes]; n_classes],
        }
    }

    /// Count one (actual, predicted) pair; pairs outside the matrix are ignored
    pub fn record(&mut self, actual: usize, predicted: usize) {
        if let Some(cell) = self
            .counts
            .get_mut(actual)
            .and_then(|row| row.get_mut(predicted))
        {
            *cell += 1;
        }
    }

    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples of class `actual` predicted as `predicted`
    pub fn count(&self, actual: usize, predicted: usize) -> usize {
        self.counts
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Calculate accuracy: trace / total
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            let correct: usize = (0..self.n_classes()).map(|k| self.count(k, k)).sum();
            correct as f64 / total as f64
        }
    }

    /// Calculate precision of one class: TP / (TP + FP)
    pub fn precision(&self, class: usize) -> f64 {
        let predicted: usize = (0..self.n_classes()).map(|a| self.count(a, class)).sum();
        if predicted == 0 {
            0.0
        } else {
            self.count(class, class) as f64 / predicted as f64
        }
    }

    /// Calculate recall of one class: TP / (TP + FN)
    pub fn recall(&self, class: usize) -> f64 {
        let actual: usize = self.counts.get(class).map(|row| row.iter().sum()).unwrap_or(0);
        if actual == 0 {
            0.0
        } else {
            self.count(class, class) as f64 / actual as f64
        }
    }

    /// Calculate F1 score of one class: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self, class: usize) -> f64 {
        let p = self.precision(class);
        let r = self.recall(class);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Unweighted mean of the per-class F1 scores
    pub fn macro_f1(&self) -> f64 {
        let n = self.n_classes();
        if n == 0 {
            return 0.0;
        }
        (0..n).map(|k| self.f1_score(k)).sum::<f64>() / n as f64
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub n_classes: usize,
    pub n_features: usize,
    pub iterations: usize,
    pub objective_value: f64,
    pub termination: Termination,
    pub converged: bool,
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::data::{train_test_split, IrisDataset};

    /// Train with default parameters on the whole Iris dataset
    pub fn train_iris() -> Result<TrainedModel> {
        LogisticRegression::new().train(&IrisDataset::load())
    }

    /// Random split, train on one part, return the accuracy on the other
    pub fn split_and_score<D: Dataset>(
        dataset: &D,
        test_size: f64,
        seed: Option<u64>,
        c: f64,
    ) -> Result<f64> {
        let split = train_test_split(dataset, test_size, seed)?;
        let model = LogisticRegression::new().with_c(c).train(&split.train)?;
        model.evaluate(&split.test)
    }
}
