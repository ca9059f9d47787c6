//! Training of multinomial logistic regression models
//!
//! This module integrates feature scaling, the softmax objective and the
//! configured solver, and provides the trained model used for prediction.

use crate::core::{
    Classifier, Dataset, DenseVector, LogitError, OptimizationResult, OptimizerConfig,
    Prediction, Result, Sample, SolverKind,
};
use crate::objective::{class_scores, softmax, Objective, SoftmaxCrossEntropy};
use crate::solver::{GradientDescentSolver, LbfgsSolver};
use crate::utils::scaling::ScalingParams;
use crate::utils::stats::class_counts;
use crate::utils::validation::validate_finite_features;
use log::{debug, warn};
use std::borrow::Cow;

/// Fits logistic regression parameters with the configured solver
pub struct LogisticRegressionOptimizer {
    config: OptimizerConfig,
}

impl LogisticRegressionOptimizer {
    /// Create a new optimizer with the given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Train a model on every sample of the dataset
    pub fn train<D: Dataset>(&self, dataset: &D) -> Result<TrainedLogisticRegression> {
        let samples: Vec<Sample> = (0..dataset.len()).map(|i| dataset.get_sample(i)).collect();
        self.train_samples(&samples, dataset.n_classes())
    }

    /// Train a model on samples labelled with classes `0..n_classes`
    pub fn train_samples(
        &self,
        samples: &[Sample],
        n_classes: usize,
    ) -> Result<TrainedLogisticRegression> {
        self.config.validate()?;

        let Some(first) = samples.first() else {
            return Err(LogitError::EmptyDataset);
        };
        let n_features = first.features.dim();
        if n_features == 0 {
            return Err(LogitError::InvalidDataset(
                "samples have no features".to_string(),
            ));
        }
        validate_finite_features(samples).map_err(LogitError::InvalidDataset)?;

        let scaler = self
            .config
            .feature_scaling
            .map(|method| ScalingParams::fit(samples, method));
        let training: Cow<'_, [Sample]> = match &scaler {
            Some(params) => Cow::Owned(params.transform_samples(samples)),
            None => Cow::Borrowed(samples),
        };

        // Also rejects ragged samples and out-of-range labels
        let objective = SoftmaxCrossEntropy::new(&training, n_features, n_classes, self.config.c)?;

        let labels: Vec<usize> = samples.iter().map(|s| s.label).collect();
        let present = class_counts(&labels, n_classes)
            .iter()
            .filter(|&&count| count > 0)
            .count();
        if present < 2 {
            return Err(LogitError::InvalidDataset(format!(
                "training data needs samples from at least 2 classes, found {present}"
            )));
        }

        debug!(
            "Fitting {n_classes}-class model on {} samples with {n_features} features using {:?}",
            samples.len(),
            self.config.solver
        );

        let initial = vec![0.0; objective.n_params()];
        let result = match self.config.solver {
            SolverKind::Lbfgs => LbfgsSolver::new(self.config.clone()).solve(&objective, initial)?,
            SolverKind::GradientDescent => {
                GradientDescentSolver::new(self.config.clone()).solve(&objective, initial)?
            }
        };

        if !result.converged() {
            warn!(
                "Solver stopped without converging after {} iterations ({:?}); increase max_iterations or scale the features",
                result.iterations, result.termination
            );
        }

        Ok(TrainedLogisticRegression {
            n_features,
            n_classes,
            scaler,
            result,
        })
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }
}

impl Default for LogisticRegressionOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

/// A fitted multinomial logistic regression model
#[derive(Debug, Clone)]
pub struct TrainedLogisticRegression {
    n_features: usize,
    n_classes: usize,
    scaler: Option<ScalingParams>,
    result: OptimizationResult,
}

impl TrainedLogisticRegression {
    /// Raw class scores `W x + b` for a feature vector in original units
    pub fn decision_function(&self, features: &DenseVector) -> Result<Vec<f64>> {
        if features.dim() != self.n_features {
            return Err(LogitError::DimensionMismatch {
                expected: self.n_features,
                actual: features.dim(),
            });
        }

        let scaled = match &self.scaler {
            Some(params) => Cow::Owned(params.transform(features)),
            None => Cow::Borrowed(features),
        };

        let mut scores = vec![0.0; self.n_classes];
        class_scores(&self.result.params, scaled.as_slice(), &mut scores);
        Ok(scores)
    }

    /// Class probabilities for a feature vector
    pub fn predict_proba(&self, features: &DenseVector) -> Result<Vec<f64>> {
        let mut scores = self.decision_function(features)?;
        softmax(&mut scores);
        Ok(scores)
    }

    /// Weight row of one class, in the (possibly scaled) feature space the model was fit in
    pub fn weights(&self, class: usize) -> Option<&[f64]> {
        let stride = self.n_features + 1;
        (class < self.n_classes)
            .then(|| &self.result.params[class * stride..class * stride + self.n_features])
    }

    /// Intercept of every class
    pub fn intercepts(&self) -> Vec<f64> {
        let stride = self.n_features + 1;
        (0..self.n_classes)
            .map(|k| self.result.params[k * stride + self.n_features])
            .collect()
    }

    /// Outcome of the optimization that produced this model
    pub fn optimization(&self) -> &OptimizationResult {
        &self.result
    }

    pub fn scaling(&self) -> Option<&ScalingParams> {
        self.scaler.as_ref()
    }
}

impl Classifier for TrainedLogisticRegression {
    fn predict(&self, features: &DenseVector) -> Result<Prediction> {
        Ok(Prediction::from_probabilities(self.predict_proba(features)?))
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
