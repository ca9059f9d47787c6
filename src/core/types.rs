//! Core type definitions for logistic regression

use crate::utils::scaling::ScalingMethod;

/// Prediction result containing the winning class and the per-class probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class index
    pub label: usize,
    /// Softmax probability of every class, indexed by class
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: usize, probabilities: Vec<f64>) -> Self {
        Self {
            label,
            probabilities,
        }
    }

    /// Build a prediction from class probabilities, picking the most likely class.
    /// Ties go to the lowest class index.
    pub fn from_probabilities(probabilities: Vec<f64>) -> Self {
        let mut label = 0;
        for (k, &p) in probabilities.iter().enumerate() {
            if p > probabilities[label] {
                label = k;
            }
        }
        Self::new(label, probabilities)
    }

    /// Probability assigned to the predicted class
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.label).copied().unwrap_or(0.0)
    }
}

/// Dense feature vector
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DenseVector {
    values: Vec<f64>,
}

impl DenseVector {
    /// Create a new dense vector
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Vector of `dim` zeros
    pub fn zeros(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
        }
    }

    /// Number of components
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Get the value at a specific index (0 if out of range)
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Dot product with a slice of the same length
    pub fn dot(&self, other: &[f64]) -> f64 {
        self.values.iter().zip(other).map(|(a, b)| a * b).sum()
    }

    /// Compute squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }

    /// Compute L2 norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Check if vector has no components
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for DenseVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for DenseVector {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

/// Training sample with features and label
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Feature vector
    pub features: DenseVector,
    /// Class index
    pub label: usize,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: DenseVector, label: usize) -> Self {
        Self { features, label }
    }
}

/// Iterative minimizer used to fit the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// Limited-memory BFGS with backtracking line search
    #[default]
    Lbfgs,
    /// Fixed-step batch gradient descent
    GradientDescent,
}

/// Why an optimizer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Largest absolute gradient component fell below the tolerance
    GradientTolerance,
    /// Relative objective reduction became negligible
    FunctionTolerance,
    /// Iteration cap reached first
    MaxIterations,
    /// No step along the search direction decreased the objective
    LineSearchStalled,
}

/// Result of optimization process
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Final parameter vector
    pub params: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final objective value
    pub objective_value: f64,
    /// Largest absolute gradient component at the final parameters
    pub gradient_norm: f64,
    /// Stopping reason
    pub termination: Termination,
}

impl OptimizationResult {
    /// Whether the optimizer met one of its convergence criteria
    pub fn converged(&self) -> bool {
        matches!(
            self.termination,
            Termination::GradientTolerance | Termination::FunctionTolerance
        )
    }
}

/// Configuration for optimizer
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Inverse regularization strength
    pub c: f64,
    /// Convergence tolerance on the largest absolute gradient component
    pub tolerance: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Minimizer
    pub solver: SolverKind,
    /// Number of correction pairs kept by L-BFGS
    pub history_size: usize,
    /// Step size for gradient descent
    pub learning_rate: f64,
    /// Optional feature scaling fitted on the training samples
    pub feature_scaling: Option<ScalingMethod>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-4,
            max_iterations: 10000,
            solver: SolverKind::Lbfgs,
            history_size: 10,
            learning_rate: 0.5,
            feature_scaling: None,
        }
    }
}

impl OptimizerConfig {
    /// Reject settings no solver can work with
    pub fn validate(&self) -> crate::core::Result<()> {
        use crate::core::LogitError;

        if self.c <= 0.0 || !self.c.is_finite() {
            return Err(LogitError::InvalidParameter(format!(
                "C must be positive and finite, got: {}",
                self.c
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(LogitError::InvalidParameter(format!(
                "Tolerance must be positive, got: {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(LogitError::InvalidParameter(
                "Maximum iterations must be at least 1".to_string(),
            ));
        }
        if self.history_size == 0 {
            return Err(LogitError::InvalidParameter(
                "L-BFGS history size must be at least 1".to_string(),
            ));
        }
        if self.learning_rate <= 0.0 || !self.learning_rate.is_finite() {
            return Err(LogitError::InvalidParameter(format!(
                "Learning rate must be positive and finite, got: {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_vector_basics() {
        let v = DenseVector::from([3.0, 4.0]);
        assert_eq!(v.dim(), 2);
        assert_eq!(v.get(0), 3.0);
        assert_eq!(v.get(5), 0.0);
        assert_eq!(v.norm_squared(), 25.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.dot(&[1.0, 2.0]), 11.0);
        assert!(!v.is_empty());
        assert!(DenseVector::default().is_empty());
        assert_eq!(DenseVector::zeros(4).as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_prediction_from_probabilities() {
        let pred = Prediction::from_probabilities(vec![0.2, 0.7, 0.1]);
        assert_eq!(pred.label, 1);
        assert_eq!(pred.confidence(), 0.7);

        // Ties resolve to the first class
        let tied = Prediction::from_probabilities(vec![0.5, 0.5]);
        assert_eq!(tied.label, 0);
    }

    #[test]
    fn test_sample() {
        let features = DenseVector::from([1.0, 3.0]);
        let sample = Sample::new(features.clone(), 2);
        assert_eq!(sample.label, 2);
        assert_eq!(sample.features, features);
    }

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.max_iterations, 10000);
        assert_eq!(config.solver, SolverKind::Lbfgs);
        assert_eq!(config.history_size, 10);
        assert_eq!(config.learning_rate, 0.5);
        assert!(config.feature_scaling.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optimizer_config_validation() {
        let bad_c = OptimizerConfig {
            c: 0.0,
            ..OptimizerConfig::default()
        };
        assert!(bad_c.validate().is_err());

        let bad_iterations = OptimizerConfig {
            max_iterations: 0,
            ..OptimizerConfig::default()
        };
        assert!(bad_iterations.validate().is_err());

        let bad_rate = OptimizerConfig {
            learning_rate: f64::NAN,
            ..OptimizerConfig::default()
        };
        assert!(bad_rate.validate().is_err());
    }

    #[test]
    fn test_optimization_result_converged() {
        let mut result = OptimizationResult {
            params: vec![0.0],
            iterations: 3,
            objective_value: 0.1,
            gradient_norm: 1e-6,
            termination: Termination::GradientTolerance,
        };
        assert!(result.converged());
        result.termination = Termination::MaxIterations;
        assert!(!result.converged());
    }
}
