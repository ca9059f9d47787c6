//! Fixed-step batch gradient descent

use crate::core::{LogitError, OptimizationResult, OptimizerConfig, Result, Termination};
use crate::objective::Objective;
use crate::solver::{ensure_finite, max_abs};
use log::debug;

/// Gradient descent with a constant learning rate
///
/// Works best on standardized features; on raw features the step size must
/// be small enough for the largest curvature of the objective.
pub struct GradientDescentSolver {
    config: OptimizerConfig,
}

impl GradientDescentSolver {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Minimize `objective` starting from `initial`
    ///
    /// A step that drives the objective to a non-finite value aborts with
    /// `OptimizationError`.
    pub fn solve<O: Objective>(&self, objective: &O, initial: Vec<f64>) -> Result<OptimizationResult> {
        self.config.validate()?;

        let n = objective.n_params();
        if initial.len() != n {
            return Err(LogitError::DimensionMismatch {
                expected: n,
                actual: initial.len(),
            });
        }

        let rate = self.config.learning_rate;
        let mut x = initial;
        let mut grad = vec![0.0; n];
        let mut value = objective.evaluate(&x, &mut grad);
        ensure_finite(value, 0)?;

        let mut iterations = 0;
        let termination = loop {
            if max_abs(&grad) <= self.config.tolerance {
                break Termination::GradientTolerance;
            }
            if iterations == self.config.max_iterations {
                break Termination::MaxIterations;
            }

            for (xi, gi) in x.iter_mut().zip(&grad) {
                *xi -= rate * gi;
            }
            iterations += 1;

            value = objective.evaluate(&x, &mut grad);
            ensure_finite(value, iterations)?;
        };

        let gradient_norm = max_abs(&grad);
        debug!(
            "Gradient descent stopped after {iterations} iterations ({termination:?}), objective {value:.6}, max |grad| {gradient_norm:.3e}"
        );

        Ok(OptimizationResult {
            params: x,
            iterations,
            objective_value: value,
            gradient_norm,
            termination,
        })
    }
}
