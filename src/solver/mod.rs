//! Iterative minimizers for training objectives
//!
//! L-BFGS is the default; plain gradient descent is kept as a simple,
//! easily inspected alternative.

pub mod gradient_descent;
pub mod lbfgs;

pub use self::gradient_descent::*;
pub use self::lbfgs::*;

use crate::core::{LogitError, Result};

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Largest absolute component, the stopping measure for both solvers
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

pub(crate) fn ensure_finite(value: f64, iteration: usize) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LogitError::OptimizationError(format!(
            "objective became non-finite ({value}) at iteration {iteration}"
        )))
    }
}
