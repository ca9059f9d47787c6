//! Objective trait definition

/// Differentiable objective over a flat parameter vector
///
/// Solvers only see this interface, so any smooth loss can be plugged in.
pub trait Objective: Send + Sync {
    /// Length of the parameter vector
    fn n_params(&self) -> usize;

    /// Compute the objective value at `params`, writing the gradient into `grad`
    fn evaluate(&self, params: &[f64], grad: &mut [f64]) -> f64;

    /// Compute only the objective value
    fn value(&self, params: &[f64]) -> f64 {
        let mut grad = vec![0.0; self.n_params()];
        self.evaluate(params, &mut grad)
    }
}
