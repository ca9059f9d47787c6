//! Limited-memory BFGS solver
//!
//! Keeps the last `history_size` step/gradient-change pairs, builds a
//! quasi-Newton direction with the two-loop recursion and accepts steps
//! through a backtracking line search on the Armijo condition.

use crate::core::{LogitError, OptimizationResult, OptimizerConfig, Result, Termination};
use crate::objective::Objective;
use crate::solver::{dot, ensure_finite, max_abs};
use log::debug;
use std::collections::VecDeque;

/// Sufficient-decrease constant for the Armijo condition
const ARMIJO: f64 = 1e-4;

const MAX_BACKTRACKS: usize = 50;

/// Relative objective reduction below which the solver stops
const FUNCTION_TOLERANCE: f64 = f64::EPSILON * 1e7;

/// Pairs with `s'y` at or below this are skipped to keep the inverse Hessian positive definite
const CURVATURE_EPSILON: f64 = 1e-10;

struct CorrectionPair {
    s: Vec<f64>,
    y: Vec<f64>,
    rho: f64,
}

/// Scratch buffers reused across iterations
struct Workspace {
    direction: Vec<f64>,
    x_next: Vec<f64>,
    grad_next: Vec<f64>,
}

impl Workspace {
    fn new(n: usize) -> Self {
        Self {
            direction: vec![0.0; n],
            x_next: vec![0.0; n],
            grad_next: vec![0.0; n],
        }
    }
}

/// L-BFGS minimizer
pub struct LbfgsSolver {
    config: OptimizerConfig,
}

impl LbfgsSolver {
    /// Create a new L-BFGS solver with the given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Minimize `objective` starting from `initial`
    ///
    /// Stops when the largest gradient component drops below the tolerance,
    /// when the relative objective decrease becomes negligible, when no step
    /// decreases the objective, or at the iteration cap. Only a non-finite
    /// objective at the starting point is an error; the line search rejects
    /// non-finite trial points.
    pub fn solve<O: Objective>(&self, objective: &O, initial: Vec<f64>) -> Result<OptimizationResult> {
        self.config.validate()?;

        let n = objective.n_params();
        if initial.len() != n {
            return Err(LogitError::DimensionMismatch {
                expected: n,
                actual: initial.len(),
            });
        }

        let mut x = initial;
        let mut grad = vec![0.0; n];
        let mut value = objective.evaluate(&x, &mut grad);
        ensure_finite(value, 0)?;

        let mut history: VecDeque<CorrectionPair> =
            VecDeque::with_capacity(self.config.history_size);
        let mut work = Workspace::new(n);
        let mut iterations = 0;
        let mut termination = Termination::MaxIterations;

        while iterations < self.config.max_iterations {
            if max_abs(&grad) <= self.config.tolerance {
                termination = Termination::GradientTolerance;
                break;
            }

            two_loop(&grad, &history, &mut work.direction);
            let mut slope = dot(&grad, &work.direction);
            if slope >= 0.0 {
                debug!("L-BFGS direction is not a descent direction at iteration {iterations}, resetting");
                history.clear();
                two_loop(&grad, &history, &mut work.direction);
                slope = dot(&grad, &work.direction);
            }

            // Without curvature information the direction is the raw gradient; keep the first step short
            let initial_step = if history.is_empty() {
                (1.0 / dot(&grad, &grad).sqrt()).min(1.0)
            } else {
                1.0
            };

            let Some(next_value) = line_search(objective, &x, value, slope, initial_step, &mut work)
            else {
                if history.is_empty() {
                    termination = Termination::LineSearchStalled;
                    break;
                }
                debug!("L-BFGS line search failed at iteration {iterations}, retrying along the gradient");
                history.clear();
                continue;
            };
            iterations += 1;

            let s: Vec<f64> = work.x_next.iter().zip(&x).map(|(a, b)| a - b).collect();
            let y: Vec<f64> = work.grad_next.iter().zip(&grad).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            if sy > CURVATURE_EPSILON {
                if history.len() == self.config.history_size {
                    history.pop_front();
                }
                history.push_back(CorrectionPair { s, y, rho: 1.0 / sy });
            }

            std::mem::swap(&mut x, &mut work.x_next);
            std::mem::swap(&mut grad, &mut work.grad_next);
            let previous = value;
            value = next_value;

            let scale = previous.abs().max(value.abs()).max(1.0);
            if (previous - value) / scale <= FUNCTION_TOLERANCE {
                termination = Termination::FunctionTolerance;
                break;
            }
        }

        let gradient_norm = max_abs(&grad);
        if termination == Termination::MaxIterations && gradient_norm <= self.config.tolerance {
            termination = Termination::GradientTolerance;
        }

        debug!(
            "L-BFGS stopped after {iterations} iterations ({termination:?}), objective {value:.6}, max |grad| {gradient_norm:.3e}"
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

/// Two-loop recursion: writes `-H g` into `direction`, where `H` is the
/// inverse Hessian approximation built from `history`
fn two_loop(grad: &[f64], history: &VecDeque<CorrectionPair>, direction: &mut [f64]) {
    direction.copy_from_slice(grad);

    let mut alphas = vec![0.0; history.len()];
    for (i, pair) in history.iter().enumerate().rev() {
        let alpha = pair.rho * dot(&pair.s, direction);
        for (q, y) in direction.iter_mut().zip(&pair.y) {
            *q -= alpha * y;
        }
        alphas[i] = alpha;
    }

    if let Some(last) = history.back() {
        let gamma = dot(&last.s, &last.y) / dot(&last.y, &last.y);
        for q in direction.iter_mut() {
            *q *= gamma;
        }
    }

    for (pair, &alpha) in history.iter().zip(&alphas) {
        let beta = pair.rho * dot(&pair.y, direction);
        for (r, s) in direction.iter_mut().zip(&pair.s) {
            *r += (alpha - beta) * s;
        }
    }

    for d in direction.iter_mut() {
        *d = -*d;
    }
}

/// Backtracking search along `work.direction`; on success `work.x_next` and
/// `work.grad_next` hold the accepted point
fn line_search<O: Objective>(
    objective: &O,
    x: &[f64],
    value: f64,
    slope: f64,
    initial_step: f64,
    work: &mut Workspace,
) -> Option<f64> {
    let mut step = initial_step;
    for _ in 0..MAX_BACKTRACKS {
        for ((next, &xi), &di) in work.x_next.iter_mut().zip(x).zip(&work.direction) {
            *next = xi + step * di;
        }
        let candidate = objective.evaluate(&work.x_next, &mut work.grad_next);
        if candidate.is_finite() && candidate <= value + ARMIJO * step * slope {
            return Some(candidate);
        }
        step *= 0.5;
    }
    None
}
