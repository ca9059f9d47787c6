//! Multinomial logistic (softmax cross-entropy) objective
//!
//! Parameters are laid out class by class: for each class `k` the
//! `n_features` weights followed by the intercept. The objective is the
//! mean cross-entropy plus `||W||^2 / (2 * C * n)`, which has the same
//! minimizer as `C * sum(loss) + ||W||^2 / 2`. Intercepts are not penalized.

use crate::core::{LogitError, Result, Sample};
use crate::objective::Objective;

/// Number of parameters for a model with the given shape
pub fn n_params(n_features: usize, n_classes: usize) -> usize {
    n_classes * (n_features + 1)
}

/// Numerically stable `ln(sum(exp(scores)))`
pub fn log_sum_exp(scores: &[f64]) -> f64 {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + scores.iter().map(|&s| (s - max).exp()).sum::<f64>().ln()
}

/// Replace scores with their softmax probabilities
///
/// Scores that overflowed to an infinite maximum split the whole mass
/// evenly among the entries equal to that maximum.
pub fn softmax(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        let winners = scores.iter().filter(|&&s| s == max).count() as f64;
        for s in scores.iter_mut() {
            *s = if *s == max { 1.0 / winners } else { 0.0 };
        }
        return;
    }

    let lse = log_sum_exp(scores);
    for s in scores.iter_mut() {
        *s = (*s - lse).exp();
    }
}

/// Linear class scores `W x + b` for one feature vector
pub fn class_scores(params: &[f64], features: &[f64], scores: &mut [f64]) {
    let stride = features.len() + 1;
    for (k, score) in scores.iter_mut().enumerate() {
        let row = &params[k * stride..(k + 1) * stride];
        *score = row[..features.len()]
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + row[features.len()];
    }
}

/// Softmax cross-entropy over a set of labelled samples with an L2 penalty
pub struct SoftmaxCrossEntropy<'a> {
    samples: &'a [Sample],
    n_features: usize,
    n_classes: usize,
    penalty: f64,
}

impl<'a> SoftmaxCrossEntropy<'a> {
    /// Build the objective for `samples`, with `c` the inverse regularization strength
    pub fn new(samples: &'a [Sample], n_features: usize, n_classes: usize, c: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(LogitError::EmptyDataset);
        }
        if c <= 0.0 || !c.is_finite() {
            return Err(LogitError::InvalidParameter(format!(
                "C must be positive and finite, got: {c}"
            )));
        }
        for sample in samples {
            if sample.features.dim() != n_features {
                return Err(LogitError::DimensionMismatch {
                    expected: n_features,
                    actual: sample.features.dim(),
                });
            }
            if sample.label >= n_classes {
                return Err(LogitError::InvalidLabel {
                    label: sample.label,
                    n_classes,
                });
            }
        }

        Ok(Self {
            samples,
            n_features,
            n_classes,
            penalty: 1.0 / (c * samples.len() as f64),
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

impl Objective for SoftmaxCrossEntropy<'_> {
    fn n_params(&self) -> usize {
        n_params(self.n_features, self.n_classes)
    }

    fn evaluate(&self, params: &[f64], grad: &mut [f64]) -> f64 {
        let d = self.n_features;
        let stride = d + 1;
        let mut scores = vec![0.0; self.n_classes];
        let mut loss = 0.0;

        grad.fill(0.0);

        for sample in self.samples {
            let x = sample.features.as_slice();
            class_scores(params, x, &mut scores);
            let lse = log_sum_exp(&scores);
            loss += lse - scores[sample.label];

            for (k, &score) in scores.iter().enumerate() {
                let target = if k == sample.label { 1.0 } else { 0.0 };
                let residual = (score - lse).exp() - target;
                let row = &mut grad[k * stride..(k + 1) * stride];
                for (g, &xj) in row[..d].iter_mut().zip(x) {
                    *g += residual * xj;
                }
                row[d] += residual;
            }
        }

        let inv_n = 1.0 / self.samples.len() as f64;
        loss *= inv_n;
        for g in grad.iter_mut() {
            *g *= inv_n;
        }

        for k in 0..self.n_classes {
            for j in 0..d {
                let idx = k * stride + j;
                let w = params[idx];
                loss += 0.5 * self.penalty * w * w;
                grad[idx] += self.penalty * w;
            }
        }

        loss
    }
}
