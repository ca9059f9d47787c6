//! Utility functions for preparing and inspecting training data

use crate::core::{Dataset, DenseVector, Sample};

/// Feature scaling utilities
pub mod scaling {
    use super::*;

    /// Feature scaling methods
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ScalingMethod {
        /// Min-Max scaling to [min_val, max_val] range
        MinMax { min_val: f64, max_val: f64 },
        /// Standard (Z-score) normalization: (x - mean) / std
        StandardScore,
        /// Unit scaling: x / max(|x|)
        UnitScale,
    }

    impl Default for ScalingMethod {
        fn default() -> Self {
            Self::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            }
        }
    }

    /// Feature scaling statistics for a dataset, one entry per feature
    #[derive(Debug, Clone)]
    pub struct ScalingParams {
        pub method: ScalingMethod,
        pub feature_stats: Vec<FeatureStats>,
    }

    /// Statistics for a single feature
    #[derive(Debug, Clone, PartialEq)]
    pub struct FeatureStats {
        pub min: f64,
        pub max: f64,
        pub mean: f64,
        pub std: f64,
    }

    impl ScalingParams {
        /// Compute scaling parameters from training data
        pub fn fit(samples: &[Sample], method: ScalingMethod) -> Self {
            let dim = samples.first().map(|s| s.features.dim()).unwrap_or(0);
            let n = samples.len();

            let feature_stats = (0..dim)
                .map(|j| {
                    let values = samples.iter().map(|s| s.features.get(j));
                    let min = values.clone().fold(f64::INFINITY, f64::min);
                    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
                    let mean = values.clone().sum::<f64>() / n as f64;

                    // Sample standard deviation
                    let variance = if n > 1 {
                        values.map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
                    } else {
                        0.0
                    };

                    FeatureStats {
                        min,
                        max,
                        mean,
                        std: variance.sqrt(),
                    }
                })
                .collect();

            Self {
                method,
                feature_stats,
            }
        }

        /// Transform a single feature vector using fitted parameters.
        /// Components beyond the fitted dimensionality are kept unchanged.
        pub fn transform(&self, features: &DenseVector) -> DenseVector {
            features
                .as_slice()
                .iter()
                .enumerate()
                .map(|(j, &value)| match self.feature_stats.get(j) {
                    Some(stats) => self.scale_value(value, stats),
                    None => value,
                })
                .collect::<Vec<_>>()
                .into()
        }

        /// Transform a single sample using fitted parameters
        pub fn transform_sample(&self, sample: &Sample) -> Sample {
            Sample::new(self.transform(&sample.features), sample.label)
        }

        /// Transform multiple samples
        pub fn transform_samples(&self, samples: &[Sample]) -> Vec<Sample> {
            samples
                .iter()
                .map(|sample| self.transform_sample(sample))
                .collect()
        }

        /// Scale a single value using the appropriate method
        fn scale_value(&self, value: f64, stats: &FeatureStats) -> f64 {
            match self.method {
                ScalingMethod::MinMax { min_val, max_val } => {
                    if (stats.max - stats.min).abs() < 1e-12 {
                        // Constant feature
                        (min_val + max_val) / 2.0
                    } else {
                        let normalized = (value - stats.min) / (stats.max - stats.min);
                        min_val + normalized * (max_val - min_val)
                    }
                }
                ScalingMethod::StandardScore => {
                    if stats.std < 1e-12 {
                        0.0
                    } else {
                        (value - stats.mean) / stats.std
                    }
                }
                ScalingMethod::UnitScale => {
                    let max_abs = stats.max.abs().max(stats.min.abs());
                    if max_abs < 1e-12 {
                        0.0
                    } else {
                        value / max_abs
                    }
                }
            }
        }
    }

    /// Convenience function: fit and transform in one step
    pub fn fit_transform(
        samples: &[Sample],
        method: ScalingMethod,
    ) -> (Vec<Sample>, ScalingParams) {
        let params = ScalingParams::fit(samples, method);
        let transformed = params.transform_samples(samples);
        (transformed, params)
    }
}

/// Validation and preprocessing utilities
pub mod validation {
    use super::*;

    /// Validate that every label is a class index below `dataset.n_classes()`
    pub fn validate_labels<D: Dataset>(dataset: &D) -> Result<(), String> {
        let n_classes = dataset.n_classes();
        for (i, &label) in dataset.get_labels().iter().enumerate() {
            if label >= n_classes {
                return Err(format!(
                    "Invalid label {label} at index {i}: labels must be below {n_classes}"
                ));
            }
        }
        Ok(())
    }

    /// Check how evenly samples are spread over classes.
    ///
    /// Returns the per-class counts and the ratio of the largest to the
    /// smallest count (infinite when a class has no samples).
    pub fn check_class_balance<D: Dataset>(dataset: &D) -> (Vec<usize>, f64) {
        let counts = stats::class_counts(&dataset.get_labels(), dataset.n_classes());
        let largest = counts.iter().copied().max().unwrap_or(0);
        let smallest = counts.iter().copied().min().unwrap_or(0);
        let ratio = if smallest == 0 {
            f64::INFINITY
        } else {
            largest as f64 / smallest as f64
        };
        (counts, ratio)
    }

    /// Check that every feature value is finite
    pub fn validate_finite_features(samples: &[Sample]) -> Result<(), String> {
        for (i, sample) in samples.iter().enumerate() {
            if let Some(j) = sample.features.as_slice().iter().position(|v| !v.is_finite()) {
                return Err(format!("Non-finite value at sample {i}, feature {j}"));
            }
        }
        Ok(())
    }
}

/// Statistical utilities for datasets
pub mod stats {
    use super::*;

    /// Number of samples carrying each label in `0..n_classes`
    pub fn class_counts(labels: &[usize], n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; n_classes];
        for &label in labels {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
        counts
    }

    /// Mean feature vector of one class, or `None` if the class has no samples
    pub fn class_mean(samples: &[Sample], class: usize) -> Option<DenseVector> {
        let members: Vec<&Sample> = samples.iter().filter(|s| s.label == class).collect();
        let dim = members.first()?.features.dim();

        let mut sums = vec![0.0; dim];
        for sample in &members {
            for (sum, &value) in sums.iter_mut().zip(sample.features.as_slice()) {
                *sum += value;
            }
        }
        let n = members.len() as f64;
        Some(sums.into_iter().map(|s| s / n).collect::<Vec<_>>().into())
    }

    /// Mean feature vector of every class in `0..n_classes`
    pub fn class_means(samples: &[Sample], n_classes: usize) -> Vec<Option<DenseVector>> {
        (0..n_classes).map(|k| class_mean(samples, k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{InMemoryDataset, IrisDataset};

    fn sample(values: &[f64], label: usize) -> Sample {
        Sample::new(DenseVector::new(values.to_vec()), label)
    }

    #[test]
    fn test_validate_labels() {
        let dataset =
            InMemoryDataset::new(vec![sample(&[1.0], 0), sample(&[2.0], 1)], 2).unwrap();
        assert!(validation::validate_labels(&dataset).is_ok());
    }

    #[test]
    fn test_validate_labels_invalid() {
        // Hand-rolled dataset so the bad label is not rejected on construction
        struct MockDataset {
            samples: Vec<Sample>,
        }

        impl Dataset for MockDataset {
            fn len(&self) -> usize {
                self.samples.len()
            }
            fn dim(&self) -> usize {
                1
            }
            fn n_classes(&self) -> usize {
                2
            }
            fn get_sample(&self, i: usize) -> Sample {
                self.samples[i].clone()
            }
            fn get_labels(&self) -> Vec<usize> {
                self.samples.iter().map(|s| s.label).collect()
            }
        }

        let dataset = MockDataset {
            samples: vec![sample(&[1.0], 1), sample(&[2.0], 5)],
        };
        let error_msg = validation::validate_labels(&dataset).unwrap_err();
        assert!(error_msg.contains("Invalid label 5 at index 1"));
    }

    #[test]
    fn test_check_class_balance() {
        let (counts, ratio) = validation::check_class_balance(&IrisDataset::load());
        assert_eq!(counts, vec![50, 50, 50]);
        assert_eq!(ratio, 1.0);

        let skewed = InMemoryDataset::new(
            vec![sample(&[1.0], 0), sample(&[2.0], 0), sample(&[3.0], 1)],
            3,
        )
        .unwrap();
        let (counts, ratio) = validation::check_class_balance(&skewed);
        assert_eq!(counts, vec![2, 1, 0]);
        assert!(ratio.is_infinite());
    }

    #[test]
    fn test_validate_finite_features() {
        assert!(validation::validate_finite_features(&[sample(&[1.0, 2.0], 0)]).is_ok());
        let err = validation::validate_finite_features(&[
            sample(&[1.0, 2.0], 0),
            sample(&[1.0, f64::NAN], 0),
        ])
        .unwrap_err();
        assert!(err.contains("sample 1, feature 1"));
    }

    #[test]
    fn test_class_counts_ignores_out_of_range() {
        assert_eq!(stats::class_counts(&[0, 2, 2, 7], 3), vec![1, 0, 2]);
    }

    #[test]
    fn test_class_means() {
        let samples = vec![
            sample(&[1.0, 10.0], 0),
            sample(&[3.0, 20.0], 0),
            sample(&[5.0, 5.0], 1),
        ];
        let means = stats::class_means(&samples, 3);
        assert_eq!(means[0].as_ref().unwrap().as_slice(), &[2.0, 15.0]);
        assert_eq!(means[1].as_ref().unwrap().as_slice(), &[5.0, 5.0]);
        assert!(means[2].is_none());
    }

    #[test]
    fn test_scaling_minmax() {
        use crate::utils::scaling::{ScalingMethod, ScalingParams};

        let samples = vec![
            sample(&[1.0, 10.0], 0),
            sample(&[3.0, 20.0], 1),
            sample(&[5.0, 30.0], 0),
        ];

        let params = ScalingParams::fit(
            &samples,
            ScalingMethod::MinMax {
                min_val: 0.0,
                max_val: 1.0,
            },
        );
        let transformed = params.transform_samples(&samples);

        // Feature 0: min=1, max=5; feature 1: min=10, max=30
        assert!((transformed[0].features.get(0) - 0.0).abs() < 1e-10);
        assert!((transformed[0].features.get(1) - 0.0).abs() < 1e-10);
        assert!((transformed[1].features.get(0) - 0.5).abs() < 1e-10);
        assert!((transformed[2].features.get(0) - 1.0).abs() < 1e-10);
        assert!((transformed[2].features.get(1) - 1.0).abs() < 1e-10);
        assert_eq!(transformed[1].label, 1);
    }

    #[test]
    fn test_scaling_standard_score() {
        use crate::utils::scaling::{ScalingMethod, ScalingParams};

        let samples = vec![sample(&[1.0], 0), sample(&[3.0], 1), sample(&[5.0], 0)];

        let params = ScalingParams::fit(&samples, ScalingMethod::StandardScore);
        let transformed = params.transform_samples(&samples);

        // Mean should be 3.0, std should be 2.0
        assert!((transformed[0].features.get(0) - (-1.0)).abs() < 1e-10);
        assert!(transformed[1].features.get(0).abs() < 1e-10);
        assert!((transformed[2].features.get(0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_scaling_unit_scale() {
        use crate::utils::scaling::{ScalingMethod, ScalingParams};

        let samples = vec![sample(&[-4.0], 0), sample(&[2.0], 1), sample(&[8.0], 0)];

        let params = ScalingParams::fit(&samples, ScalingMethod::UnitScale);
        let transformed = params.transform_samples(&samples);

        // Max absolute value is 8.0
        assert!((transformed[0].features.get(0) - (-0.5)).abs() < 1e-10);
        assert!((transformed[1].features.get(0) - 0.25).abs() < 1e-10);
        assert!((transformed[2].features.get(0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_scaling_constant_feature() {
        use crate::utils::scaling::{ScalingMethod, ScalingParams};

        let samples = vec![sample(&[5.0], 0), sample(&[5.0], 1), sample(&[5.0], 0)];

        let params = ScalingParams::fit(&samples, ScalingMethod::default());
        for s in params.transform_samples(&samples) {
            // Midpoint of [-1, 1]
            assert!(s.features.get(0).abs() < 1e-10);
        }

        let params_std = ScalingParams::fit(&samples, ScalingMethod::StandardScore);
        for s in params_std.transform_samples(&samples) {
            assert_eq!(s.features.get(0), 0.0);
        }
    }

    #[test]
    fn test_transform_unseen_query() {
        use crate::utils::scaling::{fit_transform, ScalingMethod};

        let samples = vec![sample(&[1.0, 2.0], 0), sample(&[5.0, 4.0], 1)];
        let (transformed, params) = fit_transform(&samples, ScalingMethod::StandardScore);

        assert_eq!(transformed.len(), 2);
        assert_eq!(params.feature_stats.len(), 2);

        // Extra trailing components pass through untouched
        let query = params.transform(&DenseVector::from([3.0, 3.0, 9.0]));
        assert!(query.get(0).abs() < 1e-10);
        assert!(query.get(1).abs() < 1e-10);
        assert_eq!(query.get(2), 9.0);
    }
}
