//! In-memory dataset built from a vector of samples

use crate::core::{Dataset, LogitError, Result, Sample};

/// Owned collection of samples, used for split partitions
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    samples: Vec<Sample>,
    dimensions: usize,
    n_classes: usize,
}

impl InMemoryDataset {
    /// Wrap samples that are labelled with classes `0..n_classes`
    ///
    /// All samples must share one dimensionality and carry a valid label.
    pub fn new(samples: Vec<Sample>, n_classes: usize) -> Result<Self> {
        let dimensions = samples.first().map(|s| s.features.dim()).unwrap_or(0);

        for sample in &samples {
            if sample.features.dim() != dimensions {
                return Err(LogitError::DimensionMismatch {
                    expected: dimensions,
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
            dimensions,
            n_classes,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn get_sample(&self, i: usize) -> Sample {
        self.samples[i].clone()
    }

    fn get_labels(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label).collect()
    }
}
