//! Core traits for logistic regression

use crate::core::{DenseVector, Prediction, Result, Sample};

/// Dataset abstraction for labelled, dense samples
pub trait Dataset: Send + Sync {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// Number of distinct classes the labels are drawn from
    fn n_classes(&self) -> usize;

    /// Get a single sample by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_sample(&self, i: usize) -> Sample;

    /// Get multiple samples at once
    fn get_batch(&self, indices: &[usize]) -> Vec<Sample> {
        indices.iter().map(|&i| self.get_sample(i)).collect()
    }

    /// Get all labels in sample order
    fn get_labels(&self) -> Vec<usize>;

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained multi-class classifier
pub trait Classifier: Send + Sync {
    /// Predict the class of a single feature vector
    fn predict(&self, features: &DenseVector) -> Result<Prediction>;

    /// Predict several feature vectors
    fn predict_batch(&self, features: &[DenseVector]) -> Result<Vec<Prediction>> {
        features.iter().map(|f| self.predict(f)).collect()
    }

    /// Number of classes the model distinguishes
    fn n_classes(&self) -> usize;

    /// Number of input features the model expects
    fn n_features(&self) -> usize;
}
