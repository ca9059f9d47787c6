//! Error types for the logistic regression implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogitError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Optimization failed: {0}")]
    OptimizationError(String),

    #[error("Invalid input for {field}: {reason}")]
    InputError { field: String, reason: String },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid label: expected a class index below {n_classes}, got {label}")]
    InvalidLabel { label: usize, n_classes: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LogitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LogitError::InputError {
            field: "sepal length".to_string(),
            reason: "\"abc\" is not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input for sepal length: \"abc\" is not a number"
        );

        let err = LogitError::InvalidLabel {
            label: 3,
            n_classes: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid label: expected a class index below 3, got 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        let err: LogitError = io.into();
        assert!(matches!(err, LogitError::IoError(_)));
    }
}
