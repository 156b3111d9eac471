use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Predicting before the first successful fit. Expected during burn-in.
    #[error("model has not been fitted yet")]
    NotFitted,

    #[error("expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("batch has {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("invalid class label: {0}")]
    InvalidLabel(f64),

    #[error("cannot fit on an empty batch")]
    EmptyBatch,
}
