use serde::{Deserialize, Serialize};

/// Output of a single prediction: a class label and a confidence score.
///
/// Before a model has been fit, predictors return [`Prediction::unknown`]
/// (both fields NaN) instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: f64,
    pub confidence: f64,
}

impl Prediction {
    #[inline]
    pub fn new(label: f64, confidence: f64) -> Self {
        Self { label, confidence }
    }

    /// Sentinel returned while the model is still burning in.
    #[inline]
    pub fn unknown() -> Self {
        Self {
            label: f64::NAN,
            confidence: f64::NAN,
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.label.is_nan()
    }
}
