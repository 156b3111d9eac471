use crate::classifiers::bayes::GaussianFeatureObserver;
use crate::classifiers::{Classifier, ModelError};

/// Labels must be class ids below this bound.
pub const MAX_CLASSES: usize = 1 << 16;

/// Incremental Gaussian naive Bayes.
///
/// Keeps the observed class distribution and one [`GaussianFeatureObserver`]
/// per feature. Votes are class posteriors, computed in log space and
/// normalized. The feature count is fixed by the first fit.
#[derive(Debug, Clone, Default)]
pub struct GaussianNaiveBayes {
    observed_class_distribution: Vec<f64>,
    observers: Vec<GaussianFeatureObserver>,
    num_features: Option<usize>,
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_classes(&self) -> usize {
        self.observed_class_distribution.len()
    }

    pub fn num_features(&self) -> Option<usize> {
        self.num_features
    }

    fn class_of(label: f64) -> Result<usize, ModelError> {
        let in_range = (0.0..MAX_CLASSES as f64).contains(&label);
        if in_range && label.fract() == 0.0 {
            Ok(label as usize)
        } else {
            Err(ModelError::InvalidLabel(label))
        }
    }

    fn check_width(&self, got: usize) -> Result<(), ModelError> {
        match self.num_features {
            Some(expected) if expected != got => {
                Err(ModelError::DimensionMismatch { expected, got })
            }
            _ => Ok(()),
        }
    }
}

impl Classifier for GaussianNaiveBayes {
    fn partial_fit(&mut self, features: &[Vec<f64>], labels: &[f64]) -> Result<(), ModelError> {
        if features.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        let Some(first) = features.first() else {
            return Err(ModelError::EmptyBatch);
        };

        // validate the whole batch before touching any state
        let width = self.num_features.unwrap_or(first.len());
        let mut classes = Vec::with_capacity(labels.len());
        for (row, &label) in features.iter().zip(labels) {
            if row.len() != width {
                return Err(ModelError::DimensionMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
            classes.push(Self::class_of(label)?);
        }

        if self.num_features.is_none() {
            self.num_features = Some(width);
            self.observers = (0..width).map(|_| GaussianFeatureObserver::new()).collect();
        }

        for (row, class) in features.iter().zip(classes) {
            if class >= self.observed_class_distribution.len() {
                let len = class.checked_add(1).ok_or(ModelError::InvalidLabel(class as f64))?;
                self.observed_class_distribution.resize(len, 0.0);
            }
            self.observed_class_distribution[class] += 1.0;
            for (observer, &value) in self.observers.iter_mut().zip(row) {
                observer.observe(value, class, 1.0);
            }
        }
        Ok(())
    }

    fn votes(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        self.check_width(x.len())?;

        let total: f64 = self.observed_class_distribution.iter().sum();
        let log_posteriors: Vec<f64> = self
            .observed_class_distribution
            .iter()
            .enumerate()
            .map(|(class, &weight)| {
                if weight <= 0.0 {
                    return f64::NEG_INFINITY;
                }
                let mut log_p = (weight / total).ln();
                for (observer, &value) in self.observers.iter().zip(x) {
                    if let Some(ld) = observer.log_density_given_class(value, class) {
                        log_p += ld;
                    }
                }
                log_p
            })
            .collect();

        let max = log_posteriors
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let unnormalized: Vec<f64> = log_posteriors
            .iter()
            .map(|&lp| if lp.is_finite() { (lp - max).exp() } else { 0.0 })
            .collect();
        let norm: f64 = unnormalized.iter().sum();

        Ok(unnormalized.into_iter().map(|v| v / norm).collect())
    }

    fn is_fitted(&self) -> bool {
        self.observed_class_distribution.iter().any(|&w| w > 0.0)
    }
}
