use crate::classifiers::bayes::GaussianEstimator;

/// Per-class normal estimates of one numeric feature.
#[derive(Debug, Clone, Default)]
pub struct GaussianFeatureObserver {
    per_class: Vec<Option<GaussianEstimator>>,
}

impl GaussianFeatureObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, value: f64, class: usize, weight: f64) {
        if value.is_nan() || !(weight > 0.0) {
            return;
        }
        if class >= self.per_class.len() {
            self.per_class.resize_with(class + 1, || None);
        }
        self.per_class[class]
            .get_or_insert_with(GaussianEstimator::new)
            .add_observation(value, weight);
    }

    /// `None` when the class was never observed for this feature.
    pub fn log_density_given_class(&self, value: f64, class: usize) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        match self.per_class.get(class) {
            Some(Some(est)) => Some(est.log_density(value)),
            _ => None,
        }
    }
}
