use std::f64::consts::PI;

/// Variance floor so a feature seen with a single value still has a density.
const MIN_VARIANCE: f64 = 1e-9;

/// Weighted running mean and variance (West's variant of Welford).
#[derive(Debug, Clone, Default)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.weight_sum
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.weight_sum > 1.0 {
            self.variance_sum / (self.weight_sum - 1.0)
        } else {
            0.0
        }
    }

    /// Log of the normal density at `value`, with the variance floored.
    pub fn log_density(&self, value: f64) -> f64 {
        let var = self.variance().max(MIN_VARIANCE);
        let diff = value - self.mean;
        -0.5 * (2.0 * PI * var).ln() - diff * diff / (2.0 * var)
    }
}
