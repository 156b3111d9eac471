mod gaussian_estimator;
mod gaussian_feature_observer;
mod gaussian_naive_bayes;

pub use gaussian_estimator::GaussianEstimator;
pub use gaussian_feature_observer::GaussianFeatureObserver;
pub use gaussian_naive_bayes::{GaussianNaiveBayes, MAX_CLASSES};
