mod estimators;
mod evaluators;
mod measurement;

pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{BacktestEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
