mod backtest_evaluator;
mod performance_evaluator;

pub use backtest_evaluator::BacktestEvaluator;
pub use performance_evaluator::{PerformanceEvaluator, PerformanceEvaluatorExt};
