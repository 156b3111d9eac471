use crate::core::QueuePoint;
use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Scores the points of a finished pipeline run.
///
/// Evaluators see each point once, after the run, so they may consult the
/// hindsight label of points whose label was never bought.
pub trait PerformanceEvaluator {
    /// Clears accumulated metrics.
    fn reset(&mut self);

    /// Feeds one point of the run.
    fn add_result(&mut self, point: &QueuePoint);

    /// Current metrics.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Returns `(name, Some(value)|None)` for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
