use crate::core::QueuePoint;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};
use crate::tasks::PipelineOutput;

/// Summary of a backtest run.
///
/// Reports:
/// - `accuracy`: hit rate over every point that received a prediction;
/// - `eval_accuracy`: hit rate over predicted points whose label was never
///   bought, i.e. the score the model earns on data it never trained on;
/// - `labelled_fraction`: share of points whose label was bought;
/// - `burn_in`: points predicted before the model was first fit;
/// - `points`: total points seen.
#[derive(Debug, Default, Clone)]
pub struct BacktestEvaluator<E: Estimator + Default> {
    accuracy: E,
    eval_accuracy: E,
    labelled: E,
    burn_in: u64,
}

impl<E: Estimator + Default> BacktestEvaluator<E> {
    pub fn new() -> Self {
        Self {
            accuracy: E::default(),
            eval_accuracy: E::default(),
            labelled: E::default(),
            burn_in: 0,
        }
    }

    /// Feeds every point of a run, in stream order.
    pub fn add_output(&mut self, output: &PipelineOutput) {
        for point in output.all_points() {
            self.add_result(point);
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BacktestEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, point: &QueuePoint) {
        self.labelled.add(if point.is_labelled() { 1.0 } else { 0.0 });

        let Some(predicted) = point.predicted_label else {
            self.burn_in += 1;
            return;
        };
        let Some(truth) = point.hindsight_label() else {
            return;
        };

        let hit = if predicted == truth { 1.0 } else { 0.0 };
        self.accuracy.add(hit);
        if !point.is_labelled() {
            self.eval_accuracy.add(hit);
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy.estimation()),
            Measurement::new("eval_accuracy", self.eval_accuracy.estimation()),
            Measurement::new("labelled_fraction", self.labelled.estimation()),
            Measurement::new("burn_in", self.burn_in as f64),
            Measurement::new("points", self.labelled.count() as f64),
        ]
    }
}
