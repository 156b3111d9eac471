use crate::core::Prediction;
use crate::tasks::PredictionContext;

/// Decides when to retrain the model and turns its output into predictions.
///
/// Driven by the prediction worker, once per stream record and in stream
/// order: [`should_train`](Predictor::should_train), then
/// [`train`](Predictor::train) if it said yes, then
/// [`predict`](Predictor::predict). Any error aborts the run.
pub trait Predictor: Send {
    /// Whether to retrain before the next prediction.
    ///
    /// May inspect the training queue but must not drain it, unless the
    /// drained points are kept for the following `train` call.
    fn should_train(&mut self, ctx: &PredictionContext<'_>) -> anyhow::Result<bool>;

    /// Retrains the model, typically on everything in the training queue.
    fn train(&mut self, ctx: &mut PredictionContext<'_>) -> anyhow::Result<()>;

    /// Predicts the label of `x` with the current model.
    ///
    /// Must return [`Prediction::unknown`] rather than an error while the
    /// model has not been fit yet.
    fn predict(&self, ctx: &PredictionContext<'_>, x: &[f64]) -> anyhow::Result<Prediction>;
}
