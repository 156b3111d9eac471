use crate::classifiers::Classifier;
use crate::core::{BatchQueue, QueuePoint, StopFlag};
use crate::tasks::WorkerKind;
use std::sync::OnceLock;

/// Live state shared by both workers of a run.
///
/// Policies receive it to reach the two queues and to observe the stop
/// signal. Only the pipeline itself can raise the signal.
#[derive(Debug, Default)]
pub struct PipelineState {
    labelling_queue: BatchQueue<QueuePoint>,
    training_queue: BatchQueue<QueuePoint>,
    stop_flag: StopFlag,
    first_failure: OnceLock<WorkerKind>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicted points waiting for a labelling decision.
    #[inline]
    pub fn labelling_queue(&self) -> &BatchQueue<QueuePoint> {
        &self.labelling_queue
    }

    /// Purchased points waiting to be trained on.
    #[inline]
    pub fn training_queue(&self) -> &BatchQueue<QueuePoint> {
        &self.training_queue
    }

    /// `true` once the input stream is exhausted.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.is_set()
    }

    pub(crate) fn signal_stop(&self) -> bool {
        self.stop_flag.set()
    }

    /// Records a worker failure. Only the first one sticks.
    pub(crate) fn record_failure(&self, worker: WorkerKind) {
        let _ = self.first_failure.set(worker);
    }

    pub(crate) fn first_failure(&self) -> Option<WorkerKind> {
        self.first_failure.get().copied()
    }

    /// `true` once either worker has failed.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.first_failure.get().is_some()
    }
}

/// What a [`Predictor`](crate::predictors::Predictor) sees: the shared state
/// plus the model, which only the prediction worker may touch.
///
/// Read access to the model goes through [`model`](Self::model); mutation
/// needs a `&mut` context, which the worker only hands to `train`.
pub struct PredictionContext<'a> {
    state: &'a PipelineState,
    model: &'a mut dyn Classifier,
}

impl<'a> PredictionContext<'a> {
    pub fn new(state: &'a PipelineState, model: &'a mut dyn Classifier) -> Self {
        Self { state, model }
    }

    #[inline]
    pub fn state(&self) -> &'a PipelineState {
        self.state
    }

    #[inline]
    pub fn model(&self) -> &dyn Classifier {
        &*self.model
    }

    #[inline]
    pub fn model_mut(&mut self) -> &mut dyn Classifier {
        &mut *self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let state = PipelineState::new();
        assert!(state.labelling_queue().is_empty());
        assert!(state.training_queue().is_empty());
        assert!(!state.is_stopped());
        assert!(!state.is_halted());
        assert_eq!(state.first_failure(), None);
    }

    #[test]
    fn stop_signal_is_one_shot() {
        let state = PipelineState::new();
        assert!(state.signal_stop());
        assert!(!state.signal_stop());
        assert!(state.is_stopped());
    }

    #[test]
    fn only_first_failure_is_kept() {
        let state = PipelineState::new();
        state.record_failure(WorkerKind::Labelling);
        state.record_failure(WorkerKind::Prediction);
        assert!(state.is_halted());
        assert_eq!(state.first_failure(), Some(WorkerKind::Labelling));
    }
}
