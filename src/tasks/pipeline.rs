use crate::classifiers::Classifier;
use crate::core::QueuePoint;
use crate::labellers::Labeller;
use crate::predictors::Predictor;
use crate::streams::Stream;
use crate::tasks::workers::{labelling_worker, prediction_worker};
use crate::tasks::{PipelineError, PipelineState, WorkerKind};
use std::any::Any;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// Backtests an incrementally trained model under a label-buying policy.
///
/// A run pulls every record from the stream on a prediction worker, which
/// retrains and predicts through the [`Predictor`]. A labelling worker runs in
/// parallel and buys labels through the [`Labeller`]. Purchased points flow
/// back to the prediction worker through the training queue.
///
/// The stream is consumed by [`run`](Pipeline::run); the model stays with the
/// pipeline and can be inspected afterwards.
#[derive(Default)]
pub struct Pipeline {
    stream: Option<Box<dyn Stream>>,
    model: Option<Box<dyn Classifier>>,
    predictor: Option<Box<dyn Predictor>>,
    labeller: Option<Box<dyn Labeller>>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Points whose label was bought, in purchase order.
    pub training_set: Vec<QueuePoint>,
    /// Points the labeller declined to label.
    pub eval_set: Vec<QueuePoint>,
    /// Points never taken from the labelling queue.
    pub unprocessed: Vec<QueuePoint>,
    /// Records read from the stream.
    pub processed: usize,
}

impl PipelineOutput {
    #[inline]
    pub fn labels_bought(&self) -> usize {
        self.training_set.len()
    }

    /// Every point of the run, ordered by stream index.
    pub fn all_points(&self) -> Vec<&QueuePoint> {
        let mut all: Vec<&QueuePoint> = self
            .training_set
            .iter()
            .chain(&self.eval_set)
            .chain(&self.unprocessed)
            .collect();
        all.sort_by_key(|p| p.index);
        all
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        stream: Box<dyn Stream>,
        model: Box<dyn Classifier>,
        predictor: Box<dyn Predictor>,
        labeller: Box<dyn Labeller>,
    ) -> Self {
        Self {
            stream: Some(stream),
            model: Some(model),
            predictor: Some(predictor),
            labeller: Some(labeller),
        }
    }

    pub fn with_stream(mut self, stream: Box<dyn Stream>) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_model(mut self, model: Box<dyn Classifier>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_predictor(mut self, predictor: Box<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_labeller(mut self, labeller: Box<dyn Labeller>) -> Self {
        self.labeller = Some(labeller);
        self
    }

    pub fn model(&self) -> Option<&dyn Classifier> {
        self.model.as_deref()
    }

    /// Runs both workers to completion.
    ///
    /// Fails before starting anything if a collaborator is missing. A worker
    /// error or panic fails the whole run; when both workers fail, the one
    /// that failed first is reported.
    pub fn run(&mut self) -> Result<PipelineOutput, PipelineError> {
        let (stream, model, predictor, labeller) = match (
            self.stream.as_deref_mut(),
            self.model.as_deref_mut(),
            self.predictor.as_deref_mut(),
            self.labeller.as_deref_mut(),
        ) {
            (None, ..) => return Err(PipelineError::MissingComponent("stream")),
            (_, None, ..) => return Err(PipelineError::MissingComponent("model")),
            (_, _, None, _) => return Err(PipelineError::MissingComponent("predictor")),
            (_, _, _, None) => return Err(PipelineError::MissingComponent("labeller")),
            (Some(s), Some(m), Some(p), Some(l)) => (s, m, p, l),
        };

        let state = PipelineState::new();
        let started = Instant::now();
        info!("pipeline run started");

        let joined = thread::scope(|s| -> Result<_, PipelineError> {
            let labelling = thread::Builder::new()
                .name("olac-labelling".into())
                .spawn_scoped(s, || {
                    let result = labelling_worker(&state, labeller);
                    if result.is_err() {
                        state.record_failure(WorkerKind::Labelling);
                    }
                    result
                })
                .map_err(|source| PipelineError::Spawn {
                    worker: WorkerKind::Labelling,
                    source,
                })?;

            let prediction = thread::Builder::new()
                .name("olac-prediction".into())
                .spawn_scoped(s, || {
                    let result = prediction_worker(&state, stream, model, predictor);
                    if result.is_err() {
                        state.record_failure(WorkerKind::Prediction);
                    }
                    result
                });
            let prediction = match prediction {
                Ok(handle) => join(handle, WorkerKind::Prediction),
                Err(source) => {
                    // lets the labelling worker leave its loop
                    state.record_failure(WorkerKind::Prediction);
                    Err(PipelineError::Spawn {
                        worker: WorkerKind::Prediction,
                        source,
                    })
                }
            };
            Ok((prediction, join(labelling, WorkerKind::Labelling)))
        });
        // the stream is spent whether or not the run succeeded
        self.stream = None;

        let outcome = joined.and_then(|(prediction, labelling)| match (prediction, labelling) {
            (Ok(processed), Ok((training_set, eval_set))) => Ok(PipelineOutput {
                training_set,
                eval_set,
                unprocessed: state.labelling_queue().drain_all(),
                processed,
            }),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(p), Err(l)) => match state.first_failure() {
                Some(WorkerKind::Labelling) => Err(l),
                _ => Err(p),
            },
        });

        match &outcome {
            Ok(out) => info!(
                processed = out.processed,
                labelled = out.training_set.len(),
                unlabelled = out.eval_set.len(),
                unprocessed = out.unprocessed.len(),
                untrained = state.training_queue().len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "pipeline run finished"
            ),
            Err(e) => warn!(error = %e, "pipeline run failed"),
        }
        outcome
    }
}

fn join<T>(
    handle: thread::ScopedJoinHandle<'_, anyhow::Result<T>>,
    worker: WorkerKind,
) -> Result<T, PipelineError> {
    match handle.join() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(PipelineError::Worker { worker, source }),
        Err(payload) => Err(PipelineError::WorkerPanicked {
            worker,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::GaussianNaiveBayes;
    use crate::core::Prediction;
    use crate::labellers::ThresholdLabeller;
    use crate::predictors::OnlinePredictor;
    use crate::streams::generators::{SeaFunction, SeaGenerator};
    use crate::testing::{
        BuyAllLabeller, ConstantPredictor, FailingLabeller, FailingPredictor, NeverBuyLabeller,
        PanickingPredictor, ReplayingLabeller, VecStream,
    };
    use proptest::prelude::*;
    use std::collections::HashSet;

    const LABELS: [f64; 5] = [0.0, 1.0, 0.0, 1.0, 1.0];

    fn constant_pipeline(labeller: Box<dyn Labeller>) -> Pipeline {
        Pipeline::from_parts(
            Box::new(VecStream::from_labels(LABELS.to_vec())),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(ConstantPredictor::new(Prediction::new(0.0, 0.5))),
            labeller,
        )
    }

    fn indices(points: &[QueuePoint]) -> HashSet<usize> {
        points.iter().map(|p| p.index).collect()
    }

    fn assert_partition(out: &PipelineOutput, n: usize) {
        let all = out.all_points();
        assert_eq!(all.len(), n);
        let idx: Vec<usize> = all.iter().map(|p| p.index).collect();
        assert_eq!(idx, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn buying_everything_labels_every_point() {
        let mut pipeline = constant_pipeline(Box::new(BuyAllLabeller::default()));
        let out = pipeline.run().unwrap();

        assert_eq!(out.processed, 5);
        assert_eq!(out.training_set.len(), 5);
        assert!(out.eval_set.is_empty());
        assert!(out.unprocessed.is_empty());
        assert_eq!(indices(&out.training_set), (0..5).collect());
        assert!(out.training_set.iter().all(QueuePoint::is_labelled));
        for p in &out.training_set {
            assert_eq!(p.label(), Some(LABELS[p.index]));
            assert_eq!(p.predicted_label, Some(0.0));
            assert_eq!(p.prob, Some(0.5));
        }
    }

    #[test]
    fn never_buying_still_terminates() {
        let mut pipeline = constant_pipeline(Box::new(NeverBuyLabeller::default()));
        let out = pipeline.run().unwrap();

        assert!(out.training_set.is_empty());
        assert!(out.eval_set.is_empty());
        assert_eq!(out.unprocessed.len(), 5);
        assert_partition(&out, 5);
    }

    #[test]
    fn burn_in_predictions_are_unknown_not_errors() {
        let mut pipeline = Pipeline::from_parts(
            Box::new(VecStream::from_labels(LABELS.to_vec())),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(OnlinePredictor::new()),
            Box::new(NeverBuyLabeller::default()),
        );
        let out = pipeline.run().unwrap();

        assert_eq!(out.unprocessed.len(), 5);
        assert!(out.unprocessed.iter().all(|p| !p.has_prediction()));
        assert!(!pipeline.model().unwrap().is_fitted());
    }

    #[test]
    fn missing_components_fail_before_running() {
        let err = Pipeline::new().run().unwrap_err();
        assert!(matches!(err, PipelineError::MissingComponent("stream")));
        assert_eq!(err.worker(), None);

        let mut p = Pipeline::new().with_stream(Box::new(VecStream::from_labels(vec![0.0])));
        assert!(matches!(
            p.run().unwrap_err(),
            PipelineError::MissingComponent("model")
        ));

        let mut p = p.with_model(Box::new(GaussianNaiveBayes::new()));
        assert!(matches!(
            p.run().unwrap_err(),
            PipelineError::MissingComponent("predictor")
        ));

        let mut p = p.with_predictor(Box::new(OnlinePredictor::new()));
        assert!(matches!(
            p.run().unwrap_err(),
            PipelineError::MissingComponent("labeller")
        ));

        let mut p = p.with_labeller(Box::new(BuyAllLabeller::default()));
        assert_eq!(p.run().unwrap().processed, 1);
    }

    #[test]
    fn stream_is_consumed_by_a_run() {
        let mut pipeline = constant_pipeline(Box::new(BuyAllLabeller::default()));
        pipeline.run().unwrap();
        assert!(matches!(
            pipeline.run().unwrap_err(),
            PipelineError::MissingComponent("stream")
        ));
    }

    #[test]
    fn predictor_error_fails_the_run() {
        let mut pipeline = Pipeline::from_parts(
            Box::new(VecStream::from_labels(vec![0.0; 50])),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(FailingPredictor::at(10)),
            Box::new(BuyAllLabeller::default()),
        );
        let err = pipeline.run().unwrap_err();
        assert_eq!(err.worker(), Some(WorkerKind::Prediction));
        assert!(matches!(err, PipelineError::Worker { .. }));
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.contains("record 10"), "{chain}");
        assert!(matches!(
            pipeline.run().unwrap_err(),
            PipelineError::MissingComponent("stream")
        ));
    }

    #[test]
    fn labeller_error_fails_the_run() {
        let mut pipeline = Pipeline::from_parts(
            Box::new(VecStream::from_labels(vec![1.0; 1_000])),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(ConstantPredictor::new(Prediction::new(1.0, 1.0))),
            Box::new(FailingLabeller::default()),
        );
        let err = pipeline.run().unwrap_err();
        assert_eq!(err.worker(), Some(WorkerKind::Labelling));
        assert!(err.to_string().contains("labelling"));
    }

    #[test]
    fn panicking_predictor_is_reported() {
        let mut pipeline = Pipeline::from_parts(
            Box::new(VecStream::from_labels(vec![0.0; 5])),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(PanickingPredictor),
            Box::new(NeverBuyLabeller::default()),
        );
        let err = pipeline.run().unwrap_err();
        match &err {
            PipelineError::WorkerPanicked { worker, message } => {
                assert_eq!(*worker, WorkerKind::Prediction);
                assert_eq!(message, "scripted panic");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("scripted panic"));
    }

    #[test]
    fn panic_messages_are_extracted_from_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("index 7 out of range"));
        assert_eq!(panic_message(owned.as_ref()), "index 7 out of range");
        let borrowed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(borrowed.as_ref()), "boom");
        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn duplicated_purchase_is_rejected() {
        struct Duplicating;
        impl Labeller for Duplicating {
            fn should_buy(&mut self, state: &PipelineState) -> anyhow::Result<bool> {
                Ok(!state.labelling_queue().is_empty())
            }
            fn buy(&mut self, state: &PipelineState) -> anyhow::Result<crate::labellers::Purchase> {
                let points = state.labelling_queue().drain_all();
                Ok(crate::labellers::Purchase::new(points.clone(), points))
            }
        }

        let mut pipeline = constant_pipeline(Box::new(Duplicating));
        let err = pipeline.run().unwrap_err();
        assert_eq!(err.worker(), Some(WorkerKind::Labelling));
    }

    /// Paces a stream so the labelling worker gets to buy mid-run.
    struct Throttled<S>(S);

    impl<S: Stream> Stream for Throttled<S> {
        fn has_more_records(&self) -> bool {
            self.0.has_more_records()
        }

        fn next_record(&mut self) -> Option<Vec<f64>> {
            std::thread::sleep(std::time::Duration::from_micros(100));
            self.0.next_record()
        }

        fn restart(&mut self) -> Result<(), std::io::Error> {
            self.0.restart()
        }
    }

    #[test]
    fn online_learning_on_sea_concepts() {
        let n = 2_000;
        let sea = SeaGenerator::new(SeaFunction::F1, 0, Some(n), 7).unwrap();
        let mut pipeline = Pipeline::from_parts(
            Box::new(Throttled(sea)),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(OnlinePredictor::new()),
            Box::new(ThresholdLabeller::new(10, 0.5, 11).unwrap()),
        );
        let out = pipeline.run().unwrap();

        assert_eq!(out.processed, n);
        assert_partition(&out, n);
        assert!(out.labels_bought() > 0);
        assert!(pipeline.model().unwrap().is_fitted());

        // once trained, most eval points carry a prediction
        let predicted = out.eval_set.iter().filter(|p| p.has_prediction()).count();
        assert!(predicted > out.eval_set.len() / 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn no_point_is_lost_or_duplicated(
            labels in proptest::collection::vec(0u8..2, 0..300),
            threshold in 0usize..20,
            prob in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let n = labels.len();
            let mut pipeline = Pipeline::from_parts(
                Box::new(VecStream::from_labels(labels.iter().map(|&l| l as f64).collect())),
                Box::new(GaussianNaiveBayes::new()),
                Box::new(OnlinePredictor::new()),
                Box::new(ThresholdLabeller::new(threshold, prob, seed).unwrap()),
            );
            let out = pipeline.run().unwrap();

            prop_assert_eq!(out.processed, n);
            let idx: Vec<usize> = out.all_points().iter().map(|p| p.index).collect();
            prop_assert_eq!(idx, (0..n).collect::<Vec<_>>());
            prop_assert!(out.training_set.iter().all(QueuePoint::is_labelled));
            prop_assert!(out.eval_set.iter().all(|p| !p.is_labelled()));
            // points below the threshold at the end may stay queued
            prop_assert!(out.unprocessed.len() <= threshold);
        }
    }

    #[test]
    fn point_replayed_across_purchases_fails_the_run() {
        let mut pipeline = Pipeline::from_parts(
            Box::new(Throttled(VecStream::from_labels(vec![1.0; 200]))),
            Box::new(GaussianNaiveBayes::new()),
            Box::new(ConstantPredictor::new(Prediction::new(1.0, 1.0))),
            Box::new(ReplayingLabeller::default()),
        );
        let err = pipeline.run().unwrap_err();
        assert_eq!(err.worker(), Some(WorkerKind::Labelling));
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.contains("more than once"), "{chain}");
    }
}
