use crate::classifiers::Classifier;
use crate::core::QueuePoint;
use crate::labellers::{Labeller, Purchase};
use crate::predictors::Predictor;
use crate::streams::Stream;
use crate::tasks::{PipelineState, PredictionContext, WorkerKind};
use anyhow::{Context, Result, bail};
use crossbeam_utils::Backoff;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Marks a worker's exit on the shared state.
///
/// The prediction worker always raises the stop signal on the way out, so the
/// labelling worker can leave its loop even after an error or a panic. A
/// panicking worker also records itself as failed.
struct ExitGuard<'a> {
    state: &'a PipelineState,
    worker: WorkerKind,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.state.record_failure(self.worker);
        }
        if self.worker == WorkerKind::Prediction {
            self.state.signal_stop();
        }
    }
}

/// Feeds every stream record through the predictor onto the labelling queue.
///
/// Returns the number of records processed.
pub(crate) fn prediction_worker(
    state: &PipelineState,
    stream: &mut dyn Stream,
    model: &mut dyn Classifier,
    predictor: &mut dyn Predictor,
) -> Result<usize> {
    let _guard = ExitGuard {
        state,
        worker: WorkerKind::Prediction,
    };

    let mut index = 0usize;
    loop {
        if state.is_halted() {
            warn!(processed = index, "labelling failed, prediction worker halting");
            break;
        }
        let Some(record) = stream.next_record() else {
            break;
        };

        let mut ctx = PredictionContext::new(state, &mut *model);
        if predictor
            .should_train(&ctx)
            .with_context(|| format!("should_train failed before record {index}"))?
        {
            predictor
                .train(&mut ctx)
                .with_context(|| format!("training failed before record {index}"))?;
        }

        let Some(point) = QueuePoint::from_record(record, index) else {
            bail!("record {index} is empty");
        };
        let prediction = predictor
            .predict(&ctx, &point.point)
            .with_context(|| format!("prediction failed for record {index}"))?;

        state.labelling_queue().push(point.with_prediction(prediction));
        index += 1;
    }

    debug!(processed = index, "input stream exhausted");
    Ok(index)
}

/// Polls the labeller until the stop signal, accumulating every purchase.
///
/// After the signal is observed one more round is polled, so points queued
/// just before the signal are still offered to the labeller.
pub(crate) fn labelling_worker(
    state: &PipelineState,
    labeller: &mut dyn Labeller,
) -> Result<(Vec<QueuePoint>, Vec<QueuePoint>)> {
    let _guard = ExitGuard {
        state,
        worker: WorkerKind::Labelling,
    };

    let mut training_set = Vec::new();
    let mut eval_set = Vec::new();
    let mut handed_out = HashSet::new();
    let backoff = Backoff::new();

    loop {
        if state.is_halted() {
            warn!("prediction failed, labelling worker halting");
            break;
        }
        // read before polling: the final round must see everything queued
        // before the signal
        let stopping = state.is_stopped();

        if labeller.should_buy(state).context("should_buy failed")? {
            let Purchase {
                mut labelled,
                unlabelled,
            } = labeller.buy(state).context("buy failed")?;
            record_handed_out(&mut handed_out, &labelled, &unlabelled)?;

            for point in &mut labelled {
                point.buy_label();
            }
            debug!(
                labelled = labelled.len(),
                unlabelled = unlabelled.len(),
                "labels bought"
            );

            state.training_queue().put_all(labelled.iter().cloned());
            training_set.extend(labelled);
            eval_set.extend(unlabelled);
            backoff.reset();
        } else if !stopping {
            backoff.snooze();
        }

        if stopping {
            break;
        }
    }

    Ok((training_set, eval_set))
}

/// Adds a purchase's indices to the run-wide set, failing on any index the
/// labeller already returned in this or an earlier round.
fn record_handed_out(
    seen: &mut HashSet<usize>,
    labelled: &[QueuePoint],
    unlabelled: &[QueuePoint],
) -> Result<()> {
    seen.reserve(labelled.len() + unlabelled.len());
    for point in labelled.iter().chain(unlabelled) {
        if !seen.insert(point.index) {
            bail!("labeller returned point {} more than once", point.index);
        }
    }
    Ok(())
}
