use crate::classifiers::ModelError;
use crate::core::Prediction;
use crate::predictors::Predictor;
use crate::tasks::PredictionContext;
use anyhow::{Context, Result, bail};
use tracing::debug;

/// Retrains whenever purchased points are waiting, using `partial_fit` on
/// everything in the training queue. Predicts unknown until the first fit.
#[derive(Debug, Default, Clone)]
pub struct OnlinePredictor {
    rounds: usize,
    points_trained: usize,
}

impl OnlinePredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of training rounds so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn points_trained(&self) -> usize {
        self.points_trained
    }
}

impl Predictor for OnlinePredictor {
    fn should_train(&mut self, ctx: &PredictionContext<'_>) -> Result<bool> {
        Ok(!ctx.state().training_queue().is_empty())
    }

    fn train(&mut self, ctx: &mut PredictionContext<'_>) -> Result<()> {
        let points = ctx.state().training_queue().drain_all();
        if points.is_empty() {
            return Ok(());
        }

        let mut features = Vec::with_capacity(points.len());
        let mut labels = Vec::with_capacity(points.len());
        for p in points {
            let Some(y) = p.label() else {
                bail!("point {} reached training without a bought label", p.index);
            };
            labels.push(y);
            features.push(p.point);
        }

        ctx.model_mut()
            .partial_fit(&features, &labels)
            .context("partial_fit failed")?;

        self.rounds += 1;
        self.points_trained += labels.len();
        debug!(
            round = self.rounds,
            new_points = labels.len(),
            total = self.points_trained,
            "model retrained"
        );
        Ok(())
    }

    fn predict(&self, ctx: &PredictionContext<'_>, x: &[f64]) -> Result<Prediction> {
        let model = ctx.model();
        let scored = model
            .predict(x)
            .and_then(|label| Ok(Prediction::new(label, model.confidence(x)?)));
        match scored {
            Ok(prediction) => Ok(prediction),
            // still burning in
            Err(ModelError::NotFitted) => Ok(Prediction::unknown()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{Classifier, GaussianNaiveBayes};
    use crate::core::QueuePoint;
    use crate::tasks::PipelineState;

    fn bought(x: f64, y: f64, index: usize) -> QueuePoint {
        let mut p = QueuePoint::new(vec![x], index, Some(y));
        p.buy_label();
        p
    }

    #[test]
    fn predicts_unknown_before_any_training() {
        let state = PipelineState::new();
        let mut model = GaussianNaiveBayes::new();
        let ctx = PredictionContext::new(&state, &mut model);

        let predictor = OnlinePredictor::new();
        let prediction = predictor.predict(&ctx, &[1.0]).unwrap();
        assert!(prediction.is_unknown());
    }

    #[test]
    fn trains_only_when_points_are_waiting() {
        let state = PipelineState::new();
        let mut model = GaussianNaiveBayes::new();
        let mut predictor = OnlinePredictor::new();

        {
            let ctx = PredictionContext::new(&state, &mut model);
            assert!(!predictor.should_train(&ctx).unwrap());
        }

        state
            .training_queue()
            .put_all([bought(0.0, 0.0, 0), bought(0.2, 0.0, 1), bought(9.0, 1.0, 2)]);

        let mut ctx = PredictionContext::new(&state, &mut model);
        assert!(predictor.should_train(&ctx).unwrap());
        predictor.train(&mut ctx).unwrap();

        assert!(state.training_queue().is_empty());
        assert_eq!(predictor.rounds(), 1);
        assert_eq!(predictor.points_trained(), 3);

        let p = predictor.predict(&ctx, &[8.5]).unwrap();
        assert_eq!(p.label, 1.0);
        assert!(p.confidence > 0.5);
        assert!(model.is_fitted());
    }

    #[test]
    fn refuses_points_without_bought_label() {
        let state = PipelineState::new();
        let mut model = GaussianNaiveBayes::new();
        let mut predictor = OnlinePredictor::new();
        state
            .training_queue()
            .push(QueuePoint::new(vec![1.0], 4, Some(1.0)));

        let mut ctx = PredictionContext::new(&state, &mut model);
        let err = predictor.train(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("point 4"));
    }

    #[test]
    fn model_errors_other_than_not_fitted_propagate() {
        let state = PipelineState::new();
        let mut model = GaussianNaiveBayes::new();
        model.partial_fit(&[vec![1.0, 2.0]], &[0.0]).unwrap();
        let ctx = PredictionContext::new(&state, &mut model);

        let err = OnlinePredictor::new().predict(&ctx, &[1.0]).unwrap_err();
        assert!(err.downcast_ref::<ModelError>().is_some());
    }
}
