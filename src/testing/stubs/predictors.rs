use crate::core::Prediction;
use crate::predictors::Predictor;
use crate::tasks::PredictionContext;
use anyhow::{Result, bail};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Never trains and always predicts the same thing.
pub struct ConstantPredictor {
    prediction: Prediction,
}

impl ConstantPredictor {
    pub fn new(prediction: Prediction) -> Self {
        Self { prediction }
    }
}

impl Predictor for ConstantPredictor {
    fn should_train(&mut self, _: &PredictionContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn train(&mut self, _: &mut PredictionContext<'_>) -> Result<()> {
        Ok(())
    }

    fn predict(&self, _: &PredictionContext<'_>, _: &[f64]) -> Result<Prediction> {
        Ok(self.prediction)
    }
}

/// Fails on the `n`-th prediction (zero-based).
pub struct FailingPredictor {
    fail_at: usize,
    calls: AtomicUsize,
}

impl FailingPredictor {
    pub fn at(fail_at: usize) -> Self {
        Self {
            fail_at,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Predictor for FailingPredictor {
    fn should_train(&mut self, _: &PredictionContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn train(&mut self, _: &mut PredictionContext<'_>) -> Result<()> {
        Ok(())
    }

    fn predict(&self, _: &PredictionContext<'_>, _: &[f64]) -> Result<Prediction> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        if call == self.fail_at {
            bail!("scripted failure");
        }
        Ok(Prediction::new(0.0, 1.0))
    }
}

pub struct PanickingPredictor;

impl Predictor for PanickingPredictor {
    fn should_train(&mut self, _: &PredictionContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn train(&mut self, _: &mut PredictionContext<'_>) -> Result<()> {
        Ok(())
    }

    fn predict(&self, _: &PredictionContext<'_>, _: &[f64]) -> Result<Prediction> {
        panic!("scripted panic");
    }
}
