use crate::classifiers::{Classifier, GaussianNaiveBayes};
use crate::config::{
    BuildError, LabellerChoice, ModelChoice, PipelineChoice, PredictorChoice, SeaParameters,
    StreamChoice, ThresholdParameters,
};
use crate::labellers::{Labeller, ThresholdLabeller};
use crate::predictors::{OnlinePredictor, Predictor};
use crate::streams::Stream;
use crate::streams::generators::{SeaFunction, SeaGenerator};
use crate::tasks::Pipeline;
use std::convert::TryFrom;
use tracing::debug;

impl TryFrom<SeaParameters> for SeaGenerator {
    type Error = BuildError;

    fn try_from(parameters: SeaParameters) -> Result<Self, Self::Error> {
        let func = SeaFunction::try_from(parameters.function_id)
            .map_err(|_| BuildError::InvalidParameter("function_id must be 1..=4".into()))?;

        if !(0.0..=1.0).contains(&parameters.noise_pct) {
            return Err(BuildError::InvalidParameter(
                "noise_pct must be in 0.0..=1.0".into(),
            ));
        }
        let noise_percentage = (parameters.noise_pct * 100.0).round().clamp(0.0, 100.0) as u32;

        if parameters.max_instances == 0 {
            return Err(BuildError::InvalidParameter(
                "max_instances must be at least 1".into(),
            ));
        }
        let max_instances = usize::try_from(parameters.max_instances)
            .map_err(|_| BuildError::InvalidParameter("max_instances too large for usize".into()))?;

        Ok(
            SeaGenerator::new(func, noise_percentage, Some(max_instances), parameters.seed)?
                .balanced(parameters.balance),
        )
    }
}

impl TryFrom<ThresholdParameters> for ThresholdLabeller {
    type Error = BuildError;

    fn try_from(parameters: ThresholdParameters) -> Result<Self, Self::Error> {
        Ok(
            ThresholdLabeller::new(parameters.threshold, parameters.prob, parameters.seed)?
                .with_budget(parameters.budget),
        )
    }
}

pub fn build_stream(choice: StreamChoice) -> Result<Box<dyn Stream>, BuildError> {
    match choice {
        StreamChoice::SeaGenerator(p) => {
            let s = SeaGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
    }
}

pub fn build_model(choice: ModelChoice) -> Result<Box<dyn Classifier>, BuildError> {
    match choice {
        ModelChoice::GaussianNaiveBayes(_) => Ok(Box::new(GaussianNaiveBayes::new())),
    }
}

pub fn build_predictor(choice: PredictorChoice) -> Result<Box<dyn Predictor>, BuildError> {
    match choice {
        PredictorChoice::Online(_) => Ok(Box::new(OnlinePredictor::new())),
    }
}

pub fn build_labeller(choice: LabellerChoice) -> Result<Box<dyn Labeller>, BuildError> {
    match choice {
        LabellerChoice::Threshold(p) => {
            let l = ThresholdLabeller::try_from(p)?;
            Ok(Box::new(l))
        }
    }
}

/// Builds every part of `choice` and wires them into a ready-to-run pipeline.
pub fn build_pipeline(choice: PipelineChoice) -> Result<Pipeline, BuildError> {
    debug!(?choice, "building pipeline");
    Ok(Pipeline::from_parts(
        build_stream(choice.stream)?,
        build_model(choice.model)?,
        build_predictor(choice.predictor)?,
        build_labeller(choice.labeller)?,
    ))
}
