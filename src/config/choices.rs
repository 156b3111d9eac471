use crate::config::BuildError;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_sea_function() -> u8 {
    2
}

fn default_max_instances() -> u64 {
    10_000
}

fn default_threshold() -> usize {
    10
}

fn default_prob() -> f64 {
    0.5
}

/// Empty parameter object for parts that take no settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ThresholdParameters {
    #[serde(default = "default_threshold")]
    #[schemars(
        title = "Threshold",
        description = "Buy once more than this many points are queued",
        range(min = 0),
        default = "default_threshold"
    )]
    pub threshold: usize,

    #[serde(default = "default_prob")]
    #[schemars(
        title = "Probability",
        description = "Chance of buying each point's label (0.0-1.0)",
        range(min = 0.0, max = 1.0),
        default = "default_prob"
    )]
    pub prob: f64,

    #[serde(default)]
    #[schemars(
        title = "Budget",
        description = "Maximum number of labels bought over the run"
    )]
    pub budget: Option<usize>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for ThresholdParameters {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            prob: default_prob(),
            budget: None,
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SeaParameters {
    #[serde(default = "default_sea_function")]
    #[schemars(
        title = "Function",
        description = "Classification SEA Function used (1-4)",
        range(min = 1, max = 4),
        default = "default_sea_function"
    )]
    pub function_id: u8,

    #[serde(default)]
    #[schemars(title = "Balance", description = "Balance classes during generation?")]
    pub balance: bool,

    #[serde(default)]
    #[schemars(
        title = "Noise",
        description = "Noise percentage (0.0-1.0)",
        range(min = 0.0, max = 1.0)
    )]
    pub noise_pct: f32,

    #[serde(default = "default_max_instances")]
    #[schemars(
        title = "Instances",
        description = "Number of records in the stream",
        range(min = 1),
        default = "default_max_instances"
    )]
    pub max_instances: u64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for SeaParameters {
    fn default() -> Self {
        Self {
            function_id: default_sea_function(),
            balance: false,
            noise_pct: 0.0,
            max_instances: default_max_instances(),
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ModelKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ModelChoice {
    #[strum_discriminants(strum(
        message = "Gaussian Naive Bayes",
        detailed_message = "Incremental naive Bayes with per-class normal feature estimates."
    ))]
    GaussianNaiveBayes(NoParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(PredictorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum PredictorChoice {
    #[strum_discriminants(strum(
        message = "Online Predictor",
        detailed_message = "Retrains with partial_fit whenever bought labels are waiting."
    ))]
    Online(NoParams),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(LabellerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum LabellerChoice {
    #[strum_discriminants(strum(
        message = "Threshold Labeller",
        detailed_message = "Buys random labels from the queue once it grows past a threshold."
    ))]
    Threshold(ThresholdParameters),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StreamKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StreamChoice {
    #[strum_discriminants(strum(
        message = "SEA Generator",
        detailed_message = "Generates SEA concept functions."
    ))]
    SeaGenerator(SeaParameters),
}

/// A complete pipeline description.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PipelineChoice {
    pub stream: StreamChoice,
    pub model: ModelChoice,
    pub predictor: PredictorChoice,
    pub labeller: LabellerChoice,
}

impl PipelineChoice {
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PipelineChoice {
    fn default() -> Self {
        Self {
            stream: StreamChoice::SeaGenerator(SeaParameters::default()),
            model: ModelChoice::GaussianNaiveBayes(NoParams::default()),
            predictor: PredictorChoice::Online(NoParams::default()),
            labeller: LabellerChoice::Threshold(ThresholdParameters::default()),
        }
    }
}

/// JSON schema of [`PipelineChoice`].
pub fn schema_for_pipeline() -> Schema {
    schema_for!(PipelineChoice)
}
