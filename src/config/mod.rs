//! Serializable descriptions of pipeline parts and the builders that turn
//! them into live collaborators.

mod build;
mod choices;
mod error;

pub use build::{build_labeller, build_model, build_pipeline, build_predictor, build_stream};
pub use choices::*;
pub use error::BuildError;
