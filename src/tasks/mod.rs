mod error;
mod pipeline;
mod state;
mod workers;

pub use error::{PipelineError, WorkerKind};
pub use pipeline::{Pipeline, PipelineOutput};
pub use state::{PipelineState, PredictionContext};
