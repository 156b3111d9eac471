use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// The two long-lived roles of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum WorkerKind {
    Prediction,
    Labelling,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required collaborator was not configured. Raised before any worker starts.
    #[error("pipeline has no {0} configured")]
    MissingComponent(&'static str),

    #[error("failed to start {worker} worker")]
    Spawn {
        worker: WorkerKind,
        #[source]
        source: std::io::Error,
    },

    #[error("{worker} worker failed")]
    Worker {
        worker: WorkerKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("{worker} worker panicked: {message}")]
    WorkerPanicked { worker: WorkerKind, message: String },
}

impl PipelineError {
    /// The worker that failed, if the failure happened during the run.
    pub fn worker(&self) -> Option<WorkerKind> {
        match self {
            PipelineError::MissingComponent(_) => None,
            PipelineError::Spawn { worker, .. }
            | PipelineError::Worker { worker, .. }
            | PipelineError::WorkerPanicked { worker, .. } => Some(*worker),
        }
    }
}
