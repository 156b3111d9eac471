mod prediction;
mod queue_point;

pub use prediction::Prediction;
pub use queue_point::QueuePoint;
