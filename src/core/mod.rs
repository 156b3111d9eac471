pub mod points;
pub mod sync;

pub use points::{Prediction, QueuePoint};
pub use sync::{BatchQueue, StopFlag};
