mod batch_queue;
mod stop_flag;

pub use batch_queue::BatchQueue;
pub use stop_flag::StopFlag;
