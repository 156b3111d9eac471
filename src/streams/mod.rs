pub mod generators;
mod iter_stream;
pub mod stream;

pub use iter_stream::IterStream;
pub use stream::Stream;
