use std::io::Error;

/// Pull-based source of raw labelled records.
///
/// Each record is an ordered feature vector followed by one numeric true
/// label: `[x0, x1, ..., y]`. A pipeline run consumes a stream exactly once,
/// front to back, from a single thread.
pub trait Stream: Send {
    /// Indicates whether the stream *may* produce more records.
    ///
    /// If it returns `false`, a subsequent call to [`next_record`](Stream::next_record)
    /// must return `None`.
    fn has_more_records(&self) -> bool;

    /// Produces the next record, or `None` once exhausted.
    fn next_record(&mut self) -> Option<Vec<f64>>;

    /// Resets the stream to its initial state.
    ///
    /// Generators re-seed their RNG. Sources that cannot rewind return an
    /// error of kind `Unsupported`.
    fn restart(&mut self) -> Result<(), Error>;
}
