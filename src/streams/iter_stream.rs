use crate::streams::Stream;
use std::io::{Error, ErrorKind};

/// Adapts any iterator of records into a [`Stream`]. Cannot be restarted.
pub struct IterStream<I: Iterator<Item = Vec<f64>>> {
    inner: I,
    lookahead: Option<Vec<f64>>,
}

impl<I: Iterator<Item = Vec<f64>>> IterStream<I> {
    pub fn new<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let mut inner = records.into_iter();
        let lookahead = inner.next();
        Self { inner, lookahead }
    }
}

impl<I> Stream for IterStream<I>
where
    I: Iterator<Item = Vec<f64>> + Send,
{
    fn has_more_records(&self) -> bool {
        self.lookahead.is_some()
    }

    fn next_record(&mut self) -> Option<Vec<f64>> {
        let current = self.lookahead.take()?;
        self.lookahead = self.inner.next();
        Some(current)
    }

    fn restart(&mut self) -> Result<(), Error> {
        Err(Error::new(
            ErrorKind::Unsupported,
            "iterator-backed streams cannot be restarted",
        ))
    }
}
