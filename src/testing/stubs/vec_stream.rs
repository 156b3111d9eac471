use crate::streams::Stream;
use std::io::Error;

/// Finite stream of one-feature records `[index, label]`.
pub struct VecStream {
    pub labels: Vec<f64>,
    idx: usize,
}

impl VecStream {
    pub fn from_labels(labels: Vec<f64>) -> Self {
        Self { labels, idx: 0 }
    }
}

impl Stream for VecStream {
    fn has_more_records(&self) -> bool {
        self.idx < self.labels.len()
    }

    fn next_record(&mut self) -> Option<Vec<f64>> {
        let y = *self.labels.get(self.idx)?;
        let x = self.idx as f64;
        self.idx += 1;
        Some(vec![x, y])
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
