use crate::labellers::{Labeller, Purchase};
use crate::tasks::PipelineState;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{Error, ErrorKind};
use tracing::debug;

/// Waits until more than `threshold` points are queued, then takes them all
/// and buys each label with probability `prob`.
///
/// An optional budget caps the total number of labels bought over a run;
/// once it is spent every further point goes unlabelled.
#[derive(Debug)]
pub struct ThresholdLabeller {
    threshold: usize,
    prob: f64,
    budget: Option<usize>,
    labels_bought: usize,
    rng: StdRng,
}

impl ThresholdLabeller {
    pub fn new(threshold: usize, prob: f64, seed: u64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "labelling probability must be in [0.0, 1.0]",
            ));
        }
        Ok(Self {
            threshold,
            prob,
            budget: None,
            labels_bought: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn with_budget(mut self, budget: Option<usize>) -> Self {
        self.budget = budget;
        self
    }

    pub fn labels_bought(&self) -> usize {
        self.labels_bought
    }

    /// `None` when unbounded.
    pub fn remaining_budget(&self) -> Option<usize> {
        self.budget.map(|b| b.saturating_sub(self.labels_bought))
    }

    fn can_afford(&self) -> bool {
        self.remaining_budget() != Some(0)
    }
}

impl Labeller for ThresholdLabeller {
    fn should_buy(&mut self, state: &PipelineState) -> Result<bool> {
        let n = state.labelling_queue().len();
        if n > self.threshold {
            debug!(queued = n, threshold = self.threshold, "labelling threshold met");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn buy(&mut self, state: &PipelineState) -> Result<Purchase> {
        let points = state.labelling_queue().drain_all();
        let mut purchase = Purchase::default();

        for point in points {
            if self.can_afford() && self.rng.random::<f64>() < self.prob {
                self.labels_bought += 1;
                purchase.labelled.push(point);
            } else {
                purchase.unlabelled.push(point);
            }
        }

        debug!(
            labelled = purchase.labelled.len(),
            unlabelled = purchase.unlabelled.len(),
            total_bought = self.labels_bought,
            "labeller partitioned batch"
        );
        Ok(purchase)
    }
}
