use crate::core::QueuePoint;
use crate::labellers::{Labeller, Purchase};
use crate::tasks::PipelineState;
use anyhow::{Result, bail};

/// Buys every queued label as soon as anything is queued.
#[derive(Default)]
pub struct BuyAllLabeller;

impl Labeller for BuyAllLabeller {
    fn should_buy(&mut self, state: &PipelineState) -> Result<bool> {
        Ok(!state.labelling_queue().is_empty())
    }

    fn buy(&mut self, state: &PipelineState) -> Result<Purchase> {
        Ok(Purchase::new(state.labelling_queue().drain_all(), Vec::new()))
    }
}

/// Never buys; counts how often it was asked.
#[derive(Default)]
pub struct NeverBuyLabeller {
    polls: usize,
}

impl NeverBuyLabeller {
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl Labeller for NeverBuyLabeller {
    fn should_buy(&mut self, _: &PipelineState) -> Result<bool> {
        self.polls += 1;
        Ok(false)
    }

    fn buy(&mut self, _: &PipelineState) -> Result<Purchase> {
        bail!("never asked to buy")
    }
}

/// Fails the first time it is asked to buy.
#[derive(Default)]
pub struct FailingLabeller;

impl Labeller for FailingLabeller {
    fn should_buy(&mut self, state: &PipelineState) -> Result<bool> {
        Ok(!state.labelling_queue().is_empty())
    }

    fn buy(&mut self, _: &PipelineState) -> Result<Purchase> {
        bail!("scripted failure")
    }
}

/// Buys everything it drains, then slips the first point it ever bought back
/// into every later purchase.
#[derive(Default)]
pub struct ReplayingLabeller {
    first: Option<QueuePoint>,
}

impl Labeller for ReplayingLabeller {
    fn should_buy(&mut self, state: &PipelineState) -> Result<bool> {
        Ok(self.first.is_some() || !state.labelling_queue().is_empty())
    }

    fn buy(&mut self, state: &PipelineState) -> Result<Purchase> {
        let mut labelled = state.labelling_queue().drain_all();
        match &self.first {
            Some(first) => labelled.push(first.clone()),
            None => self.first = labelled.first().cloned(),
        }
        Ok(Purchase::new(labelled, Vec::new()))
    }
}
