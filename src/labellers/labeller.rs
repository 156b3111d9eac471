use crate::core::QueuePoint;
use crate::tasks::PipelineState;

/// Result of one buying round.
///
/// Every point the labeller took from the labelling queue must appear in
/// exactly one of the two partitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Purchase {
    pub labelled: Vec<QueuePoint>,
    pub unlabelled: Vec<QueuePoint>,
}

impl Purchase {
    pub fn new(labelled: Vec<QueuePoint>, unlabelled: Vec<QueuePoint>) -> Self {
        Self {
            labelled,
            unlabelled,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labelled.len() + self.unlabelled.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decides which predicted points are worth buying a true label for.
///
/// Labellers are stateful and may track a budget or running statistics. They
/// must not look at a point's true label before buying it; until then
/// [`QueuePoint::label`] returns `None`.
pub trait Labeller: Send {
    /// Polled continuously by the labelling worker. Must not block.
    fn should_buy(&mut self, state: &PipelineState) -> anyhow::Result<bool>;

    /// Takes a batch, usually the whole labelling queue, and partitions it.
    fn buy(&mut self, state: &PipelineState) -> anyhow::Result<Purchase>;
}
