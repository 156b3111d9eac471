mod labeller;
mod threshold_labeller;

pub use labeller::{Labeller, Purchase};
pub use threshold_labeller::ThresholdLabeller;
