mod labellers;
mod predictors;
mod vec_stream;

pub use labellers::{BuyAllLabeller, FailingLabeller, NeverBuyLabeller, ReplayingLabeller};
pub use predictors::{ConstantPredictor, FailingPredictor, PanickingPredictor};
pub use vec_stream::VecStream;
