pub mod bayes;
pub mod classifier;
mod error;

pub use bayes::GaussianNaiveBayes;
pub use classifier::Classifier;
pub use error::ModelError;
