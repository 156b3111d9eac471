pub mod classifiers;
pub mod config;
pub mod core;
pub mod evaluation;
pub mod labellers;
pub mod predictors;
pub mod streams;
pub mod tasks;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
