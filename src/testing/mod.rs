//! Stub collaborators for exercising pipelines in tests.

pub mod stubs;

pub use stubs::*;
