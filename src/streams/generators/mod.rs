mod sea;

pub use sea::{MAX_BALANCE_DRAWS, SeaFunction, SeaGenerator};
