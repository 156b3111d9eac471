mod online_predictor;
mod predictor;

pub use online_predictor::OnlinePredictor;
pub use predictor::Predictor;
