/// Online scalar estimator fed one observation at a time.
pub trait Estimator {
    /// Incorporates a new observation. NaN observations are skipped.
    fn add(&mut self, v: f64);

    /// Current estimate, NaN before the first observation.
    fn estimation(&self) -> f64;

    /// Number of observations incorporated.
    fn count(&self) -> u64;
}
