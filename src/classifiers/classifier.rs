use crate::classifiers::ModelError;

/// Incrementally trainable classification model.
///
/// Class labels are non-negative integers carried as `f64`. Implementations
/// must return [`ModelError::NotFitted`] from the query methods until the
/// first successful [`partial_fit`](Classifier::partial_fit).
pub trait Classifier: Send {
    /// Updates the model with a batch of feature rows and their labels.
    /// May be called any number of times over a run.
    fn partial_fit(&mut self, features: &[Vec<f64>], labels: &[f64]) -> Result<(), ModelError>;

    /// One non-negative score per class, normalized to sum to 1.
    fn votes(&self, x: &[f64]) -> Result<Vec<f64>, ModelError>;

    fn is_fitted(&self) -> bool;

    /// Class with the highest vote.
    fn predict(&self, x: &[f64]) -> Result<f64, ModelError> {
        let votes = self.votes(x)?;
        argmax(&votes)
            .map(|c| c as f64)
            .ok_or(ModelError::NotFitted)
    }

    /// Vote of the predicted class.
    fn confidence(&self, x: &[f64]) -> Result<f64, ModelError> {
        let votes = self.votes(x)?;
        argmax(&votes)
            .map(|c| votes[c])
            .ok_or(ModelError::NotFitted)
    }
}

/// Index of the largest finite value; ties go to the lowest index.
pub(crate) fn argmax(v: &[f64]) -> Option<usize> {
    let mut best = None;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &x) in v.iter().enumerate() {
        if !x.is_finite() {
            continue;
        }
        if best.is_none() || x > best_value {
            best = Some(i);
            best_value = x;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVotes(Option<Vec<f64>>);

    impl Classifier for FixedVotes {
        fn partial_fit(&mut self, _: &[Vec<f64>], _: &[f64]) -> Result<(), ModelError> {
            Ok(())
        }

        fn votes(&self, _: &[f64]) -> Result<Vec<f64>, ModelError> {
            self.0.clone().ok_or(ModelError::NotFitted)
        }

        fn is_fitted(&self) -> bool {
            self.0.is_some()
        }
    }

    #[test]
    fn argmax_skips_non_finite_and_prefers_first_tie() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f64::NAN, f64::INFINITY]), None);
        assert_eq!(argmax(&[0.2, f64::NAN, 0.5, 0.5]), Some(2));
    }

    #[test]
    fn default_predict_and_confidence_follow_votes() {
        let m = FixedVotes(Some(vec![0.3, 0.7]));
        assert_eq!(m.predict(&[0.0]).unwrap(), 1.0);
        assert_eq!(m.confidence(&[0.0]).unwrap(), 0.7);
    }

    #[test]
    fn unfitted_model_reports_not_fitted() {
        let m = FixedVotes(None);
        assert_eq!(m.predict(&[0.0]), Err(ModelError::NotFitted));
        assert_eq!(m.confidence(&[0.0]), Err(ModelError::NotFitted));
    }
}
