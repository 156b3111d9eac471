use crate::core::points::Prediction;
use serde::{Deserialize, Serialize};

/// One stream element as it travels through the pipeline.
///
/// `index` is the position of the record in the input stream and is the only
/// reliable ordering once points have been reordered by queueing or buying.
///
/// The true label travels with the point but stays hidden until it has been
/// purchased: [`QueuePoint::label`] returns `None` until [`QueuePoint::buy_label`]
/// has been called. Labelling policies must decide on a purchase without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuePoint {
    pub point: Vec<f64>,
    pub index: usize,
    pub predicted_label: Option<f64>,
    pub prob: Option<f64>,
    true_label: Option<f64>,
    purchased: bool,
}

impl QueuePoint {
    pub fn new(point: Vec<f64>, index: usize, true_label: Option<f64>) -> Self {
        Self {
            point,
            index,
            predicted_label: None,
            prob: None,
            true_label,
            purchased: false,
        }
    }

    /// Splits a raw record `[x0, x1, ..., y]` into features and true label.
    ///
    /// Returns `None` for an empty record.
    pub fn from_record(mut record: Vec<f64>, index: usize) -> Option<Self> {
        let y = record.pop()?;
        Some(Self::new(record, index, Some(y)))
    }

    /// Attaches a prediction. The burn-in sentinel leaves both fields empty.
    pub fn with_prediction(mut self, prediction: Prediction) -> Self {
        if prediction.is_unknown() {
            self.predicted_label = None;
            self.prob = None;
        } else {
            self.predicted_label = Some(prediction.label);
            self.prob = Some(prediction.confidence);
        }
        self
    }

    #[inline]
    pub fn has_prediction(&self) -> bool {
        self.predicted_label.is_some()
    }

    /// Reveals the true label and marks the point as labelled.
    pub fn buy_label(&mut self) -> Option<f64> {
        self.purchased = true;
        self.true_label
    }

    #[inline]
    pub fn is_labelled(&self) -> bool {
        self.purchased
    }

    /// The true label, if it has been purchased.
    #[inline]
    pub fn label(&self) -> Option<f64> {
        if self.purchased { self.true_label } else { None }
    }

    /// The true label regardless of purchase, for scoring a finished run.
    #[inline]
    pub fn hindsight_label(&self) -> Option<f64> {
        self.true_label
    }

    /// `(point, index, predicted_label, prob, true_label)`
    pub fn to_tuple(&self) -> (Vec<f64>, usize, Option<f64>, Option<f64>, Option<f64>) {
        (
            self.point.clone(),
            self.index,
            self.predicted_label,
            self.prob,
            self.true_label,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_record_splits_features_and_label() {
        let qp = QueuePoint::from_record(vec![1.0, 2.0, 3.0, 1.0], 7).unwrap();
        assert_eq!(qp.point, vec![1.0, 2.0, 3.0]);
        assert_eq!(qp.index, 7);
        assert_eq!(qp.hindsight_label(), Some(1.0));
        assert!(qp.predicted_label.is_none());
        assert!(qp.prob.is_none());
    }

    #[test]
    fn from_record_rejects_empty_record() {
        assert!(QueuePoint::from_record(vec![], 0).is_none());
    }

    #[test]
    fn label_only_visible_after_purchase() {
        let mut qp = QueuePoint::from_record(vec![0.5, 1.0], 0).unwrap();
        assert!(!qp.is_labelled());
        assert_eq!(qp.label(), None);

        assert_eq!(qp.buy_label(), Some(1.0));
        assert!(qp.is_labelled());
        assert_eq!(qp.label(), Some(1.0));
    }

    #[test]
    fn unknown_prediction_leaves_fields_empty() {
        let qp = QueuePoint::from_record(vec![0.5, 0.0], 3)
            .unwrap()
            .with_prediction(Prediction::unknown());
        assert!(!qp.has_prediction());
        assert!(qp.prob.is_none());

        let qp = qp.with_prediction(Prediction::new(1.0, 0.9));
        assert_eq!(qp.predicted_label, Some(1.0));
        assert_eq!(qp.prob, Some(0.9));
    }

    #[test]
    fn to_tuple_keeps_field_order() {
        let qp = QueuePoint::from_record(vec![4.0, 5.0, 0.0], 2)
            .unwrap()
            .with_prediction(Prediction::new(1.0, 0.25));
        let (point, index, predicted, prob, truth) = qp.to_tuple();
        assert_eq!(point, vec![4.0, 5.0]);
        assert_eq!(index, 2);
        assert_eq!(predicted, Some(1.0));
        assert_eq!(prob, Some(0.25));
        assert_eq!(truth, Some(0.0));
    }
}
