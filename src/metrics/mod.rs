//! Evaluation metrics for the binary safety classifier.

use crate::error::{Result, WireError};
use serde::{Deserialize, Serialize};

fn check_lengths(y_pred: &[usize], y_true: &[usize]) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(WireError::dimension_mismatch(
            "predictions",
            y_true.len(),
            y_pred.len(),
        ));
    }
    if y_true.is_empty() {
        return Err(WireError::empty_dataset("accuracy needs at least one label"));
    }
    Ok(())
}

/// Fraction of predictions equal to the true labels.
///
/// # Errors
///
/// Returns `DimensionMismatch` when the slices differ in length and
/// `EmptyDataset` when they are empty; a mismatch is never reported as a
/// zero accuracy.
///
/// # Examples
///
/// ```
/// use wirelab::metrics::accuracy;
///
/// let acc = accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]).expect("same length");
/// assert!((acc - 0.75).abs() < 1e-12);
/// ```
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> Result<f64> {
    check_lengths(y_pred, y_true)?;
    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Binary confusion counts with class 1 (Dangerous) as positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Predicted 1, actual 1
    pub true_positive: usize,
    /// Predicted 1, actual 0
    pub false_positive: usize,
    /// Predicted 0, actual 0
    pub true_negative: usize,
    /// Predicted 0, actual 1
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// Tallies predictions against labels.
    ///
    /// # Errors
    ///
    /// Same as [`accuracy`].
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        check_lengths(y_pred, y_true)?;
        let mut cm = Self::default();
        for (&p, &t) in y_pred.iter().zip(y_true) {
            match (p != 0, t != 0) {
                (true, true) => cm.true_positive += 1,
                (true, false) => cm.false_positive += 1,
                (false, false) => cm.true_negative += 1,
                (false, true) => cm.false_negative += 1,
            }
        }
        Ok(cm)
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// `(tp + tn) / total`.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        (self.true_positive + self.true_negative) as f64 / self.total().max(1) as f64
    }

    /// `tp / (tp + fp)`, 0 when nothing was predicted positive.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// `tp / (tp + fn)`, 0 when there are no positives.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
