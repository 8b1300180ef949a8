//! Core traits for fitted classifiers.

use crate::error::Result;
use crate::metrics::accuracy;
use crate::primitives::Matrix;

/// Binary classifier over intercept-augmented feature rows.
///
/// Fitting is model specific (hyperparameters, monitors, seeding), so only
/// the prediction side is shared.
///
/// # Examples
///
/// ```
/// use wirelab::classification::LogisticRegression;
/// use wirelab::prelude::*;
///
/// let model = LogisticRegression::new();
/// let x = Matrix::from_vec(1, 2, vec![1.0, 0.0]).expect("1x2 matrix");
/// assert!(matches!(model.predict(&x), Err(WireError::NotTrained)));
/// ```
pub trait Classifier {
    /// Predicts a class (0 or 1) for every row.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the column count is wrong.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>>;

    /// Predicts the class of one feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the length is wrong.
    fn predict_single(&self, features: &[f64]) -> Result<usize>;

    /// Fraction of rows whose prediction matches `y`.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors; returns `DimensionMismatch` or
    /// `EmptyDataset` from [`accuracy`].
    fn score(&self, x: &Matrix<f64>, y: &[usize]) -> Result<f64> {
        let predictions = self.predict(x)?;
        accuracy(&predictions, y)
    }
}
