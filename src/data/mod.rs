//! Encoded training data.
//!
//! A [`Dataset`] is the feature matrix and 0/1 label vector built from a set
//! of labeled diagrams. Features are stored without the intercept column;
//! [`Dataset::split`] adds it to each partition.

use rand::Rng;

use crate::error::{Result, WireError};
use crate::format::{DiagramLog, LoadPolicy, LoadReport, Record};
use crate::model_selection::{train_test_split, TrainTestSplit};
use crate::preprocessing::DiagramEncoder;
use crate::primitives::Matrix;

/// Encoded feature rows with their class labels.
///
/// # Examples
///
/// ```
/// use wirelab::data::Dataset;
/// use wirelab::format::parse_record;
/// use wirelab::preprocessing::DiagramEncoder;
///
/// let record = parse_record("Row 1 Red,Column 2 Yellow,Row 3 Blue,Column 4 Green, Dangerous")
///     .expect("valid record");
/// let dataset = Dataset::from_records(&[record], DiagramEncoder::default())
///     .expect("one record");
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.labels(), &[1]);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Matrix<f64>,
    labels: Vec<usize>,
    encoder: DiagramEncoder,
}

impl Dataset {
    /// Encodes records with `encoder`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` when `records` is empty.
    pub fn from_records(records: &[Record], encoder: DiagramEncoder) -> Result<Self> {
        if records.is_empty() {
            return Err(WireError::empty_dataset("no records to encode"));
        }
        let features = encoder.encode_batch(records.iter().map(|r| &r.diagram))?;
        let labels = records.iter().map(|r| r.label.class()).collect();
        Ok(Self {
            features,
            labels,
            encoder,
        })
    }

    /// Reads a diagram log and encodes every record.
    ///
    /// # Errors
    ///
    /// Returns `Io`, `Parse` (under [`LoadPolicy::Abort`]), or `EmptyDataset`
    /// when no record survives loading.
    pub fn load(
        log: &DiagramLog,
        encoder: DiagramEncoder,
        policy: LoadPolicy,
    ) -> Result<(Self, LoadReport)> {
        let (records, report) = log.read(policy)?;
        let dataset = Self::from_records(&records, encoder)?;
        Ok((dataset, report))
    }

    /// Feature matrix, one row per sample, no intercept.
    #[must_use]
    pub fn features(&self) -> &Matrix<f64> {
        &self.features
    }

    /// Class labels (Dangerous = 1).
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Encoder the features were produced with.
    #[must_use]
    pub fn encoder(&self) -> DiagramEncoder {
        self.encoder
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of Dangerous samples.
    #[must_use]
    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }

    /// Random intercept-augmented train/test split.
    ///
    /// # Errors
    ///
    /// See [`train_test_split`].
    pub fn split<R: Rng>(&self, train_fraction: f64, rng: &mut R) -> Result<TrainTestSplit> {
        train_test_split(&self.features, &self.labels, train_fraction, rng)
    }
}
