//! Randomized train/test splitting.
//!
//! The random source is always supplied by the caller, so a split is
//! reproducible from the seed of that source alone.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, WireError};
use crate::preprocessing::add_intercept;
use crate::primitives::Matrix;

/// Disjoint train and test partitions, both intercept-augmented.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// Training features with a leading column of ones
    pub x_train: Matrix<f64>,
    /// Training labels
    pub y_train: Vec<usize>,
    /// Test features with a leading column of ones
    pub x_test: Matrix<f64>,
    /// Test labels
    pub y_test: Vec<usize>,
    /// Source row of each training sample
    pub train_indices: Vec<usize>,
    /// Source row of each test sample
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    /// Number of training samples.
    #[must_use]
    pub fn n_train(&self) -> usize {
        self.y_train.len()
    }

    /// Number of test samples.
    #[must_use]
    pub fn n_test(&self) -> usize {
        self.y_test.len()
    }
}

fn shuffle_indices<R: Rng>(n_samples: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);
    indices
}

fn extract_samples(x: &Matrix<f64>, y: &[usize], indices: &[usize]) -> (Matrix<f64>, Vec<usize>) {
    let x_subset = add_intercept(&x.select_rows(indices));
    let y_subset = indices.iter().map(|&i| y[i]).collect();
    (x_subset, y_subset)
}

/// Shuffles row indices and cuts them at `floor(train_fraction · n)`.
///
/// Row `k` of `x_train` is row `train_indices[k]` of `x` with a 1 prepended,
/// and likewise for the test partition.
///
/// # Errors
///
/// Returns `EmptyDataset` for zero rows, `DimensionMismatch` when `y` does
/// not have one label per row, or `InvalidHyperparameter` when
/// `train_fraction` is outside `(0, 1]`.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use wirelab::model_selection::train_test_split;
/// use wirelab::primitives::Matrix;
///
/// let x = Matrix::from_vec(10, 1, (0..10).map(f64::from).collect()).expect("10x1 matrix");
/// let y = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let split = train_test_split(&x, &y, 0.8, &mut rng).expect("valid split");
/// assert_eq!(split.n_train(), 8);
/// assert_eq!(split.n_test(), 2);
/// assert_eq!(split.x_train.n_cols(), 2);
/// ```
pub fn train_test_split<R: Rng>(
    x: &Matrix<f64>,
    y: &[usize],
    train_fraction: f64,
    rng: &mut R,
) -> Result<TrainTestSplit> {
    let n_samples = x.n_rows();
    if n_samples == 0 {
        return Err(WireError::empty_dataset("cannot split zero samples"));
    }
    if n_samples != y.len() {
        return Err(WireError::dimension_mismatch("labels", n_samples, y.len()));
    }
    if !(train_fraction > 0.0 && train_fraction <= 1.0) {
        return Err(WireError::invalid_hyperparameter(
            "train_fraction",
            train_fraction,
            "within (0, 1]",
        ));
    }

    let n_train = ((n_samples as f64 * train_fraction).floor() as usize).min(n_samples);
    let indices = shuffle_indices(n_samples, rng);
    let (train_indices, test_indices) = indices.split_at(n_train);

    let (x_train, y_train) = extract_samples(x, y, train_indices);
    let (x_test, y_test) = extract_samples(x, y, test_indices);

    Ok(TrainTestSplit {
        x_train,
        y_train,
        x_test,
        y_test,
        train_indices: train_indices.to_vec(),
        test_indices: test_indices.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_data(n: usize) -> (Matrix<f64>, Vec<usize>) {
        // feature value == source row, so rows can be traced after shuffling
        let x = Matrix::from_vec(n, 1, (0..n).map(|i| i as f64).collect())
            .expect("n x 1 matrix");
        let y = (0..n).map(|i| i % 2).collect();
        (x, y)
    }

    #[test]
    fn test_split_sizes_follow_floor() {
        for (n, expected) in [(10, 8), (11, 8), (14, 11), (1, 0), (5, 4)] {
            let (x, y) = sample_data(n);
            let mut rng = StdRng::seed_from_u64(0);
            let split = train_test_split(&x, &y, 0.8, &mut rng).expect("valid split");
            assert_eq!(split.n_train(), expected, "n = {n}");
            assert_eq!(split.n_train() + split.n_test(), n);
        }
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let (x, y) = sample_data(37);
        let mut rng = StdRng::seed_from_u64(9);
        let split = train_test_split(&x, &y, 0.8, &mut rng).expect("valid split");

        let mut all: Vec<usize> = split
            .train_indices
            .iter()
            .chain(&split.test_indices)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn test_rows_follow_indices_with_intercept() {
        let (x, y) = sample_data(12);
        let mut rng = StdRng::seed_from_u64(4);
        let split = train_test_split(&x, &y, 0.8, &mut rng).expect("valid split");

        assert_eq!(split.x_train.n_cols(), 2);
        assert_eq!(split.x_test.n_cols(), 2);
        for (k, &src) in split.train_indices.iter().enumerate() {
            assert_eq!(split.x_train.row_slice(k), &[1.0, src as f64]);
            assert_eq!(split.y_train[k], src % 2);
        }
        for (k, &src) in split.test_indices.iter().enumerate() {
            assert_eq!(split.x_test.row_slice(k), &[1.0, src as f64]);
            assert_eq!(split.y_test[k], src % 2);
        }
    }

    #[test]
    fn test_same_seed_same_split() {
        let (x, y) = sample_data(20);
        let a = train_test_split(&x, &y, 0.8, &mut StdRng::seed_from_u64(42)).expect("split a");
        let b = train_test_split(&x, &y, 0.8, &mut StdRng::seed_from_u64(42)).expect("split b");
        assert_eq!(a.train_indices, b.train_indices);
        assert_eq!(a.test_indices, b.test_indices);
    }

    #[test]
    fn test_full_fraction_leaves_empty_test_set() {
        let (x, y) = sample_data(6);
        let mut rng = StdRng::seed_from_u64(1);
        let split = train_test_split(&x, &y, 1.0, &mut rng).expect("valid split");
        assert_eq!(split.n_train(), 6);
        assert_eq!(split.n_test(), 0);
        assert_eq!(split.x_test.shape(), (0, 2));
    }

    #[test]
    fn test_empty_input() {
        let x = Matrix::from_vec(0, 3, Vec::new()).expect("0x3 matrix");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            train_test_split(&x, &[], 0.8, &mut rng),
            Err(WireError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_label_count_mismatch() {
        let (x, _) = sample_data(5);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            train_test_split(&x, &[0, 1], 0.8, &mut rng),
            Err(WireError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_fraction() {
        let (x, y) = sample_data(5);
        let mut rng = StdRng::seed_from_u64(1);
        for fraction in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&x, &y, fraction, &mut rng),
                Err(WireError::InvalidHyperparameter { .. })
            ));
        }
    }
}
