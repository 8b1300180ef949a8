//! Hyperparameter search for the diagram classifier.
//!
//! # Quick Start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use wirelab::automl::{GridSearch, HyperparameterGrid};
//! use wirelab::classification::NoopMonitor;
//! use wirelab::config::TrainingConfig;
//! use wirelab::model_selection::train_test_split;
//! use wirelab::primitives::Matrix;
//!
//! let x = Matrix::from_vec(10, 1, vec![-5.0, -4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0, 5.0])
//!     .expect("10x1 matrix");
//! let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
//! let mut rng = StdRng::seed_from_u64(42);
//! let split = train_test_split(&x, &y, 0.8, &mut rng).expect("valid split");
//!
//! let base = TrainingConfig { iterations: 200, ..TrainingConfig::default() };
//! let search = GridSearch::new(HyperparameterGrid::new(vec![0.1, 0.5], vec![0.0], vec![0.5]))
//!     .with_base_config(base);
//! let outcome = search.run(&split, &mut rng, &mut NoopMonitor).expect("search");
//! assert_eq!(outcome.trials.len(), 2);
//! ```

mod grid;
mod search;

pub use grid::{HyperparameterGrid, Hyperparameters};
pub use search::{GridSearch, SearchOutcome, TrialResult};
