//! Wirelab: synthetic wire-diagram generation and a regularized
//! logistic-regression safety classifier in pure Rust.
//!
//! A diagram is four colored wires laid on a 20×20 grid. Its label is a
//! function of the order the colors were placed in, while the classifier
//! only sees the painted grid (plus, by default, the color sequence). The
//! crate generates labeled diagrams, persists them as text, encodes them as
//! feature vectors, and searches a hyperparameter grid for the best model.
//!
//! # Quick Start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use wirelab::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (diagram, label) = DiagramGenerator::new().generate(&mut rng);
//! assert!(diagram.is_complete());
//! assert_eq!(diagram.label(&HazardRule::default()), label);
//!
//! let features = DiagramEncoder::default().encode(&diagram);
//! assert_eq!(features.len(), 404);
//! ```
//!
//! # Modules
//!
//! - [`synthetic`]: Diagram model, hazard rule and random generator
//! - [`format`]: Text record format and the append-only diagram log
//! - [`preprocessing`]: Diagram-to-feature encoding and intercept augmentation
//! - [`data`]: Encoded dataset assembled from a log
//! - [`model_selection`]: Randomized train/test splitting
//! - [`classification`]: Logistic regression with progress and cancellation
//! - [`regularization`]: L1 and L2 penalties
//! - [`metrics`]: Accuracy and confusion matrix
//! - [`automl`]: Exhaustive hyperparameter grid search
//! - [`config`]: Serializable training and session configuration
//! - [`session`]: End-to-end generate, train and predict workflow

pub mod automl;
pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod metrics;
pub mod model_selection;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod regularization;
pub mod session;
pub mod synthetic;
pub mod traits;

pub use error::{Result, WireError};
pub use primitives::{Matrix, Vector};
pub use traits::Classifier;
