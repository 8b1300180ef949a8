//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use wirelab::prelude::*;
//! ```

pub use crate::automl::{GridSearch, HyperparameterGrid, SearchOutcome};
pub use crate::classification::{CancelFlag, LogisticRegression, Signal, TrainingMonitor};
pub use crate::config::{SessionConfig, TrainingConfig};
pub use crate::data::Dataset;
pub use crate::error::WireError;
pub use crate::format::{DiagramLog, LoadPolicy};
pub use crate::metrics::{accuracy, ConfusionMatrix};
pub use crate::preprocessing::{DiagramEncoder, EncoderMode};
pub use crate::primitives::{Matrix, Vector};
pub use crate::regularization::RegularizationKind;
pub use crate::session::Session;
pub use crate::synthetic::{Color, Diagram, DiagramGenerator, HazardRule, Label, Orientation};
pub use crate::traits::Classifier;
