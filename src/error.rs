//! Error types for wirelab operations.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! side is the single [`WireError`] taxonomy.

use thiserror::Error;

/// Main error type for wirelab operations.
///
/// # Examples
///
/// ```
/// use wirelab::error::WireError;
///
/// let err = WireError::DimensionMismatch {
///     expected: "rows=10".to_string(),
///     actual: "8".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum WireError {
    /// A diagram record could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number, or 0 when parsing a standalone record
        line: usize,
        /// What was wrong with the record
        message: String,
    },

    /// Matrix/vector dimensions don't agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// An operation needs at least one sample.
    #[error("empty dataset: {context}")]
    EmptyDataset {
        /// Which operation received no samples
        context: String,
    },

    /// Invalid hyperparameter or configuration value.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A placement sequence violates a diagram invariant.
    #[error("invalid diagram: {message}")]
    InvalidDiagram {
        /// Violated invariant
        message: String,
    },

    /// A training label is neither 0 nor 1.
    #[error("invalid label {value} at sample {index}: labels must be 0 or 1")]
    InvalidLabel {
        /// Sample index
        index: usize,
        /// Offending label value
        value: usize,
    },

    /// Prediction was requested before any successful training run.
    #[error("no trained model available")]
    NotTrained,

    /// Training was cancelled by its monitor.
    #[error("training cancelled during trial {trial} at iteration {iteration}")]
    Cancelled {
        /// Search trial index (0 for a standalone fit)
        trial: usize,
        /// Iteration at which the monitor asked to stop
        iteration: usize,
    },

    /// I/O error while reading or appending a diagram log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl WireError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty dataset error
    #[must_use]
    pub fn empty_dataset(context: &str) -> Self {
        Self::EmptyDataset {
            context: context.to_string(),
        }
    }

    /// Create a parse error for a given line
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Attach a line number to a parse error produced for a standalone record.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse { line, message },
            other => other,
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, WireError>;
