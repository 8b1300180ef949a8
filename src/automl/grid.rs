//! Hyperparameter grid: the Cartesian product of three value lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, WireError};

/// One point of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Penalty multiplier
    pub regularization_strength: f64,
    /// Decision threshold used for scoring and prediction
    pub decision_threshold: f64,
}

impl Hyperparameters {
    /// Copies `base` with this point's three values substituted.
    #[must_use]
    pub fn apply(&self, base: &TrainingConfig) -> TrainingConfig {
        TrainingConfig {
            learning_rate: self.learning_rate,
            regularization_strength: self.regularization_strength,
            decision_threshold: self.decision_threshold,
            ..base.clone()
        }
    }
}

impl fmt::Display for Hyperparameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "learning_rate={} regularization_strength={} decision_threshold={}",
            self.learning_rate, self.regularization_strength, self.decision_threshold
        )
    }
}

/// Candidate values for each searched hyperparameter.
///
/// # Examples
///
/// ```
/// use wirelab::automl::HyperparameterGrid;
///
/// let grid = HyperparameterGrid::new(vec![0.1, 0.01], vec![0.0], vec![0.4, 0.5]);
/// assert_eq!(grid.len(), 4);
///
/// let first = grid.combinations()[0];
/// assert_eq!(first.learning_rate, 0.1);
/// assert_eq!(first.decision_threshold, 0.4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperparameterGrid {
    /// Learning rates to try
    pub learning_rates: Vec<f64>,
    /// Regularization strengths to try
    pub regularization_strengths: Vec<f64>,
    /// Decision thresholds to try
    pub thresholds: Vec<f64>,
}

impl Default for HyperparameterGrid {
    fn default() -> Self {
        Self {
            learning_rates: vec![0.001, 0.01],
            regularization_strengths: vec![0.0, 600.0],
            thresholds: vec![0.5],
        }
    }
}

impl HyperparameterGrid {
    /// Creates a grid from the three value lists.
    #[must_use]
    pub fn new(
        learning_rates: Vec<f64>,
        regularization_strengths: Vec<f64>,
        thresholds: Vec<f64>,
    ) -> Self {
        Self {
            learning_rates,
            regularization_strengths,
            thresholds,
        }
    }

    /// Number of combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.learning_rates.len() * self.regularization_strengths.len() * self.thresholds.len()
    }

    /// True when any list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every combination, learning rate outermost and threshold innermost.
    #[must_use]
    pub fn combinations(&self) -> Vec<Hyperparameters> {
        let mut out = Vec::with_capacity(self.len());
        for &learning_rate in &self.learning_rates {
            for &regularization_strength in &self.regularization_strengths {
                for &decision_threshold in &self.thresholds {
                    out.push(Hyperparameters {
                        learning_rate,
                        regularization_strength,
                        decision_threshold,
                    });
                }
            }
        }
        out
    }

    /// Rejects empty lists and out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` naming the offending list.
    pub fn validate(&self) -> Result<()> {
        check_list("grid.learning_rates", &self.learning_rates, "finite and > 0", |v| {
            v.is_finite() && v > 0.0
        })?;
        check_list(
            "grid.regularization_strengths",
            &self.regularization_strengths,
            "finite and >= 0",
            |v| v.is_finite() && v >= 0.0,
        )?;
        check_list("grid.thresholds", &self.thresholds, "within [0, 1]", |v| {
            (0.0..=1.0).contains(&v)
        })
    }
}

fn check_list(name: &str, values: &[f64], constraint: &str, ok: impl Fn(f64) -> bool) -> Result<()> {
    if values.is_empty() {
        return Err(WireError::invalid_hyperparameter(name, "[]", "at least one value"));
    }
    match values.iter().find(|&&v| !ok(v)) {
        Some(&bad) => Err(WireError::invalid_hyperparameter(name, bad, constraint)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combination_order() {
        let grid = HyperparameterGrid::new(vec![1.0, 2.0], vec![10.0, 20.0], vec![0.3, 0.6]);
        let combos = grid.combinations();
        assert_eq!(combos.len(), 8);
        assert_eq!(
            combos[0],
            Hyperparameters {
                learning_rate: 1.0,
                regularization_strength: 10.0,
                decision_threshold: 0.3,
            }
        );
        assert_eq!(combos[1].decision_threshold, 0.6);
        assert_eq!(combos[2].regularization_strength, 20.0);
        assert_eq!(combos[4].learning_rate, 2.0);
    }

    #[test]
    fn test_default_is_valid() {
        let grid = HyperparameterGrid::default();
        assert!(grid.validate().is_ok());
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        let grid = HyperparameterGrid::new(vec![0.1], vec![], vec![0.5]);
        assert!(grid.is_empty());
        assert!(matches!(
            grid.validate(),
            Err(WireError::InvalidHyperparameter { ref param, .. }) if param == "grid.regularization_strengths"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            HyperparameterGrid::new(vec![0.0], vec![0.0], vec![0.5]),
            HyperparameterGrid::new(vec![0.1], vec![-1.0], vec![0.5]),
            HyperparameterGrid::new(vec![0.1], vec![0.0], vec![1.5]),
        ];
        for grid in bad {
            assert!(grid.validate().is_err(), "{grid:?}");
        }
    }

    #[test]
    fn test_apply_keeps_other_fields() {
        let base = TrainingConfig {
            iterations: 42,
            ..TrainingConfig::default()
        };
        let point = Hyperparameters {
            learning_rate: 0.3,
            regularization_strength: 1.0,
            decision_threshold: 0.7,
        };
        let config = point.apply(&base);
        assert_eq!(config.iterations, 42);
        assert_eq!(config.learning_rate, 0.3);
        assert_eq!(config.regularization_strength, 1.0);
        assert_eq!(config.decision_threshold, 0.7);
        assert_eq!(config.regularization, base.regularization);
    }
}
