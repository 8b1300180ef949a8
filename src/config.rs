//! Training and session configuration.
//!
//! Configuration is plain serde data; files are JSON. Missing fields fall
//! back to their defaults, so a file only needs the values it changes:
//!
//! ```
//! use wirelab::config::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{ "training": { "iterations": 500 }, "seed": 7 }"#)
//!     .expect("valid config");
//! assert_eq!(config.training.iterations, 500);
//! assert_eq!(config.training.learning_rate, 0.001);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automl::HyperparameterGrid;
use crate::error::{Result, WireError};
use crate::format::LoadPolicy;
use crate::preprocessing::EncoderMode;
use crate::regularization::RegularizationKind;

/// Hyperparameters for one logistic-regression fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Fixed number of gradient steps (no convergence check)
    pub iterations: usize,
    /// Penalty multiplier
    pub regularization_strength: f64,
    /// Penalty kind
    pub regularization: RegularizationKind,
    /// Probability above which a sample is classified Dangerous
    pub decision_threshold: f64,
    /// Weights start uniform in `[-init_scale, init_scale]`
    pub init_scale: f64,
    /// Record the cost every `log_every` iterations; 0 disables
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            iterations: 10_000,
            regularization_strength: 600.0,
            regularization: RegularizationKind::L1,
            decision_threshold: 0.5,
            init_scale: 0.01,
            log_every: 0,
        }
    }
}

impl TrainingConfig {
    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(WireError::invalid_hyperparameter(
                "learning_rate",
                self.learning_rate,
                "finite and > 0",
            ));
        }
        if self.iterations == 0 {
            return Err(WireError::invalid_hyperparameter("iterations", 0, "> 0"));
        }
        if !(self.regularization_strength.is_finite() && self.regularization_strength >= 0.0) {
            return Err(WireError::invalid_hyperparameter(
                "regularization_strength",
                self.regularization_strength,
                "finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(WireError::invalid_hyperparameter(
                "decision_threshold",
                self.decision_threshold,
                "within [0, 1]",
            ));
        }
        if !(self.init_scale.is_finite() && self.init_scale >= 0.0) {
            return Err(WireError::invalid_hyperparameter(
                "init_scale",
                self.init_scale,
                "finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Everything a [`Session`](crate::session::Session) needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base fit settings; the search overrides rate, strength and threshold
    pub training: TrainingConfig,
    /// Search grid
    pub grid: HyperparameterGrid,
    /// Feature layout, shared by training and inference
    pub encoder: EncoderMode,
    /// Share of samples used for training
    pub train_fraction: f64,
    /// Malformed log line handling
    pub load_policy: LoadPolicy,
    /// Seed for generation, splitting and weight initialisation
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            grid: HyperparameterGrid::default(),
            encoder: EncoderMode::default(),
            train_fraction: 0.8,
            load_policy: LoadPolicy::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `Io`, `Serialization`, or `InvalidHyperparameter`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` or `InvalidHyperparameter`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Validates training settings, grid and split fraction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.grid.validate()?;
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(WireError::invalid_hyperparameter(
                "train_fraction",
                self.train_fraction,
                "within (0, 1]",
            ));
        }
        Ok(())
    }
}
