//! Regularized binary logistic regression.
//!
//! The model works on intercept-augmented matrices: column 0 of every input
//! is the constant 1 and weight 0 is the bias.
//!
//! # Example
//!
//! ```
//! use wirelab::classification::LogisticRegression;
//! use wirelab::prelude::*;
//!
//! // intercept column + one feature
//! let x = Matrix::from_vec(4, 2, vec![
//!     1.0, -2.0,
//!     1.0, -1.0,
//!     1.0, 1.0,
//!     1.0, 2.0,
//! ]).expect("4x2 matrix");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut model = LogisticRegression::new()
//!     .with_learning_rate(0.5)
//!     .with_iterations(500)
//!     .with_regularization(RegularizationKind::None, 0.0)
//!     .with_random_state(42);
//! model.fit(&x, &y).expect("valid training data");
//!
//! assert_eq!(model.predict(&x).expect("fitted"), vec![0, 0, 1, 1]);
//! ```

mod monitor;

pub use monitor::{CancelFlag, NoopMonitor, ProgressLogger, Signal, TrainingMonitor};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TrainingConfig;
use crate::error::{Result, WireError};
use crate::primitives::{Matrix, Vector};
use crate::regularization::RegularizationKind;
use crate::traits::Classifier;

/// Summary of one call to [`LogisticRegression::fit_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Gradient steps applied
    pub iterations_completed: usize,
    /// True when the monitor stopped training early
    pub cancelled: bool,
    /// `(iteration, cost)` samples taken every `log_every` iterations
    pub cost_history: Vec<(usize, f64)>,
    /// Cost after the last completed step (unclamped, infinite or NaN once
    /// predictions saturate)
    pub final_cost: f64,
}

/// Logistic regression trained by batch gradient descent with an optional
/// L1 or L2 penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Weight vector, intercept first; `None` until fitted
    weights: Option<Vector<f64>>,
    config: TrainingConfig,
    random_state: Option<u64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    /// Creates an unfitted model with default hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(TrainingConfig::default())
    }

    /// Creates an unfitted model from a configuration value.
    #[must_use]
    pub fn from_config(config: TrainingConfig) -> Self {
        Self {
            weights: None,
            config,
            random_state: None,
        }
    }

    /// Sets the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.config.learning_rate = lr;
        self
    }

    /// Sets the number of gradient steps.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Sets the penalty kind and strength.
    #[must_use]
    pub fn with_regularization(mut self, kind: RegularizationKind, strength: f64) -> Self {
        self.config.regularization = kind;
        self.config.regularization_strength = strength;
        self
    }

    /// Sets the decision threshold.
    #[must_use]
    pub fn with_decision_threshold(mut self, threshold: f64) -> Self {
        self.config.decision_threshold = threshold;
        self
    }

    /// Sets the half-width of the uniform weight initialisation.
    #[must_use]
    pub fn with_init_scale(mut self, scale: f64) -> Self {
        self.config.init_scale = scale;
        self
    }

    /// Samples the cost every `every` iterations during fit (0 disables).
    #[must_use]
    pub fn with_log_every(mut self, every: usize) -> Self {
        self.config.log_every = every;
        self
    }

    /// Seeds the weight initialisation used by [`fit`](Self::fit).
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Current hyperparameters.
    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Fitted weights (intercept first), if any.
    #[must_use]
    pub fn weights(&self) -> Option<&Vector<f64>> {
        self.weights.as_ref()
    }

    /// Whether `fit` has completed at least once.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    /// Sigmoid activation function: σ(z) = 1 / (1 + e^(-z))
    #[must_use]
    pub fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Fits with the model's own random state and no monitor.
    ///
    /// # Errors
    ///
    /// See [`fit_with`](Self::fit_with).
    pub fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<FitReport> {
        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with(x, y, &mut rng, &mut NoopMonitor)
    }

    /// Fits by batch gradient descent.
    ///
    /// Weights are re-initialised from `rng` at the start of every call, then
    /// updated in place for `iterations` steps:
    /// `w ← w − lr · (Xᵗ(σ(Xw) − y)/n + penalty gradient)`.
    /// The monitor runs before each step; on [`Signal::Cancel`] the loop
    /// stops and the weights of the last completed step remain.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` for zero rows, `DimensionMismatch` when `y`
    /// does not have one label per row, `InvalidLabel` for labels other than
    /// 0/1, or `InvalidHyperparameter`. Existing weights are untouched on error.
    pub fn fit_with<R, M>(
        &mut self,
        x: &Matrix<f64>,
        y: &[usize],
        rng: &mut R,
        monitor: &mut M,
    ) -> Result<FitReport>
    where
        R: Rng,
        M: TrainingMonitor + ?Sized,
    {
        let (n_samples, n_features) = x.shape();
        if n_samples == 0 {
            return Err(WireError::empty_dataset("cannot fit with zero samples"));
        }
        if n_samples != y.len() {
            return Err(WireError::dimension_mismatch("labels", n_samples, y.len()));
        }
        if let Some((index, &value)) = y.iter().enumerate().find(|(_, &l)| l > 1) {
            return Err(WireError::InvalidLabel { index, value });
        }
        self.config.validate()?;

        let config = self.config.clone();
        let targets: Vector<f64> = y.iter().map(|&l| l as f64).collect();
        let scale = config.init_scale;
        let init: Vector<f64> = (0..n_features)
            .map(|_| if scale > 0.0 { rng.gen_range(-scale..=scale) } else { 0.0 })
            .collect();
        let weights = self.weights.insert(init);

        let total = config.iterations;
        let mut report = FitReport {
            iterations_completed: 0,
            cancelled: false,
            cost_history: Vec::new(),
            final_cost: f64::NAN,
        };

        for iteration in 0..total {
            if monitor.on_iteration(iteration, total) == Signal::Cancel {
                debug!(iteration, total, "fit cancelled by monitor");
                report.cancelled = true;
                break;
            }

            if config.log_every > 0 && iteration % config.log_every == 0 {
                let cost = cost_of(x, &targets, weights, &config)?;
                debug!(iteration, cost, "logistic regression cost");
                report.cost_history.push((iteration, cost));
            }

            let grad = gradient(x, &targets, weights, &config)?;
            for (w, g) in weights.as_mut_slice().iter_mut().zip(grad.as_slice()) {
                *w -= config.learning_rate * g;
            }
            report.iterations_completed += 1;
        }

        report.final_cost = cost_of(x, &targets, weights, &config)?;
        Ok(report)
    }

    fn fitted_weights(&self) -> Result<&Vector<f64>> {
        self.weights.as_ref().ok_or(WireError::NotTrained)
    }

    /// Probability of class 1 for each row.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained` before fitting, or `DimensionMismatch` when the
    /// column count differs from the weight count.
    pub fn predict_proba(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        probabilities(x, self.fitted_weights()?)
    }

    /// Probability of class 1 for one intercept-augmented feature vector.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained` or `DimensionMismatch`.
    pub fn predict_proba_single(&self, features: &[f64]) -> Result<f64> {
        let weights = self.fitted_weights()?;
        if features.len() != weights.len() {
            return Err(WireError::dimension_mismatch(
                "features",
                weights.len(),
                features.len(),
            ));
        }
        let z: f64 = features
            .iter()
            .zip(weights.as_slice())
            .map(|(a, b)| a * b)
            .sum();
        Ok(Self::sigmoid(z))
    }

    /// Mean negative log-likelihood plus `strength/(2n) · penalty(w)`.
    ///
    /// `log` is not clamped: saturated probabilities give an infinite or NaN
    /// cost. The value is diagnostic only; fitting and search never read it.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained`, `EmptyDataset`, or `DimensionMismatch`.
    pub fn cost(&self, x: &Matrix<f64>, y: &[usize]) -> Result<f64> {
        let weights = self.fitted_weights()?;
        if x.n_rows() == 0 {
            return Err(WireError::empty_dataset("cost needs at least one sample"));
        }
        if x.n_rows() != y.len() {
            return Err(WireError::dimension_mismatch("labels", x.n_rows(), y.len()));
        }
        let targets: Vector<f64> = y.iter().map(|&l| l as f64).collect();
        cost_of(x, &targets, weights, &self.config)
    }

    fn classify(&self, p: f64) -> usize {
        usize::from(p > self.config.decision_threshold)
    }
}

impl Classifier for LogisticRegression {
    /// Classes by thresholding `σ(Xw)` strictly above the decision threshold.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let probas = self.predict_proba(x)?;
        Ok(probas.iter().map(|&p| self.classify(p)).collect())
    }

    /// The caller prepends the intercept term.
    fn predict_single(&self, features: &[f64]) -> Result<usize> {
        Ok(self.classify(self.predict_proba_single(features)?))
    }
}

fn probabilities(x: &Matrix<f64>, weights: &Vector<f64>) -> Result<Vector<f64>> {
    let z = x.matvec(weights)?;
    Ok(z.iter().map(|&v| LogisticRegression::sigmoid(v)).collect())
}

fn gradient(
    x: &Matrix<f64>,
    targets: &Vector<f64>,
    weights: &Vector<f64>,
    config: &TrainingConfig,
) -> Result<Vector<f64>> {
    let rows = x.n_rows();
    let residuals: Vector<f64> = probabilities(x, weights)?
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| p - t)
        .collect();
    let mut grad = x.transpose_matvec(&residuals)?;
    for g in grad.as_mut_slice() {
        *g /= rows as f64;
    }
    config
        .regularization
        .add_gradient(&mut grad, weights, config.regularization_strength, rows);
    Ok(grad)
}

fn cost_of(
    x: &Matrix<f64>,
    targets: &Vector<f64>,
    weights: &Vector<f64>,
    config: &TrainingConfig,
) -> Result<f64> {
    let rows = x.n_rows() as f64;
    let nll: f64 = probabilities(x, weights)?
        .iter()
        .zip(targets.iter())
        .map(|(&p, &t)| -(t * p.ln() + (1.0 - t) * (1.0 - p).ln()))
        .sum::<f64>()
        / rows;
    let penalty = config.regularization.penalty(weights);
    Ok(nll + config.regularization_strength / (2.0 * rows) * penalty)
}
