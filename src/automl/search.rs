//! Exhaustive grid search over logistic-regression hyperparameters.
//!
//! Every combination gets an independent fit from fresh random weights and
//! is scored by accuracy on the test partition. The first combination with
//! the highest accuracy wins; it is then refit and returned.
//!
//! Selection and final reporting use the same test partition, so the
//! reported accuracy is optimistic.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::grid::{HyperparameterGrid, Hyperparameters};
use crate::classification::{LogisticRegression, TrainingMonitor};
use crate::config::TrainingConfig;
use crate::error::{Result, WireError};
use crate::metrics::ConfusionMatrix;
use crate::model_selection::TrainTestSplit;
use crate::traits::Classifier;

/// Score of one grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// 0-based trial index in combination order
    pub trial: usize,
    /// Evaluated combination
    pub params: Hyperparameters,
    /// Test-partition accuracy
    pub accuracy: f64,
    /// Training cost after the last step
    pub final_cost: f64,
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Winning combination
    pub best: Hyperparameters,
    /// Accuracy the winner scored during the search
    pub best_accuracy: f64,
    /// Every trial in evaluation order
    pub trials: Vec<TrialResult>,
    /// Model refit with `best`
    pub model: LogisticRegression,
    /// Test accuracy of the refit model
    pub refit_accuracy: f64,
    /// Test confusion matrix of the refit model
    pub confusion: ConfusionMatrix,
}

/// Grid search driver.
#[derive(Debug, Clone, Default)]
pub struct GridSearch {
    base: TrainingConfig,
    grid: HyperparameterGrid,
}

impl GridSearch {
    /// Searches `grid` with default settings for everything the grid does not cover.
    #[must_use]
    pub fn new(grid: HyperparameterGrid) -> Self {
        Self {
            base: TrainingConfig::default(),
            grid,
        }
    }

    /// Sets iteration count, penalty kind, initialisation and logging for every trial.
    #[must_use]
    pub fn with_base_config(mut self, base: TrainingConfig) -> Self {
        self.base = base;
        self
    }

    /// Settings shared by every trial.
    #[must_use]
    pub fn base_config(&self) -> &TrainingConfig {
        &self.base
    }

    /// Searched grid.
    #[must_use]
    pub fn grid(&self) -> &HyperparameterGrid {
        &self.grid
    }

    /// Runs every trial, then refits the winner.
    ///
    /// The monitor sees `on_trial_start(trial, total)` before each fit, with
    /// `trial == total` for the refit, and every iteration of every fit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for a bad grid or base config,
    /// `EmptyDataset` when either partition is empty, `Cancelled` when the
    /// monitor stops any fit, or any error from fitting and scoring.
    pub fn run<R, M>(
        &self,
        split: &TrainTestSplit,
        rng: &mut R,
        monitor: &mut M,
    ) -> Result<SearchOutcome>
    where
        R: Rng,
        M: TrainingMonitor + ?Sized,
    {
        self.grid.validate()?;
        self.base.validate()?;
        if split.n_test() == 0 {
            return Err(WireError::empty_dataset("test partition is empty"));
        }

        let combinations = self.grid.combinations();
        let total = combinations.len();
        let mut trials = Vec::with_capacity(total);
        let mut best: Option<(Hyperparameters, f64)> = None;

        for (trial, params) in combinations.into_iter().enumerate() {
            monitor.on_trial_start(trial, total);
            let (model, final_cost) = self.fit_trial(trial, &params, split, rng, monitor)?;
            let accuracy = model.score(&split.x_test, &split.y_test)?;

            info!(
                trial,
                total,
                learning_rate = params.learning_rate,
                regularization_strength = params.regularization_strength,
                decision_threshold = params.decision_threshold,
                accuracy,
                "search trial finished"
            );

            if best.map_or(true, |(_, best_accuracy)| accuracy > best_accuracy) {
                best = Some((params, accuracy));
            }
            trials.push(TrialResult {
                trial,
                params,
                accuracy,
                final_cost,
            });
        }

        let Some((best, best_accuracy)) = best else {
            return Err(WireError::invalid_hyperparameter("grid", "[]", "at least one combination"));
        };

        monitor.on_trial_start(total, total);
        let (model, _) = self.fit_trial(total, &best, split, rng, monitor)?;
        let predictions = model.predict(&split.x_test)?;
        let confusion = ConfusionMatrix::from_predictions(&predictions, &split.y_test)?;
        let refit_accuracy = confusion.accuracy();

        info!(
            learning_rate = best.learning_rate,
            regularization_strength = best.regularization_strength,
            decision_threshold = best.decision_threshold,
            best_accuracy,
            refit_accuracy,
            "search complete"
        );

        Ok(SearchOutcome {
            best,
            best_accuracy,
            trials,
            model,
            refit_accuracy,
            confusion,
        })
    }

    fn fit_trial<R, M>(
        &self,
        trial: usize,
        params: &Hyperparameters,
        split: &TrainTestSplit,
        rng: &mut R,
        monitor: &mut M,
    ) -> Result<(LogisticRegression, f64)>
    where
        R: Rng,
        M: TrainingMonitor + ?Sized,
    {
        let mut model = LogisticRegression::from_config(params.apply(&self.base));
        let report = model.fit_with(&split.x_train, &split.y_train, rng, monitor)?;
        if report.cancelled {
            return Err(WireError::Cancelled {
                trial,
                iteration: report.iterations_completed,
            });
        }
        Ok((model, report.final_cost))
    }
}
