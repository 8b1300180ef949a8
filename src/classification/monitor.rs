//! Training progress observation and cooperative cancellation.
//!
//! The training loop calls its monitor once per gradient step, before the
//! step runs. Returning [`Signal::Cancel`] stops the loop; weights from the
//! last completed step are kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Monitor verdict for the next iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Run the next iteration.
    Continue,
    /// Stop now.
    Cancel,
}

/// Observer invoked by [`LogisticRegression::fit_with`](super::LogisticRegression::fit_with)
/// and by the hyperparameter search.
///
/// Any `FnMut(usize, usize) -> Signal` closure is a monitor.
pub trait TrainingMonitor {
    /// Called with the 0-based iteration about to run and the total count.
    fn on_iteration(&mut self, iteration: usize, total: usize) -> Signal;

    /// Called before each search trial starts.
    fn on_trial_start(&mut self, _trial: usize, _total: usize) {}
}

impl<F> TrainingMonitor for F
where
    F: FnMut(usize, usize) -> Signal,
{
    fn on_iteration(&mut self, iteration: usize, total: usize) -> Signal {
        self(iteration, total)
    }
}

/// Monitor that never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl TrainingMonitor for NoopMonitor {
    fn on_iteration(&mut self, _iteration: usize, _total: usize) -> Signal {
        Signal::Continue
    }
}

/// Shared cancellation flag, checked once per iteration.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler or another thread while the other drives training.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// A flag that is not yet raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the flag is raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl TrainingMonitor for CancelFlag {
    fn on_iteration(&mut self, _iteration: usize, _total: usize) -> Signal {
        if self.is_cancelled() {
            Signal::Cancel
        } else {
            Signal::Continue
        }
    }
}

/// Logs progress at `info` every `every` iterations and at each trial start.
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    every: usize,
    trial: usize,
}

impl ProgressLogger {
    /// Logs every `every` iterations (0 logs trial starts only).
    #[must_use]
    pub fn new(every: usize) -> Self {
        Self { every, trial: 0 }
    }
}

impl TrainingMonitor for ProgressLogger {
    fn on_iteration(&mut self, iteration: usize, total: usize) -> Signal {
        if self.every > 0 && iteration % self.every == 0 {
            info!(trial = self.trial, iteration, total, "training");
        }
        Signal::Continue
    }

    fn on_trial_start(&mut self, trial: usize, total: usize) {
        self.trial = trial;
        info!(trial, total, "starting search trial");
    }
}
