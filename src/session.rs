//! End-to-end workflow: generate, log, load, search, predict.
//!
//! A [`Session`] owns the configuration and the model retained from the last
//! successful search. Randomness is always passed in by the caller;
//! [`Session::rng`] builds one from the configured seed.
//!
//! # Example
//!
//! ```
//! use wirelab::automl::HyperparameterGrid;
//! use wirelab::classification::NoopMonitor;
//! use wirelab::config::{SessionConfig, TrainingConfig};
//! use wirelab::format::DiagramLog;
//! use wirelab::session::Session;
//!
//! let dir = tempfile::tempdir().expect("temp dir");
//! let log = DiagramLog::new(dir.path().join("diagrams.txt"));
//!
//! let config = SessionConfig {
//!     training: TrainingConfig { iterations: 20, ..TrainingConfig::default() },
//!     grid: HyperparameterGrid::new(vec![0.01], vec![0.0], vec![0.5]),
//!     seed: Some(7),
//!     ..SessionConfig::default()
//! };
//! let mut session = Session::new(config).expect("valid config");
//! let mut rng = session.rng();
//!
//! session.generate_log(&log, 50, &mut rng).expect("write log");
//! let (dataset, _) = session.load(&log).expect("read log");
//! session.train(&dataset, &mut rng, &mut NoopMonitor).expect("search");
//!
//! let label = session.predict("Row 3 Red,Column 7 Yellow").expect("trained");
//! println!("{label}");
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::automl::{GridSearch, SearchOutcome};
use crate::classification::TrainingMonitor;
use crate::config::SessionConfig;
use crate::data::Dataset;
use crate::error::{Result, WireError};
use crate::format::{DiagramLog, LoadReport};
use crate::preprocessing::{check_feature_len, with_intercept, DiagramEncoder};
use crate::synthetic::{DiagramGenerator, Label};
use crate::traits::Classifier;

/// Configuration plus the retained model.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    generator: DiagramGenerator,
    outcome: Option<SearchOutcome>,
}

impl Session {
    /// Validates `config` and starts with no trained model.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for an invalid config.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator: DiagramGenerator::new(),
            outcome: None,
        })
    }

    /// Replaces the diagram generator (for a non-default hazard rule).
    #[must_use]
    pub fn with_generator(mut self, generator: DiagramGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Encoder used for training and inference.
    #[must_use]
    pub fn encoder(&self) -> DiagramEncoder {
        DiagramEncoder::new(self.config.encoder)
    }

    /// Random source seeded from the config, or from entropy when unseeded.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generates `count` labeled diagrams and appends them to `log`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the log cannot be written.
    pub fn generate_log<R: Rng>(&self, log: &DiagramLog, count: usize, rng: &mut R) -> Result<usize> {
        let batch = self.generator.generate_many(count, rng);
        let written = log.append_all(&batch)?;
        let dangerous = batch.iter().filter(|(_, l)| *l == Label::Dangerous).count();
        info!(
            path = %log.path().display(),
            written,
            dangerous,
            "appended generated diagrams"
        );
        Ok(written)
    }

    /// Loads and encodes a log with the configured encoder and load policy.
    ///
    /// # Errors
    ///
    /// See [`Dataset::load`].
    pub fn load(&self, log: &DiagramLog) -> Result<(Dataset, LoadReport)> {
        Dataset::load(log, self.encoder(), self.config.load_policy)
    }

    /// Splits `dataset`, runs the grid search and retains the winner.
    ///
    /// The previously retained model is kept if anything fails.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `dataset` was encoded with another
    /// mode, or any split or search error (including `Cancelled`).
    pub fn train<R, M>(&mut self, dataset: &Dataset, rng: &mut R, monitor: &mut M) -> Result<&SearchOutcome>
    where
        R: Rng,
        M: TrainingMonitor + ?Sized,
    {
        let encoder = self.encoder();
        if dataset.encoder() != encoder {
            return Err(WireError::dimension_mismatch(
                "features",
                encoder.feature_len(),
                dataset.encoder().feature_len(),
            ));
        }

        let split = dataset.split(self.config.train_fraction, rng)?;
        info!(
            train = split.n_train(),
            test = split.n_test(),
            positives = dataset.n_positive(),
            "split dataset"
        );

        let search = GridSearch::new(self.config.grid.clone())
            .with_base_config(self.config.training.clone());
        let outcome = search.run(&split, rng, monitor)?;
        Ok(self.outcome.insert(outcome))
    }

    /// Outcome of the last successful search.
    #[must_use]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Whether a model is available for prediction.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.outcome.is_some()
    }

    /// Probability that an inference line describes a dangerous diagram.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained` before any successful search, or `Parse` for a
    /// malformed line.
    pub fn predict_proba(&self, input: &str) -> Result<f64> {
        let outcome = self.outcome.as_ref().ok_or(WireError::NotTrained)?;
        let features = self.inference_features(input)?;
        outcome.model.predict_proba_single(&features)
    }

    /// Classifies an inference line of 1 to 4 placements.
    ///
    /// # Errors
    ///
    /// Returns `NotTrained` before any successful search, or `Parse` for a
    /// malformed line.
    pub fn predict(&self, input: &str) -> Result<Label> {
        let outcome = self.outcome.as_ref().ok_or(WireError::NotTrained)?;
        let features = self.inference_features(input)?;
        let class = outcome.model.predict_single(&features)?;
        Ok(Label::from_class(class))
    }

    fn inference_features(&self, input: &str) -> Result<Vec<f64>> {
        let encoder = self.encoder();
        let features = encoder.encode_str(input)?;
        check_feature_len(&encoder, &features)?;
        Ok(with_intercept(&features).into_vec())
    }
}
