//! End-to-end forecast pipeline: load, reconstruct, split, fit, score, write
//!
//! The stages run strictly top to bottom. The model is fit exactly once, on
//! the fit subset, and the same fitted instance answers both the validation
//! query and the test query; nothing is refit in between.

use crate::data::{DataLoader, SeriesSummary};
use crate::error::Result;
use crate::metrics::{evaluate, export_comparison, EvaluationReport};
use crate::models::{FittedModel, ForecastModel};
use crate::prep;
use crate::split::{train_validation_split, DEFAULT_SPLIT_SEED, DEFAULT_TRAIN_FRACTION};
use crate::submission::{RoundingPolicy, SubmissionWriter};
use std::path::{Path, PathBuf};

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    train_path: PathBuf,
    test_path: PathBuf,
    output_path: PathBuf,
    train_fraction: f64,
    seed: u64,
    policy: RoundingPolicy,
    non_negative: bool,
    comparison_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Create a config with the default split fraction, seed and rounding
    pub fn new<P: AsRef<Path>>(train_path: P, test_path: P, output_path: P) -> Self {
        Self {
            train_path: train_path.as_ref().to_path_buf(),
            test_path: test_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
            train_fraction: DEFAULT_TRAIN_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
            policy: RoundingPolicy::default(),
            non_negative: false,
            comparison_path: None,
        }
    }

    /// Set the fraction of training rows used to fit the model
    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    /// Set the split seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the rounding policy for predicted demand
    pub fn with_rounding_policy(mut self, policy: RoundingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Floor predicted demand at zero when set
    pub fn with_non_negative(mut self, clamp: bool) -> Self {
        self.non_negative = clamp;
        self
    }

    /// Also export the validation actual-vs-predicted table to this path
    pub fn with_comparison_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.comparison_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Path of the training CSV
    pub fn train_path(&self) -> &Path {
        &self.train_path
    }

    /// Path of the test CSV
    pub fn test_path(&self) -> &Path {
        &self.test_path
    }

    /// Path the submission CSV is written to
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Fraction of training rows used for fitting
    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    /// Seed of the split RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Summary of the full training series
    pub train_summary: SeriesSummary,
    /// Rows used to fit the model
    pub fit_rows: usize,
    /// Rows held out for validation
    pub validation_rows: usize,
    /// Validation scores
    pub report: EvaluationReport,
    /// Rows in the test dataset
    pub test_rows: usize,
    /// Rows written to the submission file
    pub submission_rows: usize,
}

/// Run the full pipeline with the given model.
///
/// Loads and reconstructs the training data, splits it, fits the model on
/// the fit subset, scores the held-out subset, then predicts the test
/// timestamps and writes the submission file.
pub fn run<M: ForecastModel>(config: &PipelineConfig, model: &M) -> Result<PipelineOutcome> {
    let train = DataLoader::from_csv(&config.train_path)?;
    let series = prep::build_series(&train)?;
    let train_summary = series.summary()?;

    let (fit_subset, validation_subset) =
        train_validation_split(&series, config.train_fraction, config.seed)?;

    let fitted = model.fit(&fit_subset)?;

    let writer = SubmissionWriter::new()
        .with_policy(config.policy)
        .with_non_negative(config.non_negative);

    let validation_timestamps = validation_subset.timestamps();
    let estimates = fitted.predict(&validation_timestamps)?;
    let predicted = writer.finalize_all(&estimates);
    let actual = validation_subset.values();
    let report = evaluate(&actual, &predicted)?;

    if let Some(path) = &config.comparison_path {
        export_comparison(path, &validation_timestamps, &actual, &predicted)?;
    }

    let test = DataLoader::from_csv(&config.test_path)?;
    let test_timestamps = prep::reconstruct_timestamps(&test)?;
    let test_estimates = fitted.predict(&test_timestamps)?;
    let submission_rows = writer.write(&config.output_path, &test, &test_estimates)?;

    Ok(PipelineOutcome {
        train_summary,
        fit_rows: fit_subset.len(),
        validation_rows: validation_subset.len(),
        report,
        test_rows: test.len(),
        submission_rows,
    })
}
