//! Accuracy metrics for scoring forecasts against held-out demand

use crate::error::{ForecastError, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::path::Path;

fn check_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::ValidationError(format!(
            "Actual and predicted values must have the same non-zero length, got {} and {}",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean absolute difference between actual and predicted values
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;

    let n = actual.len() as f64;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    Ok(sum / n)
}

/// Mean squared difference between actual and predicted values
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;

    let n = actual.len() as f64;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / n)
}

/// Square root of the mean squared error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Fraction of positions where the two integer sequences agree exactly.
///
/// A coarse score for integer demand; an estimate off by a single unit
/// counts as a miss.
pub fn accuracy_score(actual: &[i64], predicted: &[i64]) -> Result<f64> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::ValidationError(format!(
            "Actual and predicted values must have the same non-zero length, got {} and {}",
            actual.len(),
            predicted.len()
        )));
    }

    let matches = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a == p)
        .count();

    Ok(matches as f64 / actual.len() as f64)
}

/// Evaluation metrics over a validation subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Exact-match fraction of the integer estimates
    pub accuracy: f64,
}

/// Score predicted integer demand against the actual values.
///
/// Both sequences must be non-empty and of equal length.
pub fn evaluate(actual: &[i64], predicted: &[i64]) -> Result<EvaluationReport> {
    let actual_f64: Vec<f64> = actual.iter().map(|v| *v as f64).collect();
    let predicted_f64: Vec<f64> = predicted.iter().map(|v| *v as f64).collect();

    let mse = mean_squared_error(&actual_f64, &predicted_f64)?;

    Ok(EvaluationReport {
        rmse: mse.sqrt(),
        mae: mean_absolute_error(&actual_f64, &predicted_f64)?,
        mse,
        accuracy: accuracy_score(actual, predicted)?,
    })
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Evaluation:")?;
        writeln!(f, "  RMSE:     {:.4}", self.rmse)?;
        writeln!(f, "  MAE:      {:.4}", self.mae)?;
        writeln!(f, "  MSE:      {:.4}", self.mse)?;
        write!(f, "  Accuracy: {:.4}", self.accuracy)
    }
}

/// Export an actual-vs-predicted table for external charting.
///
/// Writes a `timestamp,actual,predicted` CSV. Presentation only; nothing in
/// the pipeline reads this file back.
pub fn export_comparison<P: AsRef<Path>>(
    path: P,
    timestamps: &[NaiveDateTime],
    actual: &[i64],
    predicted: &[i64],
) -> Result<()> {
    if timestamps.len() != actual.len() || actual.len() != predicted.len() {
        return Err(ForecastError::ValidationError(format!(
            "Comparison columns must have equal lengths, got {}, {} and {}",
            timestamps.len(),
            actual.len(),
            predicted.len()
        )));
    }

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["timestamp", "actual", "predicted"])?;
    for ((timestamp, actual_value), predicted_value) in
        timestamps.iter().zip(actual).zip(predicted)
    {
        writer.write_record([
            timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            actual_value.to_string(),
            predicted_value.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
