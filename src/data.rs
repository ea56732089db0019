//! Loading and in-memory representation of hourly demand data

use crate::error::{ForecastError, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use statrs::statistics::Statistics;
use std::fmt;
use std::path::Path;

/// Columns every input file must carry. The train file additionally carries
/// a `demand` value on every row; the test file leaves it absent.
const REQUIRED_COLUMNS: [&str; 2] = ["date", "hour"];

/// One row of a raw input file, before timestamp reconstruction.
///
/// The calendar date is kept as the verbatim text read from the file so that
/// submission output can reproduce the test rows exactly as they arrived.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    /// Calendar date text, e.g. `2023-01-01`
    pub date: String,
    /// Whole hours past midnight of `date` (0-23 expected, not validated)
    pub hour: u32,
    /// Observed demand; present on train rows, absent on test rows
    pub demand: Option<i64>,
}

/// An ordered collection of raw rows sharing one schema.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    rows: Vec<RawRow>,
}

impl RawDataset {
    /// Create a dataset from already-parsed rows
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Get the rows in file order
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether every row carries a demand value
    pub fn has_complete_demand(&self) -> bool {
        self.rows.iter().all(|row| row.demand.is_some())
    }
}

/// Loader for the delimited input files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a raw dataset from a CSV file.
    ///
    /// The header row must contain the `date` and `hour` columns; `demand`
    /// is optional (test files omit it). Extra columns are ignored.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<RawDataset> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let headers = reader.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|name| name == required) {
                return Err(ForecastError::DataError(format!(
                    "Missing required column '{}' in {}",
                    required,
                    path.as_ref().display()
                )));
            }
        }

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: RawRow = record?;
            rows.push(row);
        }

        Ok(RawDataset::new(rows))
    }
}

/// One hourly reading after timestamp reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Combined timestamp (date at midnight plus the hour offset)
    pub timestamp: NaiveDateTime,
    /// Observed demand for that hour
    pub demand: i64,
}

/// Time series of hourly demand observations.
#[derive(Debug, Clone, Default)]
pub struct DemandSeries {
    observations: Vec<Observation>,
}

impl DemandSeries {
    /// Create a series from observations, keeping their order
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Create a series from parallel timestamp and demand vectors
    pub fn from_parts(timestamps: Vec<NaiveDateTime>, demands: Vec<i64>) -> Result<Self> {
        if timestamps.len() != demands.len() {
            return Err(ForecastError::ValidationError(format!(
                "Timestamp count ({}) does not match demand count ({})",
                timestamps.len(),
                demands.len()
            )));
        }

        let observations = timestamps
            .into_iter()
            .zip(demands)
            .map(|(timestamp, demand)| Observation { timestamp, demand })
            .collect();

        Ok(Self { observations })
    }

    /// Get the observations in series order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.observations.iter().map(|obs| obs.timestamp).collect()
    }

    /// Get the demand values as a vector
    pub fn values(&self) -> Vec<i64> {
        self.observations.iter().map(|obs| obs.demand).collect()
    }

    /// Get the demand values as floats, for model fitting
    pub fn values_f64(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|obs| obs.demand as f64)
            .collect()
    }

    /// Earliest timestamp in the series
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.observations.iter().map(|obs| obs.timestamp).min()
    }

    /// Latest timestamp in the series
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.observations.iter().map(|obs| obs.timestamp).max()
    }

    /// Mean demand over the series
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(ForecastError::DataError(
                "No observations available".to_string(),
            ));
        }

        let values = self.values_f64();
        Ok(values.iter().mean())
    }

    /// Sample standard deviation of demand over the series
    pub fn std_dev(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(ForecastError::DataError(
                "No observations available".to_string(),
            ));
        }

        let values = self.values_f64();
        Ok(values.iter().std_dev())
    }

    /// Summarize the series for exploratory reporting
    pub fn summary(&self) -> Result<SeriesSummary> {
        let (Some(start), Some(end)) = (self.start(), self.end()) else {
            return Err(ForecastError::DataError(
                "Cannot summarize an empty series".to_string(),
            ));
        };

        let values = self.values();
        // min/max exist whenever start/end do
        let min = values.iter().copied().min().unwrap_or_default();
        let max = values.iter().copied().max().unwrap_or_default();

        Ok(SeriesSummary {
            count: self.len(),
            start,
            end,
            mean: self.mean()?,
            std_dev: self.std_dev()?,
            min,
            max,
        })
    }
}

/// Descriptive statistics of a demand series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    /// Number of observations
    pub count: usize,
    /// Earliest timestamp
    pub start: NaiveDateTime,
    /// Latest timestamp
    pub end: NaiveDateTime,
    /// Mean demand
    pub mean: f64,
    /// Sample standard deviation of demand
    pub std_dev: f64,
    /// Smallest observed demand
    pub min: i64,
    /// Largest observed demand
    pub max: i64,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Demand Series Summary:")?;
        writeln!(f, "  Observations: {}", self.count)?;
        writeln!(
            f,
            "  Range:        {} to {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "  Mean:         {:.2}", self.mean)?;
        writeln!(f, "  Std Dev:      {:.2}", self.std_dev)?;
        writeln!(f, "  Min:          {}", self.min)?;
        write!(f, "  Max:          {}", self.max)
    }
}
