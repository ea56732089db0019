//! Submission file generation
//!
//! Attaches integer demand predictions to the original test rows and writes
//! them as CSV with a header row and no index column, preserving row order.

use crate::data::RawDataset;
use crate::error::{ForecastError, Result};
use serde::Serialize;
use std::path::Path;

/// How continuous estimates are discretized to integer demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    /// Drop the fractional part (truncation toward zero). An estimate of
    /// 9.9 becomes 9, and -2.7 becomes -2. The historical default.
    #[default]
    Truncate,
    /// Round to the nearest integer
    Nearest,
}

impl RoundingPolicy {
    /// Discretize one estimate under this policy
    pub fn apply(self, estimate: f64) -> i64 {
        match self {
            RoundingPolicy::Truncate => estimate.trunc() as i64,
            RoundingPolicy::Nearest => estimate.round() as i64,
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmissionRow<'a> {
    date: &'a str,
    hour: u32,
    demand: i64,
}

/// Writer for the submission CSV.
///
/// The rounding policy defaults to [`RoundingPolicy::Truncate`] and negative
/// estimates pass through unclamped, reproducing historical submissions.
/// Both behaviors are configurable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionWriter {
    policy: RoundingPolicy,
    non_negative: bool,
}

impl SubmissionWriter {
    /// Create a writer with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding policy
    pub fn with_policy(mut self, policy: RoundingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Floor discretized demand at zero when set
    pub fn with_non_negative(mut self, clamp: bool) -> Self {
        self.non_negative = clamp;
        self
    }

    /// Get the configured rounding policy
    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Discretize one estimate under the configured policy and clamp
    pub fn finalize(&self, estimate: f64) -> i64 {
        let value = self.policy.apply(estimate);
        if self.non_negative {
            value.max(0)
        } else {
            value
        }
    }

    /// Discretize a whole sequence of estimates
    pub fn finalize_all(&self, estimates: &[f64]) -> Vec<i64> {
        estimates
            .iter()
            .map(|estimate| self.finalize(*estimate))
            .collect()
    }

    /// Write the submission file and return the number of rows written.
    ///
    /// One estimate per test row is required; rows are written in the test
    /// dataset's order with the verbatim date text they were read with.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        test: &RawDataset,
        estimates: &[f64],
    ) -> Result<usize> {
        if estimates.len() != test.len() {
            return Err(ForecastError::ValidationError(format!(
                "Estimate count ({}) does not match test row count ({})",
                estimates.len(),
                test.len()
            )));
        }

        let mut writer = csv::Writer::from_path(path.as_ref())?;
        if test.is_empty() {
            // serialize() emits the header lazily, so write it by hand
            writer.write_record(["date", "hour", "demand"])?;
        }
        for (row, estimate) in test.rows().iter().zip(estimates) {
            writer.serialize(SubmissionRow {
                date: &row.date,
                hour: row.hour,
                demand: self.finalize(*estimate),
            })?;
        }
        writer.flush()?;

        Ok(test.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRow;
    use tempfile::tempdir;

    fn test_dataset() -> RawDataset {
        RawDataset::new(vec![
            RawRow {
                date: "2023-02-01".to_string(),
                hour: 0,
                demand: None,
            },
            RawRow {
                date: "2023-02-01".to_string(),
                hour: 1,
                demand: None,
            },
        ])
    }

    #[test]
    fn write_attaches_rounded_demand_in_row_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submission.csv");

        let rows = SubmissionWriter::new()
            .write(&path, &test_dataset(), &[10.7, -3.2])
            .unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["date,hour,demand", "2023-02-01,0,10", "2023-02-01,1,-3"]);
    }

    #[test]
    fn write_rejects_estimate_count_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submission.csv");

        let result = SubmissionWriter::new().write(&path, &test_dataset(), &[10.7]);

        assert!(result.is_err());
    }

    #[test]
    fn write_emits_header_for_empty_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submission.csv");

        let rows = SubmissionWriter::new()
            .write(&path, &RawDataset::default(), &[])
            .unwrap();
        assert_eq!(rows, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "date,hour,demand");
    }

    #[test]
    fn truncate_drops_fraction_toward_zero() {
        let policy = RoundingPolicy::Truncate;

        assert_eq!(policy.apply(9.9), 9);
        assert_eq!(policy.apply(-2.7), -2);
        assert_eq!(policy.apply(120.0), 120);
    }

    #[test]
    fn nearest_rounds_half_away_from_zero() {
        let policy = RoundingPolicy::Nearest;

        assert_eq!(policy.apply(9.9), 10);
        assert_eq!(policy.apply(-2.7), -3);
        assert_eq!(policy.apply(2.5), 3);
    }

    #[test]
    fn non_negative_clamp_floors_at_zero() {
        let writer = SubmissionWriter::new().with_non_negative(true);

        assert_eq!(writer.finalize(-4.2), 0);
        assert_eq!(writer.finalize(4.2), 4);
    }

    #[test]
    fn default_writer_keeps_negative_estimates() {
        let writer = SubmissionWriter::new();

        assert_eq!(writer.finalize(-4.2), -4);
    }
}
