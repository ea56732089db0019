//! Timestamp reconstruction for raw date/hour rows
//!
//! Input files carry a calendar date and a separate hour offset. These
//! helpers combine the two fields into one timestamp. All functions return
//! new values; the raw dataset is never mutated, so callers keep access to
//! the original columns for submission output.

use crate::data::{DemandSeries, Observation, RawDataset};
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Date formats accepted for the `date` column, tried in order. The last
/// form tolerates exporters that append a midnight time to plain dates.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse the text of a `date` column entry into a calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
        return Ok(datetime.date());
    }

    Err(ForecastError::ParseError(format!(
        "Cannot parse '{}' as a calendar date",
        text
    )))
}

/// Combine a calendar date and an hour offset into a single timestamp.
///
/// The result is the date at midnight plus `hour` whole hours. Offsets of
/// 24 or more roll into the following days. Offsets large enough to leave
/// the representable date range are reported as errors.
pub fn combine_date_hour(date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(hour)))
        .ok_or_else(|| {
            ForecastError::DataError(format!(
                "Hour offset {} from {} overflows the supported date range",
                hour, date
            ))
        })
}

fn row_timestamp(index: usize, date_text: &str, hour: u32) -> Result<NaiveDateTime> {
    let date = parse_date(date_text).map_err(|_| {
        ForecastError::ParseError(format!(
            "Row {}: cannot parse '{}' as a calendar date",
            index + 1,
            date_text
        ))
    })?;
    combine_date_hour(date, hour)
}

/// Build a demand series from a training dataset.
///
/// Every row must carry a demand value. Row count and order are preserved
/// and the input dataset is left untouched.
pub fn build_series(dataset: &RawDataset) -> Result<DemandSeries> {
    let mut observations = Vec::with_capacity(dataset.len());
    for (index, row) in dataset.rows().iter().enumerate() {
        let timestamp = row_timestamp(index, &row.date, row.hour)?;
        let demand = row.demand.ok_or_else(|| {
            ForecastError::DataError(format!("Row {}: missing demand value", index + 1))
        })?;
        observations.push(Observation { timestamp, demand });
    }

    Ok(DemandSeries::new(observations))
}

/// Reconstruct the timestamps of a dataset without demand values.
///
/// Used for the test file, whose demand is the quantity to be predicted.
/// One timestamp per row, in row order.
pub fn reconstruct_timestamps(dataset: &RawDataset) -> Result<Vec<NaiveDateTime>> {
    let mut timestamps = Vec::with_capacity(dataset.len());
    for (index, row) in dataset.rows().iter().enumerate() {
        timestamps.push(row_timestamp(index, &row.date, row.hour)?);
    }

    Ok(timestamps)
}
