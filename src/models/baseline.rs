//! Seasonal profile baseline
//!
//! Forecasts the mean training demand of the matching hour of the week.
//! Useful as a sanity check against the additive model and as a second
//! implementation of the model traits.

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, ForecastModel};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::collections::HashMap;

const MODEL_NAME: &str = "Hour-of-week average";

/// Baseline model predicting the per-slot mean of the training data.
///
/// A slot is a (weekday, hour) pair, so the profile repeats weekly. Slots
/// never seen in training fall back to the overall training mean.
#[derive(Debug, Clone, Default)]
pub struct HourOfWeekAverage;

impl HourOfWeekAverage {
    /// Create the baseline model
    pub fn new() -> Self {
        Self
    }
}

fn slot(timestamp: &NaiveDateTime) -> (u32, u32) {
    (
        timestamp.weekday().num_days_from_monday(),
        timestamp.hour(),
    )
}

impl ForecastModel for HourOfWeekAverage {
    type Fitted = FittedHourOfWeekAverage;

    fn fit(&self, series: &DemandSeries) -> Result<FittedHourOfWeekAverage> {
        if series.is_empty() {
            return Err(ForecastError::ForecastingError(
                "Cannot fit on an empty series".to_string(),
            ));
        }

        let mut sums: HashMap<(u32, u32), (f64, usize)> = HashMap::new();
        let mut total = 0.0;
        for observation in series.observations() {
            let entry = sums.entry(slot(&observation.timestamp)).or_insert((0.0, 0));
            entry.0 += observation.demand as f64;
            entry.1 += 1;
            total += observation.demand as f64;
        }

        let profile = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();

        Ok(FittedHourOfWeekAverage {
            profile,
            overall_mean: total / series.len() as f64,
        })
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}

/// Fitted hour-of-week profile
#[derive(Debug, Clone)]
pub struct FittedHourOfWeekAverage {
    profile: HashMap<(u32, u32), f64>,
    overall_mean: f64,
}

impl FittedModel for FittedHourOfWeekAverage {
    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<Vec<f64>> {
        let estimates = timestamps
            .iter()
            .map(|timestamp| {
                self.profile
                    .get(&slot(timestamp))
                    .copied()
                    .unwrap_or(self.overall_mean)
            })
            .collect();

        Ok(estimates)
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}
