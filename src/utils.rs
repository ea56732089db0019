//! Utility helpers for demos and tests

use crate::data::{DemandSeries, Observation};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Generate a synthetic hourly demand series.
///
/// The shape is a base level with a daily cycle peaking in the early
/// afternoon, a weekend dip, and Gaussian noise. Deterministic for a given
/// seed, so demos and tests can rely on the exact values.
pub fn synthetic_hourly_series(n_hours: usize, seed: u64) -> DemandSeries {
    const BASE_DEMAND: f64 = 120.0;
    const DAILY_AMPLITUDE: f64 = 25.0;
    const WEEKEND_DIP: f64 = 15.0;
    const NOISE_STD: f64 = 5.0;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, NOISE_STD).unwrap();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_time(NaiveTime::MIN);

    let mut observations = Vec::with_capacity(n_hours);
    for i in 0..n_hours {
        let timestamp = start + Duration::hours(i as i64);
        let hour = timestamp.hour() as f64;

        let mut level = BASE_DEMAND + DAILY_AMPLITUDE * ((hour - 6.0) * 2.0 * PI / 24.0).sin();
        if matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun) {
            level -= WEEKEND_DIP;
        }

        let demand = (level + noise.sample(&mut rng)).round().max(0.0) as i64;
        observations.push(Observation { timestamp, demand });
    }

    DemandSeries::new(observations)
}
