//! Random partitioning of a demand series into fit and validation subsets

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Fraction of rows assigned to the fit subset unless configured otherwise
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Seed for the split RNG unless configured otherwise
pub const DEFAULT_SPLIT_SEED: u64 = 10;

/// Partition a series into two disjoint subsets covering every row once.
///
/// The first subset receives `round(n * fraction)` rows chosen by uniform
/// sampling without replacement; the complement forms the second subset.
/// Both subsets keep their rows in the original series order. The RNG is
/// ChaCha8 seeded from `seed`, so the same seed and series length always
/// reproduce the same partition. Changing the row count changes which rows
/// are selected.
///
/// `fraction` must lie strictly between 0 and 1.
pub fn train_validation_split(
    series: &DemandSeries,
    fraction: f64,
    seed: u64,
) -> Result<(DemandSeries, DemandSeries)> {
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Split fraction must be in (0, 1), got {}",
            fraction
        )));
    }

    let n = series.len();
    let take = (n as f64 * fraction).round() as usize;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let chosen = rand::seq::index::sample(&mut rng, n, take);

    let mut selected = vec![false; n];
    for index in chosen.iter() {
        selected[index] = true;
    }

    let mut fit_rows = Vec::with_capacity(take);
    let mut validation_rows = Vec::with_capacity(n - take);
    for (index, observation) in series.observations().iter().enumerate() {
        if selected[index] {
            fit_rows.push(*observation);
        } else {
            validation_rows.push(*observation);
        }
    }

    Ok((
        DemandSeries::new(fit_rows),
        DemandSeries::new(validation_rows),
    ))
}
