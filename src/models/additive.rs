//! Additive decomposition model: linear trend plus Fourier seasonality
//!
//! Demand is modeled as `trend(t) + seasonality(t)`. The trend is a straight
//! line in time scaled to the training span; seasonality is a sum of Fourier
//! terms per enabled period (daily, weekly, optionally yearly). All
//! coefficients are estimated in one ridge-regularized least-squares solve,
//! so fitting is deterministic and prediction works at any timestamp,
//! including ones far outside the training range.

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, ForecastModel};
use chrono::NaiveDateTime;
use std::f64::consts::PI;

const SECONDS_PER_DAY: f64 = 86_400.0;
const RIDGE_LAMBDA: f64 = 1e-8;
const MIN_OBSERVATIONS: usize = 2;
/// A seasonal block is only estimated when the training span covers at
/// least this many of its periods; shorter spans cannot tell the block
/// apart from the trend.
const MIN_PERIODS_FOR_SEASONALITY: f64 = 2.0;

const DAILY_PERIOD_DAYS: f64 = 1.0;
const WEEKLY_PERIOD_DAYS: f64 = 7.0;
const YEARLY_PERIOD_DAYS: f64 = 365.25;

/// Default Fourier order for the daily cycle
pub const DEFAULT_DAILY_ORDER: usize = 4;
/// Default Fourier order for the weekly cycle
pub const DEFAULT_WEEKLY_ORDER: usize = 3;
/// Default Fourier order for the yearly cycle, when enabled
pub const DEFAULT_YEARLY_ORDER: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SeasonalBlock {
    period_days: f64,
    order: usize,
}

/// Additive trend plus seasonality forecast model.
///
/// Hourly demand data gets daily and weekly seasonality by default; the
/// yearly cycle is off unless enabled. An order of 0 disables a cycle.
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    daily_order: usize,
    weekly_order: usize,
    yearly_order: usize,
    name: String,
}

impl AdditiveModel {
    /// Create a model with daily and weekly seasonality enabled
    pub fn new() -> Self {
        let mut model = Self {
            daily_order: DEFAULT_DAILY_ORDER,
            weekly_order: DEFAULT_WEEKLY_ORDER,
            yearly_order: 0,
            name: String::new(),
        };
        model.rebuild_name();
        model
    }

    /// Set the daily Fourier order; 0 disables the daily cycle
    pub fn with_daily_seasonality(mut self, order: usize) -> Self {
        self.daily_order = order;
        self.rebuild_name();
        self
    }

    /// Set the weekly Fourier order; 0 disables the weekly cycle
    pub fn with_weekly_seasonality(mut self, order: usize) -> Self {
        self.weekly_order = order;
        self.rebuild_name();
        self
    }

    /// Set the yearly Fourier order; 0 disables the yearly cycle
    pub fn with_yearly_seasonality(mut self, order: usize) -> Self {
        self.yearly_order = order;
        self.rebuild_name();
        self
    }

    fn rebuild_name(&mut self) {
        self.name = format!(
            "Additive (daily={}, weekly={}, yearly={})",
            order_label(self.daily_order),
            order_label(self.weekly_order),
            order_label(self.yearly_order)
        );
    }

    fn candidate_blocks(&self) -> Vec<SeasonalBlock> {
        [
            (DAILY_PERIOD_DAYS, self.daily_order),
            (WEEKLY_PERIOD_DAYS, self.weekly_order),
            (YEARLY_PERIOD_DAYS, self.yearly_order),
        ]
        .into_iter()
        .filter(|(_, order)| *order > 0)
        .map(|(period_days, order)| SeasonalBlock { period_days, order })
        .collect()
    }
}

impl Default for AdditiveModel {
    fn default() -> Self {
        Self::new()
    }
}

fn order_label(order: usize) -> String {
    if order == 0 {
        "off".to_string()
    } else {
        order.to_string()
    }
}

impl ForecastModel for AdditiveModel {
    type Fitted = FittedAdditiveModel;

    fn fit(&self, series: &DemandSeries) -> Result<FittedAdditiveModel> {
        let mut observations: Vec<(NaiveDateTime, f64)> = series
            .observations()
            .iter()
            .map(|obs| (obs.timestamp, obs.demand as f64))
            .collect();
        observations.sort_by_key(|(timestamp, _)| *timestamp);

        if observations.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::ForecastingError(format!(
                "At least {} observations are required to fit, got {}",
                MIN_OBSERVATIONS,
                observations.len()
            )));
        }
        if let Some(window) = observations
            .windows(2)
            .find(|window| window[0].0 == window[1].0)
        {
            return Err(ForecastError::ForecastingError(format!(
                "Duplicate timestamp in training data: {}",
                window[0].0
            )));
        }

        let origin = observations[0].0;
        let last = observations[observations.len() - 1].0;
        // Sub-second deltas truncate to a zero span, which cannot scale time
        let span_seconds = (last - origin).num_seconds() as f64;
        if span_seconds <= 0.0 {
            return Err(ForecastError::ForecastingError(format!(
                "Training span from {} to {} is shorter than one second",
                origin, last
            )));
        }
        let span_days = span_seconds / SECONDS_PER_DAY;

        let blocks: Vec<SeasonalBlock> = self
            .candidate_blocks()
            .into_iter()
            .filter(|block| span_days >= MIN_PERIODS_FOR_SEASONALITY * block.period_days)
            .collect();

        let rows: Vec<Vec<f64>> = observations
            .iter()
            .map(|(timestamp, _)| feature_row(*timestamp, origin, span_seconds, &blocks))
            .collect();
        let targets: Vec<f64> = observations.iter().map(|(_, demand)| *demand).collect();

        let coefficients = ridge_solve(&rows, &targets, RIDGE_LAMBDA)?;

        Ok(FittedAdditiveModel {
            origin,
            span_seconds,
            blocks,
            coefficients,
            name: self.name.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fitted additive model holding the estimated coefficients
#[derive(Debug, Clone)]
pub struct FittedAdditiveModel {
    origin: NaiveDateTime,
    span_seconds: f64,
    blocks: Vec<SeasonalBlock>,
    /// Intercept, slope, then sin/cos pairs per block in block order
    coefficients: Vec<f64>,
    name: String,
}

impl FittedModel for FittedAdditiveModel {
    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<Vec<f64>> {
        let estimates = timestamps
            .iter()
            .map(|timestamp| {
                let row = feature_row(*timestamp, self.origin, self.span_seconds, &self.blocks);
                row.iter()
                    .zip(&self.coefficients)
                    .map(|(feature, coefficient)| feature * coefficient)
                    .sum()
            })
            .collect();

        Ok(estimates)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build the regression features for one timestamp: intercept, scaled time,
/// then sin/cos Fourier terms for each enabled block.
fn feature_row(
    timestamp: NaiveDateTime,
    origin: NaiveDateTime,
    span_seconds: f64,
    blocks: &[SeasonalBlock],
) -> Vec<f64> {
    let offset_seconds = (timestamp - origin).num_seconds() as f64;
    let t = offset_seconds / span_seconds;
    let t_days = offset_seconds / SECONDS_PER_DAY;

    let width = 2 + blocks.iter().map(|block| 2 * block.order).sum::<usize>();
    let mut row = Vec::with_capacity(width);
    row.push(1.0);
    row.push(t);
    for block in blocks {
        for k in 1..=block.order {
            let angle = 2.0 * PI * k as f64 * t_days / block.period_days;
            row.push(angle.sin());
            row.push(angle.cos());
        }
    }

    row
}

/// Solve the ridge-regularized normal equations `(X'X + lambda I) b = X'y`
fn ridge_solve(rows: &[Vec<f64>], targets: &[f64], lambda: f64) -> Result<Vec<f64>> {
    let width = match rows.first() {
        Some(row) => row.len(),
        None => {
            return Err(ForecastError::MathError(
                "Empty design matrix in least squares solve".to_string(),
            ))
        }
    };

    let mut xtx = vec![vec![0.0; width]; width];
    let mut xty = vec![0.0; width];
    for (row, target) in rows.iter().zip(targets) {
        for i in 0..width {
            for j in 0..width {
                xtx[i][j] += row[i] * row[j];
            }
            xty[i] += row[i] * target;
        }
    }
    for (i, diag_row) in xtx.iter_mut().enumerate() {
        diag_row[i] += lambda;
    }

    solve_linear_system(xtx, xty)
}

/// Gaussian elimination with partial pivoting
fn solve_linear_system(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        let mut pivot = col;
        for row in (col + 1)..n {
            if matrix[row][col].abs() > matrix[pivot][col].abs() {
                pivot = row;
            }
        }
        if matrix[pivot][col].abs() < 1e-12 {
            return Err(ForecastError::MathError(
                "Singular design matrix in least squares solve".to_string(),
            ));
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = rhs[row];
        for k in (row + 1)..n {
            sum -= matrix[row][k] * solution[k];
        }
        solution[row] = sum / matrix[row][row];
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_well_conditioned_system() {
        // 2x + y = 5, x + 3y = 10 has the solution x = 1, y = 3
        let matrix = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let rhs = vec![5.0, 10.0];

        let solution = solve_linear_system(matrix, rhs).unwrap();

        assert_relative_eq!(solution[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(solution[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn rejects_singular_system() {
        let matrix = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let rhs = vec![3.0, 6.0];

        assert!(solve_linear_system(matrix, rhs).is_err());
    }

    #[test]
    fn ridge_recovers_exact_line() {
        // y = 2 + 3x sampled at four points
        let rows: Vec<Vec<f64>> = [0.0, 1.0, 2.0, 3.0]
            .iter()
            .map(|x| vec![1.0, *x])
            .collect();
        let targets = vec![2.0, 5.0, 8.0, 11.0];

        let coefficients = ridge_solve(&rows, &targets, RIDGE_LAMBDA).unwrap();

        assert_relative_eq!(coefficients[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(coefficients[1], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn feature_row_layout_matches_block_orders() {
        let origin = chrono::NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let blocks = [
            SeasonalBlock {
                period_days: 1.0,
                order: 4,
            },
            SeasonalBlock {
                period_days: 7.0,
                order: 3,
            },
        ];

        let row = feature_row(origin, origin, 3600.0, &blocks);

        // intercept + slope + 2 terms per Fourier order
        assert_eq!(row.len(), 2 + 2 * 4 + 2 * 3);
        assert_relative_eq!(row[0], 1.0);
        assert_relative_eq!(row[1], 0.0);
        // sin(0) = 0 and cos(0) = 1 for every term at the origin
        assert_relative_eq!(row[2], 0.0);
        assert_relative_eq!(row[3], 1.0);
    }

    #[test]
    fn seasonal_blocks_require_two_periods_of_data() {
        let model = AdditiveModel::new();
        let blocks = model.candidate_blocks();

        assert_eq!(blocks.len(), 2);
        // Three days of data can carry the daily cycle but not the weekly one
        let span_days = 3.0;
        let enabled: Vec<_> = blocks
            .into_iter()
            .filter(|block| span_days >= MIN_PERIODS_FOR_SEASONALITY * block.period_days)
            .collect();
        assert_eq!(enabled.len(), 1);
        assert_relative_eq!(enabled[0].period_days, DAILY_PERIOD_DAYS);
    }
}
