//! Forecasting models for hourly demand series

use crate::data::DemandSeries;
use crate::error::Result;
use chrono::NaiveDateTime;
use std::fmt::Debug;

/// Fitted forecast model, ready to answer point-estimate queries
pub trait FittedModel: Debug {
    /// Predict one demand estimate per query timestamp, in query order.
    ///
    /// Timestamps outside the training range are allowed (extrapolation).
    /// Estimates are continuous and may be negative; discretization and
    /// clamping are the caller's concern. Prediction is a pure function of
    /// the fitted state, so repeated calls with the same input return
    /// identical output.
    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fit on a demand series
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedModel;

    /// Fit the model on a demand series.
    ///
    /// Input order does not matter. Implementations may reject series that
    /// are too small for their parameters or that contain duplicate
    /// timestamps. There is no incremental update; any change to the
    /// training data requires a new fit.
    fn fit(&self, series: &DemandSeries) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod additive;
pub mod baseline;
