//! # Demand Forecast
//!
//! A Rust library for hourly retail demand forecasting: from raw `date,hour,
//! demand` CSV files to a scored additive model and a submission file.
//!
//! ## Features
//!
//! - Typed CSV loading of hourly demand data (`date`, `hour`, `demand`)
//! - Pure timestamp reconstruction from the date and hour-offset columns
//! - Seeded, reproducible train/validation splitting
//! - Forecasting models behind a `fit`/`predict` trait seam (additive trend
//!   plus Fourier seasonality, hour-of-week baseline)
//! - Validation scoring (RMSE, MAE, MSE, exact-match accuracy) with an
//!   actual-vs-predicted export for charting
//! - Submission CSV generation with an explicit rounding policy
//!
//! ## Quick Start
//!
//! ```
//! use demand_forecast::models::additive::AdditiveModel;
//! use demand_forecast::models::{FittedModel, ForecastModel};
//! use demand_forecast::utils::synthetic_hourly_series;
//!
//! # fn main() -> demand_forecast::Result<()> {
//! // Three weeks of synthetic hourly demand
//! let series = synthetic_hourly_series(21 * 24, 7);
//!
//! let model = AdditiveModel::new();
//! let fitted = model.fit(&series)?;
//!
//! // Predict one hour past the end of the series
//! let next_hour = series.end().unwrap() + chrono::Duration::hours(1);
//! let estimates = fitted.predict(&[next_hour])?;
//! assert_eq!(estimates.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Full pipeline
//!
//! ```no_run
//! use demand_forecast::models::additive::AdditiveModel;
//! use demand_forecast::pipeline::{self, PipelineConfig};
//!
//! # fn main() -> demand_forecast::Result<()> {
//! let config = PipelineConfig::new("train.csv", "test.csv", "submission.csv")
//!     .with_comparison_path("validation_comparison.csv");
//!
//! let outcome = pipeline::run(&config, &AdditiveModel::new())?;
//! println!("{}", outcome.report);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod prep;
pub mod split;
pub mod submission;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, DemandSeries, Observation, RawDataset, RawRow, SeriesSummary};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{evaluate, EvaluationReport};
pub use crate::models::additive::AdditiveModel;
pub use crate::models::baseline::HourOfWeekAverage;
pub use crate::models::{FittedModel, ForecastModel};
pub use crate::pipeline::{PipelineConfig, PipelineOutcome};
pub use crate::split::train_validation_split;
pub use crate::submission::{RoundingPolicy, SubmissionWriter};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
