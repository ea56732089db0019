use chrono::Duration;
use demand_forecast::models::additive::AdditiveModel;
use demand_forecast::models::{FittedModel, ForecastModel};
use demand_forecast::utils::synthetic_hourly_series;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample data
    println!("Creating sample data...");
    let series = synthetic_hourly_series(28 * 24, 42);
    println!("Sample data created: {} hourly observations\n", series.len());
    println!("{}\n", series.summary()?);

    // Fit the additive model
    println!("Fitting model...");
    let model = AdditiveModel::new();
    let fitted = model.fit(&series)?;
    println!("Fitted: {}\n", fitted.name());

    // Forecast the day after the series ends
    let last = series.end().expect("series is non-empty");
    let horizon: Vec<_> = (1..=24).map(|hours| last + Duration::hours(hours)).collect();
    let estimates = fitted.predict(&horizon)?;

    println!("Next 24 hours:");
    for (timestamp, estimate) in horizon.iter().zip(&estimates) {
        println!(
            "  {}  {:>8.2}",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            estimate
        );
    }

    println!("\nForecasting complete!");

    Ok(())
}
