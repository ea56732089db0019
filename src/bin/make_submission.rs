use demand_forecast::models::additive::AdditiveModel;
use demand_forecast::models::ForecastModel;
use demand_forecast::pipeline::{self, PipelineConfig};
use std::env;

const COMPARISON_PATH: &str = "validation_comparison.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let train_path = args.get(1).map(String::as_str).unwrap_or("train.csv");
    let test_path = args.get(2).map(String::as_str).unwrap_or("test.csv");
    let output_path = args.get(3).map(String::as_str).unwrap_or("submission.csv");

    println!("Hourly Demand Forecast");
    println!("======================");
    println!("Train file:      {}", train_path);
    println!("Test file:       {}", test_path);
    println!("Submission file: {}", output_path);

    let model = AdditiveModel::new();
    println!("Model:           {}", model.name());

    let config = PipelineConfig::new(train_path, test_path, output_path)
        .with_comparison_path(COMPARISON_PATH);

    let outcome = pipeline::run(&config, &model)?;

    println!("\n{}", outcome.train_summary);
    println!(
        "\nSplit: {} rows to fit, {} rows held out (fraction {:.2}, seed {})",
        outcome.fit_rows,
        outcome.validation_rows,
        config.train_fraction(),
        config.seed()
    );
    println!("\n{}", outcome.report);

    println!(
        "\nExported validation comparison to {} for visualization.",
        COMPARISON_PATH
    );
    println!(
        "Wrote {} predictions for {} test rows to {}.",
        outcome.submission_rows, outcome.test_rows, output_path
    );

    Ok(())
}
