use approx::assert_relative_eq;
use chrono::NaiveDate;
use demand_forecast::data::{DataLoader, DemandSeries, RawRow};
use std::io::Write;
use tempfile::NamedTempFile;

fn timestamp(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn test_data_loader_from_csv() {
    // Create a temporary training CSV file
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,hour,demand").unwrap();
    writeln!(file, "2023-01-01,0,120").unwrap();
    writeln!(file, "2023-01-01,1,95").unwrap();
    writeln!(file, "2023-01-02,0,130").unwrap();
    file.flush().unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert!(data.has_complete_demand());
    assert_eq!(
        data.rows()[0],
        RawRow {
            date: "2023-01-01".to_string(),
            hour: 0,
            demand: Some(120),
        }
    );
    assert_eq!(data.rows()[2].date, "2023-01-02");
}

#[test]
fn test_data_loader_reads_file_without_demand_column() {
    // Test files carry only the date and hour columns
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,hour").unwrap();
    writeln!(file, "2023-02-01,0").unwrap();
    writeln!(file, "2023-02-01,1").unwrap();
    file.flush().unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 2);
    assert!(!data.has_complete_demand());
    assert_eq!(data.rows()[0].demand, None);
    assert_eq!(data.rows()[1].hour, 1);
}

#[test]
fn test_data_loader_ignores_extra_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,hour,demand,store_id").unwrap();
    writeln!(file, "2023-01-01,6,42,7").unwrap();
    file.flush().unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data.rows()[0].demand, Some(42));
}

#[test]
fn test_data_loader_rejects_missing_required_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,demand").unwrap();
    writeln!(file, "2023-01-01,120").unwrap();
    file.flush().unwrap();

    let error = DataLoader::from_csv(file.path()).unwrap_err();
    assert!(error.to_string().contains("hour"));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "hour,demand").unwrap();
    writeln!(file, "0,120").unwrap();
    file.flush().unwrap();

    let error = DataLoader::from_csv(file.path()).unwrap_err();
    assert!(error.to_string().contains("date"));
}

#[test]
fn test_data_loader_error_handling() {
    // Non-existent file
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(result.is_err());

    // Hour column that is not a number
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,hour,demand").unwrap();
    writeln!(file, "2023-01-01,noon,120").unwrap();
    file.flush().unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn test_demand_series_statistics() {
    let timestamps = vec![timestamp(1, 0), timestamp(1, 1), timestamp(1, 2)];
    let series = DemandSeries::from_parts(timestamps, vec![100, 110, 120]).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.values(), vec![100, 110, 120]);
    assert_eq!(series.start(), Some(timestamp(1, 0)));
    assert_eq!(series.end(), Some(timestamp(1, 2)));

    assert_relative_eq!(series.mean().unwrap(), 110.0, epsilon = 1e-10);
    assert_relative_eq!(series.std_dev().unwrap(), 10.0, epsilon = 1e-10);

    let summary = series.summary().unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.min, 100);
    assert_eq!(summary.max, 120);
    assert!(summary.to_string().contains("Observations: 3"));
}

#[test]
fn test_demand_series_rejects_mismatched_parts() {
    let timestamps = vec![timestamp(1, 0), timestamp(1, 1)];
    let result = DemandSeries::from_parts(timestamps, vec![100]);

    assert!(result.is_err());
}

#[test]
fn test_empty_series_has_no_statistics() {
    let series = DemandSeries::new(Vec::new());

    assert!(series.is_empty());
    assert!(series.mean().is_err());
    assert!(series.summary().is_err());
}
