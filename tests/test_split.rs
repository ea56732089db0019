use chrono::{Duration, NaiveDate, NaiveDateTime};
use demand_forecast::data::DemandSeries;
use demand_forecast::split::{
    train_validation_split, DEFAULT_SPLIT_SEED, DEFAULT_TRAIN_FRACTION,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;

fn hourly_series(n: usize) -> DemandSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps: Vec<NaiveDateTime> = (0..n)
        .map(|hour| start + Duration::hours(hour as i64))
        .collect();
    let demands: Vec<i64> = (0..n).map(|hour| 100 + hour as i64).collect();

    DemandSeries::from_parts(timestamps, demands).unwrap()
}

#[test]
fn test_split_sizes_with_default_fraction() {
    let series = hourly_series(100);

    let (fit, validation) =
        train_validation_split(&series, DEFAULT_TRAIN_FRACTION, DEFAULT_SPLIT_SEED).unwrap();

    assert_eq!(fit.len(), 80);
    assert_eq!(validation.len(), 20);
    assert_eq!(fit.len() + validation.len(), series.len());
}

#[test]
fn test_split_rounds_fit_size_to_nearest_row() {
    let series = hourly_series(3);

    let (fit, validation) = train_validation_split(&series, 0.5, 10).unwrap();

    // round(3 * 0.5) = 2
    assert_eq!(fit.len(), 2);
    assert_eq!(validation.len(), 1);
}

#[test]
fn test_split_is_disjoint_and_complete() {
    let series = hourly_series(50);

    let (fit, validation) = train_validation_split(&series, 0.8, 10).unwrap();

    let fit_set: HashSet<NaiveDateTime> = fit.timestamps().into_iter().collect();
    let validation_set: HashSet<NaiveDateTime> = validation.timestamps().into_iter().collect();
    let all_set: HashSet<NaiveDateTime> = series.timestamps().into_iter().collect();

    assert!(fit_set.is_disjoint(&validation_set));

    let mut union = fit_set;
    union.extend(validation_set);
    assert_eq!(union, all_set);
}

#[test]
fn test_same_seed_reproduces_split() {
    let series = hourly_series(100);

    let (first_fit, first_validation) = train_validation_split(&series, 0.8, 10).unwrap();
    let (second_fit, second_validation) = train_validation_split(&series, 0.8, 10).unwrap();

    assert_eq!(first_fit.timestamps(), second_fit.timestamps());
    assert_eq!(first_validation.timestamps(), second_validation.timestamps());
}

#[test]
fn test_different_seeds_select_different_rows() {
    let series = hourly_series(100);

    let (fit_a, _) = train_validation_split(&series, 0.8, 10).unwrap();
    let (fit_b, _) = train_validation_split(&series, 0.8, 11).unwrap();

    assert_ne!(fit_a.timestamps(), fit_b.timestamps());
}

#[test]
fn test_split_preserves_series_order() {
    let series = hourly_series(60);

    let (fit, validation) = train_validation_split(&series, 0.7, 3).unwrap();

    let sorted = |timestamps: Vec<NaiveDateTime>| {
        timestamps.windows(2).all(|pair| pair[0] < pair[1])
    };
    assert!(sorted(fit.timestamps()));
    assert!(sorted(validation.timestamps()));
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(-0.2)]
#[case(1.5)]
#[case(f64::NAN)]
fn test_split_rejects_out_of_range_fraction(#[case] fraction: f64) {
    let series = hourly_series(10);

    let result = train_validation_split(&series, fraction, 10);

    assert!(result.is_err());
}

#[test]
fn test_default_constants_match_documented_split() {
    assert_eq!(DEFAULT_TRAIN_FRACTION, 0.8);
    assert_eq!(DEFAULT_SPLIT_SEED, 10);
}
