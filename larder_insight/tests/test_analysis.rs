use assert_approx_eq::assert_approx_eq;
use chrono::{TimeZone, Utc};
use larder_insight::{AnalysisConfig, Analyzer, ManualClock, Series};
use larder_math::anomaly::Severity;
use larder_math::descriptive::DescriptiveStats;
use larder_math::distribution::DistributionShape;
use larder_math::forecasting::ForecastMethod;
use larder_math::trend::TrendDirection;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

fn analyzer() -> Analyzer<ManualClock> {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
    Analyzer::with_clock(AnalysisConfig::default(), clock).unwrap()
}

fn series(values: &[f64]) -> Series {
    Series::new(values.to_vec()).unwrap()
}

fn random_series(rng: &mut StdRng) -> Vec<f64> {
    let len = rng.gen_range(1..120);
    (0..len).map(|_| rng.gen_range(-500.0..500.0)).collect()
}

#[test]
fn test_descriptive_invariants_on_random_series() {
    let analyzer = analyzer();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let values = random_series(&mut rng);
        let stats = analyzer.descriptive_stats(&series(&values));

        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);

        assert_approx_eq!(stats.standard_deviation, stats.variance.sqrt(), 1e-9);
        assert!(stats.variance >= 0.0);
        assert_approx_eq!(stats.range, max - min, 1e-9);
        assert!(stats.range >= 0.0);
        assert!(stats.interquartile_range >= 0.0);
    }
}

#[test]
fn test_constant_and_empty_series() {
    let analyzer = analyzer();

    let stats = analyzer.descriptive_stats(&series(&[4.0; 6]));
    assert_eq!(stats.variance, 0.0);
    assert_eq!(stats.standard_deviation, 0.0);
    assert_eq!(stats.skewness, 0.0);
    assert_eq!(stats.kurtosis, 0.0);

    let empty = analyzer.descriptive_stats(&series(&[]));
    assert_eq!(empty, DescriptiveStats::default());
}

#[rstest]
#[case(0.1)]
#[case(0.3)]
#[case(1.1)]
#[case(2.7)]
fn test_constant_decimal_series_report(#[case] value: f64) {
    let report = analyzer().full_analysis(&series(&[value; 40])).unwrap();

    assert_eq!(report.descriptive_stats.mean, value);
    assert_eq!(report.descriptive_stats.variance, 0.0);
    assert_eq!(report.descriptive_stats.skewness, 0.0);
    assert_eq!(report.descriptive_stats.kurtosis, 0.0);
    assert_eq!(report.trends.trend_direction, TrendDirection::Stable);
    assert!(!report.trends.seasonality.has_seasonality);
    assert!(!report.anomalies.detected);
    assert_eq!(report.distribution.shape, DistributionShape::Normal);
    assert_eq!(report.distribution.goodness_of_fit, 100.0);
}

#[rstest]
#[case(&[1.0, 2.0, 3.0, 4.0, 5.0], TrendDirection::Growth, 1.0)]
#[case(&[5.0, 4.0, 3.0, 2.0, 1.0], TrendDirection::Decline, -1.0)]
#[case(&[5.0, 5.0, 5.0, 5.0, 5.0], TrendDirection::Stable, 0.0)]
fn test_trend_direction(
    #[case] values: &[f64],
    #[case] direction: TrendDirection,
    #[case] correlation: f64,
) {
    let trend = analyzer().analyze_trend(&series(values));
    assert_eq!(trend.trend_direction, direction);
    assert_approx_eq!(trend.correlation, correlation, 1e-9);
    assert_approx_eq!(trend.trend_strength, correlation.abs() * 100.0, 1e-6);
}

#[test]
fn test_short_trend_is_stable() {
    let trend = analyzer().analyze_trend(&series(&[1.0, 100.0]));
    assert_eq!(trend.trend_direction, TrendDirection::Stable);
    assert_eq!(trend.trend_strength, 0.0);
    assert!(!trend.seasonality.has_seasonality);
}

#[test]
fn test_weekly_seasonality_detected() {
    let week = [10.0, 12.0, 11.0, 13.0, 20.0, 30.0, 25.0];
    let values: Vec<f64> = week.iter().cycle().take(7 * 8).cloned().collect();

    let trend = analyzer().analyze_trend(&series(&values));
    assert!(trend.seasonality.has_seasonality);
    assert_eq!(trend.seasonality.period, 7);
    assert_approx_eq!(trend.seasonality.amplitude, 20.0, 1e-9);
}

#[test]
fn test_forecast_constant_series() {
    let analyzer = analyzer();
    let forecast = analyzer
        .forecast_with(&series(&[10.0; 5]), 3, 0.3)
        .unwrap();

    assert_eq!(forecast.next_period.len(), 3);
    for value in &forecast.next_period {
        assert_approx_eq!(*value, 10.0);
    }
    assert_approx_eq!(forecast.confidence, 100.0);
    assert_eq!(forecast.accuracy, forecast.confidence);
    assert_eq!(forecast.method, ForecastMethod::ExponentialSmoothing);
}

#[test]
fn test_forecast_uses_configured_horizon() {
    let config = AnalysisConfig::default().with_forecast_horizon(14);
    let analyzer = Analyzer::new(config).unwrap();

    let forecast = analyzer.forecast(&series(&[3.0, 4.0, 5.0, 6.0])).unwrap();
    assert_eq!(forecast.next_period.len(), 14);

    let short = analyzer.forecast(&series(&[3.0, 4.0])).unwrap();
    assert!(short.next_period.is_empty());
    assert_eq!(short.method, ForecastMethod::InsufficientData);
}

#[test]
fn test_forecast_rejects_bad_alpha() {
    let result = analyzer().forecast_with(&series(&[1.0, 2.0, 3.0]), 3, 0.0);
    assert!(result.is_err());
}

#[test]
fn test_nine_points_never_flag_anomalies() {
    let mut values = vec![10.0; 8];
    values.push(10_000.0);

    let report = analyzer().detect_anomalies(&series(&values));
    assert!(!report.detected);
    assert!(report.points.is_empty());
}

#[test]
fn test_single_spike_in_ten_points() {
    // A lone spike among n points has |z| = sqrt(n - 1), here exactly 3
    let mut values = vec![10.0; 9];
    values.push(1000.0);

    let report = analyzer().detect_anomalies(&series(&values));
    assert!(report.detected);
    assert_eq!(report.points.len(), 1);

    let point = &report.points[0];
    assert_eq!(point.value, 1000.0);
    assert_approx_eq!(point.z_score, 3.0, 1e-9);
    assert_eq!(point.severity, Severity::Low);
    assert_eq!(point.date, "2024-03-14T12:00:00.000Z");
}

#[test]
fn test_anomaly_uses_supplied_labels() {
    let mut values = vec![10.0; 24];
    values.push(1000.0);
    let labels: Vec<String> = (1..=25).map(|d| format!("2024-01-{:02}", d)).collect();

    let report = analyzer().detect_anomalies(&Series::with_labels(values, labels).unwrap());
    assert_eq!(report.points.len(), 1);
    assert_eq!(report.points[0].date, "2024-01-25");
    assert_eq!(report.points[0].severity, Severity::High);
}

#[test]
fn test_constant_series_has_no_anomalies() {
    let report = analyzer().detect_anomalies(&series(&[7.0; 30]));
    assert!(!report.detected);
}

#[test]
fn test_histogram_counts_cover_series() {
    let analyzer = analyzer();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let len = rng.gen_range(5..300);
        let values: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..50.0)).collect();
        let distribution = analyzer.analyze_distribution(&series(&values));

        let total: usize = distribution.histogram.iter().map(|bin| bin.count).sum();
        assert_eq!(total, values.len());
        assert!(distribution.histogram.len() <= 10);
    }
}

#[test]
fn test_distribution_shapes() {
    let analyzer = analyzer();

    let skewed = analyzer.analyze_distribution(&series(&[
        1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 10.0,
    ]));
    assert_eq!(skewed.shape, DistributionShape::RightSkewed);
    assert!(skewed.goodness_of_fit >= 0.0);

    let short = analyzer.analyze_distribution(&series(&[1.0, 2.0, 3.0, 4.0]));
    assert_eq!(short.shape, DistributionShape::InsufficientData);
    assert!(short.parameters.is_none());
    assert!(short.histogram.is_empty());
}

#[test]
fn test_insufficient_distribution_has_empty_parameters() {
    let short = analyzer().analyze_distribution(&series(&[1.0, 2.0, 3.0]));
    let json = serde_json::to_value(&short).unwrap();

    assert_eq!(json["type"], "insufficient_data");
    assert_eq!(json["parameters"], serde_json::json!({}));

    let parsed: larder_math::distribution::DistributionResult =
        serde_json::from_value(json).unwrap();
    assert_eq!(parsed, short);

    let full = analyzer().analyze_distribution(&series(&[1.0, 2.0, 3.0, 4.0, 9.0]));
    let json = serde_json::to_value(&full).unwrap();
    assert!(json["parameters"]["skewness"].is_number());
}

#[test]
fn test_full_analysis_is_idempotent() {
    let analyzer = analyzer();
    let values = vec![
        12.0, 15.0, 11.0, 18.0, 20.0, 17.0, 25.0, 22.0, 19.0, 28.0, 30.0, 26.0, 90.0,
    ];
    let input = series(&values);

    let first = analyzer.full_analysis(&input).unwrap();
    let second = analyzer.full_analysis(&input).unwrap();

    assert_eq!(first, second);
    assert_eq!(input.values(), values.as_slice());
}

#[test]
fn test_report_json_shape() {
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let report = analyzer().full_analysis(&series(&values)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

    assert!(json["descriptiveStats"]["interquartileRange"].is_number());
    assert_eq!(json["trends"]["trendDirection"], "growth");
    assert_eq!(json["trends"]["seasonality"]["hasSeasonality"], false);
    assert_eq!(json["forecasting"]["method"], "exponential_smoothing");
    assert_eq!(json["forecasting"]["nextPeriod"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["anomalies"]["detected"], false);
    assert!(json["anomalies"]["points"].is_array());
    assert!(json["distribution"]["goodnessOfFit"].is_number());
    assert!(json["distribution"]["type"].is_string());
}

#[test]
fn test_anomaly_point_serializes_zscore() {
    let mut values = vec![10.0; 24];
    values.push(1000.0);
    let report = analyzer().detect_anomalies(&series(&values));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("anomalies").is_none());
    let point = &json["points"][0];
    assert_eq!(point["severity"], "high");
    assert!(point["zscore"].as_f64().unwrap() > 4.0);
}
