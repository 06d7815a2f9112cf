use larder_insight::error::InsightError;
use larder_insight::AnalysisConfig;
use larder_math::anomaly::AnomalyThresholds;
use larder_math::descriptive::QuartileMethod;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = AnalysisConfig::default();

    assert_eq!(config.forecast_horizon, 7);
    assert_eq!(config.smoothing_alpha, 0.3);
    assert_eq!(config.stable_slope_threshold, 0.1);
    assert_eq!(config.seasonality_periods, vec![7, 12, 24, 30]);
    assert_eq!(config.seasonality_threshold, 0.3);
    assert_eq!(config.anomaly_thresholds(), AnomalyThresholds::default());
    assert_eq!(config.max_histogram_bins, 10);
    assert_eq!(config.quartile_method, QuartileMethod::NearestRank);
    assert_eq!(config.cache_ttl_seconds, 1800);
    assert_eq!(config.cache_ttl(), chrono::Duration::minutes(30));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = AnalysisConfig::from_json_str(
        r#"{ "forecastHorizon": 14, "quartileMethod": "linear", "seasonalityPeriods": [7] }"#,
    )
    .unwrap();

    assert_eq!(config.forecast_horizon, 14);
    assert_eq!(config.quartile_method, QuartileMethod::Linear);
    assert_eq!(config.seasonality_periods, vec![7]);
    assert_eq!(config.smoothing_alpha, 0.3);
    assert_eq!(config.high_severity, 4.0);
}

#[rstest]
#[case(r#"{ "smoothingAlpha": 0.0 }"#)]
#[case(r#"{ "smoothingAlpha": 1.2 }"#)]
#[case(r#"{ "stableSlopeThreshold": -1.0 }"#)]
#[case(r#"{ "seasonalityPeriods": [7, 1] }"#)]
#[case(r#"{ "seasonalityThreshold": 1.5 }"#)]
#[case(r#"{ "maxHistogramBins": 0 }"#)]
fn test_rejects_out_of_range(#[case] json: &str) {
    assert!(matches!(
        AnalysisConfig::from_json_str(json),
        Err(InsightError::InvalidParameter(_))
    ));
}

#[test]
fn test_rejects_unordered_thresholds() {
    let err = AnalysisConfig::from_json_str(r#"{ "anomalyThreshold": 3.5 }"#).unwrap_err();
    assert!(matches!(err, InsightError::MathError(_)));
}

#[test]
fn test_rejects_malformed_json() {
    let err = AnalysisConfig::from_json_str(r#"{ "forecastHorizon": "seven" }"#).unwrap_err();
    assert!(matches!(err, InsightError::JsonError(_)));
}

#[test]
fn test_file_round_trip() {
    let config = AnalysisConfig::default()
        .with_smoothing_alpha(0.5)
        .with_anomaly_thresholds(AnomalyThresholds::new(2.0, 2.5, 3.5).unwrap())
        .with_max_histogram_bins(20)
        .with_cache_ttl_seconds(60);

    let file = NamedTempFile::new().unwrap();
    config.to_file(file.path()).unwrap();

    let loaded = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_from_handwritten_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "stableSlopeThreshold": 0.5, "cacheTtlSeconds": 5 }}"#).unwrap();

    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(config.stable_slope_threshold, 0.5);
    assert_eq!(config.trend_params().stable_slope, 0.5);
    assert_eq!(config.cache_ttl(), chrono::Duration::seconds(5));
}

#[test]
fn test_params_follow_config() {
    let config = AnalysisConfig::default()
        .with_seasonality_periods(vec![4, 8])
        .with_seasonality_threshold(0.5)
        .with_stable_slope_threshold(0.2);

    let params = config.trend_params();
    assert_eq!(params.stable_slope, 0.2);
    assert_eq!(params.seasonality.candidate_periods, vec![4, 8]);
    assert_eq!(params.seasonality.threshold, 0.5);
}
