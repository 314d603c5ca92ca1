use std::fs;

use pandrs_trend::config::{ExpandingTrendConfig, ExpandingTrendConfigBuilder};
use pandrs_trend::features::{ExpandingTrend, TimeUnit};
use pandrs_trend::Error;

#[test]
fn test_toml_config() {
    let config = ExpandingTrendConfig::from_toml_str(
        r#"
gap = 0
min_periods = 3
time_unit = "minutes"
"#,
    )
    .unwrap();

    assert_eq!(config.gap, 0);
    assert_eq!(config.min_periods, 3);
    assert_eq!(config.time_unit, TimeUnit::Minutes);
}

#[test]
fn test_yaml_config_uses_defaults_for_missing_fields() {
    let config = ExpandingTrendConfig::from_yaml_str("min_periods: 2\n").unwrap();

    assert_eq!(config.gap, 1);
    assert_eq!(config.min_periods, 2);
    assert_eq!(config.time_unit, TimeUnit::Auto);
}

#[test]
fn test_json_rejects_non_positive_min_periods() {
    for doc in [r#"{"min_periods": 0}"#, r#"{"min_periods": -2}"#] {
        match ExpandingTrendConfig::from_json_str(doc) {
            Err(Error::Config(msg)) => assert!(msg.contains("min_periods")),
            other => panic!("unexpected result for {}: {:?}", doc, other),
        }
    }
}

#[test]
fn test_unknown_time_unit_rejected() {
    assert!(ExpandingTrendConfig::from_toml_str(r#"time_unit = "fortnights""#).is_err());
}

#[test]
fn test_config_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("trend.toml");
    let config = ExpandingTrendConfigBuilder::new()
        .gap(2)
        .min_periods(4)
        .time_unit(TimeUnit::Hours)
        .build()
        .unwrap();
    fs::write(&toml_path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(ExpandingTrendConfig::from_file(&toml_path).unwrap(), config);

    let yaml_path = dir.path().join("trend.yml");
    fs::write(&yaml_path, "gap: 0\ntime_unit: days\n").unwrap();
    let loaded = ExpandingTrendConfig::from_file(&yaml_path).unwrap();
    assert_eq!(loaded.gap, 0);
    assert_eq!(loaded.time_unit, TimeUnit::Days);

    let json_path = dir.path().join("trend.json");
    fs::write(&json_path, r#"{"gap": 3}"#).unwrap();
    assert_eq!(ExpandingTrendConfig::from_file(&json_path).unwrap().gap, 3);

    let ini_path = dir.path().join("trend.ini");
    fs::write(&ini_path, "gap=1").unwrap();
    assert!(matches!(
        ExpandingTrendConfig::from_file(&ini_path),
        Err(Error::Config(_))
    ));

    assert!(matches!(
        ExpandingTrendConfig::from_file(dir.path().join("missing.toml")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_feature_from_config() {
    let config = ExpandingTrendConfig::from_toml_str("gap = 0\nmin_periods = 2").unwrap();
    let trend = ExpandingTrend::from_config(config).unwrap();

    assert_eq!(trend.gap(), 0);
    assert_eq!(trend.min_periods(), 2);
    assert_eq!(trend.config(), &config);
}
