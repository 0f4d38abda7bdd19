use std::io::Write;
use std::time::Duration;

use africasuite_reports::config::ReportsConfig;
use africasuite_reports::error::ReportError;

#[test]
fn defaults_match_hotel_pipeline() {
    let config = ReportsConfig::default();
    assert_eq!(config.currency, "XOF");
    assert_eq!(config.cache_ttl(), Duration::from_secs(86_400));
    assert_eq!(config.sweep_interval(), Duration::from_secs(3_600));
    assert_eq!(config.cache_max_entries, Some(256));
    assert!(config.cache_enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "organization": "Hôtel Teranga", "cache_ttl_secs": 600, "workers": 4 }}"#
    )
    .unwrap();

    let config = ReportsConfig::load(file.path()).unwrap();
    assert_eq!(config.organization, "Hôtel Teranga");
    assert_eq!(config.cache_ttl(), Duration::from_secs(600));
    assert_eq!(config.workers, 4);
    assert_eq!(config.currency, "XOF");
}

#[test]
fn zero_ttl_is_rejected() {
    let config = ReportsConfig {
        cache_ttl_secs: 0,
        ..ReportsConfig::default()
    };
    assert!(matches!(config.validate(), Err(ReportError::Config(_))));
}

#[test]
fn malformed_file_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(
        ReportsConfig::load(file.path()),
        Err(ReportError::Config(_))
    ));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ReportsConfig::load(&dir.path().join("absent.json")),
        Err(ReportError::Config(_))
    ));
}
