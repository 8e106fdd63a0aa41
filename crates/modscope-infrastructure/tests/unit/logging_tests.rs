//! Logging Tests

use std::env;

use modscope_infrastructure::constants::{DEFAULT_LOG_LEVEL, LOG_FILTER_ENV};
use modscope_infrastructure::logging::{LoggingConfig, log_filter, parse_log_level};
use tracing::Level;

/// Helper to set env var safely
fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var safely
fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

fn config_with_level(level: &str) -> LoggingConfig {
    LoggingConfig {
        level: level.to_string(),
        ..LoggingConfig::default()
    }
}

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").expect("trace"), Level::TRACE);
    assert_eq!(parse_log_level("debug").expect("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").expect("info"), Level::INFO);
    assert_eq!(parse_log_level("warn").expect("warn"), Level::WARN);
    assert_eq!(parse_log_level("warning").expect("warning"), Level::WARN);
    assert_eq!(parse_log_level("error").expect("error"), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_filter_env_name() {
    assert_eq!(LOG_FILTER_ENV, "MODSCOPE_LOG");
}

#[test]
fn test_log_filter_rejects_invalid_level() {
    assert!(log_filter(&config_with_level("loud")).is_err());
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_log_filter_uses_configured_level_without_env() {
    remove_env(LOG_FILTER_ENV);

    let filter = log_filter(&config_with_level("DEBUG")).expect("valid level");
    assert_eq!(filter.to_string(), "debug");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_log_filter_reports_env_override() {
    set_env(LOG_FILTER_ENV, "modscope_application=trace");

    let filter = log_filter(&config_with_level("warn")).expect("valid level");
    assert_eq!(filter.to_string(), "modscope_application=trace");

    remove_env(LOG_FILTER_ENV);
}
