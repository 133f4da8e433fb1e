//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use std::str::FromStr;

use umlforge::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_environment_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "UMLFORGE_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "UMLFORGE_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest fail gracefully
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_generation_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let input = r#"{"nodes": [{"id": 0, "name": "A", "attributes": "+x:Date"}], "edges": []}"#;
    let artifacts = umlforge::generate(input).unwrap();
    // Diagnostics are still collected when they are also logged
    assert_eq!(artifacts.diagnostics.len(), 1);
}
