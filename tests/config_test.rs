// ABOUTME: Integration tests for environment-driven service and logging configuration
// ABOUTME: Runs serially because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use cardio_core::HealthError;
use cardio_metrics::config::{ConfigError, ServiceConfig};
use cardio_metrics::logging::{LogFormat, LoggingConfig};
use cardio_metrics::TimeRange;
use chrono::FixedOffset;
use serial_test::serial;
use std::env;
use std::time::Duration;

const SERVICE_VARS: [&str; 3] = [
    "CARDIO_CALENDAR_OFFSET",
    "CARDIO_QUERY_TIMEOUT_MS",
    "CARDIO_DEFAULT_RANGE",
];

fn clear_service_vars() {
    for key in SERVICE_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_nothing_is_set() {
    clear_service_vars();

    let config = ServiceConfig::from_env().unwrap();

    assert_eq!(config.calendar_offset, FixedOffset::east_opt(0).unwrap());
    assert_eq!(config.query_timeout, Duration::from_millis(10_000));
    assert_eq!(config.default_range, TimeRange::Daily);
}

#[test]
#[serial]
fn test_all_variables_are_read() {
    clear_service_vars();
    env::set_var("CARDIO_CALENDAR_OFFSET", "-05:00");
    env::set_var("CARDIO_QUERY_TIMEOUT_MS", "2500");
    env::set_var("CARDIO_DEFAULT_RANGE", "Monthly");

    let config = ServiceConfig::from_env().unwrap();
    clear_service_vars();

    assert_eq!(config.calendar_offset, FixedOffset::west_opt(5 * 3600).unwrap());
    assert_eq!(config.query_timeout, Duration::from_millis(2500));
    assert_eq!(config.default_range, TimeRange::Monthly);
}

#[test]
#[serial]
fn test_malformed_offset_is_rejected() {
    clear_service_vars();
    env::set_var("CARDIO_CALENDAR_OFFSET", "tomorrow");

    let error = ServiceConfig::from_env().unwrap_err();
    clear_service_vars();

    assert_eq!(
        error,
        ConfigError::InvalidOffset {
            variable: "CARDIO_CALENDAR_OFFSET",
            value: "tomorrow".to_owned(),
        }
    );
    assert!(matches!(HealthError::from(error), HealthError::Config(_)));
}

#[test]
#[serial]
fn test_unknown_range_is_rejected() {
    clear_service_vars();
    env::set_var("CARDIO_DEFAULT_RANGE", "fortnightly");

    let error = ServiceConfig::from_env().unwrap_err();
    clear_service_vars();

    assert!(matches!(error, ConfigError::InvalidRange { .. }));
    assert!(error.to_string().contains("fortnightly"));
}

#[test]
#[serial]
fn test_non_numeric_timeout_is_rejected() {
    clear_service_vars();
    env::set_var("CARDIO_QUERY_TIMEOUT_MS", "soon");

    let error = ServiceConfig::from_env().unwrap_err();
    clear_service_vars();

    assert!(matches!(error, ConfigError::InvalidTimeout { .. }));
}

#[test]
#[serial]
fn test_blank_variable_falls_back_to_default() {
    clear_service_vars();
    env::set_var("CARDIO_DEFAULT_RANGE", "   ");

    let config = ServiceConfig::from_env().unwrap();
    clear_service_vars();

    assert_eq!(config.default_range, TimeRange::Daily);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "test-service");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "test-service");
    assert!(config.include_location);

    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
    env::remove_var("SERVICE_NAME");
}

#[test]
#[serial]
fn test_logging_defaults() {
    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
    env::remove_var("SERVICE_NAME");
    env::remove_var("LOG_INCLUDE_LOCATION");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "cardio-metrics");
    assert!(!config.include_location);
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
}
