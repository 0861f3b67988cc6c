// ABOUTME: Environment-based service configuration with validated parsing
// ABOUTME: Absent variables fall back to defaults; malformed values are reported, never ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cardio_core::constants::{defaults, env_config};
use cardio_core::{HealthError, TimeRange};
use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Calendar offset is not of the form `+HH:MM`, `-HH:MM`, or `UTC`
    #[error("Invalid {variable} value '{value}': expected a UTC offset like +02:00")]
    InvalidOffset {
        /// Variable that held the value
        variable: &'static str,
        /// Rejected value
        value: String,
    },

    /// Timeout is not a positive number of milliseconds
    #[error("Invalid {variable} value '{value}': expected a positive number of milliseconds")]
    InvalidTimeout {
        /// Variable that held the value
        variable: &'static str,
        /// Rejected value
        value: String,
    },

    /// Range does not name a time range
    #[error("Invalid {variable} value: {reason}")]
    InvalidRange {
        /// Variable that held the value
        variable: &'static str,
        /// Parse failure
        reason: String,
    },
}

impl From<ConfigError> for HealthError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Offset whose local midnight starts a day
    pub calendar_offset: FixedOffset,
    /// Timeout applied to every source query
    pub query_timeout: Duration,
    /// Range refreshed when the caller does not pick one
    pub default_range: TimeRange,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            calendar_offset: Utc.fix(),
            query_timeout: Duration::from_millis(defaults::QUERY_TIMEOUT_MS),
            default_range: TimeRange::Daily,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to a malformed value
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment variables");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!("{}", config.summary());
        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to a malformed value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let calendar_offset = read(env_config::CALENDAR_OFFSET)
            .map(|value| parse_offset(env_config::CALENDAR_OFFSET, &value))
            .transpose()?
            .unwrap_or(fallback.calendar_offset);

        let query_timeout = read(env_config::QUERY_TIMEOUT_MS)
            .map(|value| parse_timeout(env_config::QUERY_TIMEOUT_MS, &value))
            .transpose()?
            .unwrap_or(fallback.query_timeout);

        let default_range = read(env_config::DEFAULT_RANGE)
            .map(|value| {
                value
                    .parse::<TimeRange>()
                    .map_err(|e| ConfigError::InvalidRange {
                        variable: env_config::DEFAULT_RANGE,
                        reason: e.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(fallback.default_range);

        Ok(Self {
            calendar_offset,
            query_timeout,
            default_range,
        })
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Cardio Metrics Configuration:\n\
             - Calendar Offset: {}\n\
             - Query Timeout: {}ms\n\
             - Default Range: {}",
            self.calendar_offset,
            self.query_timeout.as_millis(),
            self.default_range
        )
    }
}

fn parse_offset(variable: &'static str, value: &str) -> Result<FixedOffset, ConfigError> {
    if value.eq_ignore_ascii_case("utc") || value.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }
    value
        .parse::<FixedOffset>()
        .map_err(|_| ConfigError::InvalidOffset {
            variable,
            value: value.to_owned(),
        })
}

fn parse_timeout(variable: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidTimeout {
            variable,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_absent_variables_use_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_offset_accepts_utc_alias() {
        let config =
            ServiceConfig::from_lookup(lookup(&[(env_config::CALENDAR_OFFSET, "Z")])).unwrap();
        assert_eq!(config.calendar_offset, Utc.fix());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let error =
            ServiceConfig::from_lookup(lookup(&[(env_config::QUERY_TIMEOUT_MS, "0")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidTimeout { .. }));
    }
}
