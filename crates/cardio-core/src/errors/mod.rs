// ABOUTME: Unified error handling for health statistics aggregation
// ABOUTME: Defines HealthError, stable error codes, and the sample source error boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! `HealthError` is what aggregation and refresh calls return. An empty query
//! result is not an error; it is reported as `None`.

/// Errors at the sample source boundary
pub mod source;

pub use source::{SourceError, SourceResult};

use crate::models::{MetricKind, StatKind, TimeRange};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for consumers that branch on failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Source refused read access
    #[serde(rename = "AUTHORIZATION_DENIED")]
    AuthorizationDenied,
    /// Health data is not available on this source at all
    #[serde(rename = "HEALTH_DATA_UNAVAILABLE")]
    HealthDataUnavailable,
    /// Requested metric type is not supported
    #[serde(rename = "METRIC_UNAVAILABLE")]
    MetricUnavailable,
    /// Query failed or timed out
    #[serde(rename = "QUERY_FAILED")]
    QueryFailed,
    /// A newer refresh replaced this one
    #[serde(rename = "SUPERSEDED")]
    Superseded,
    /// Invalid configuration
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// User-friendly description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthorizationDenied => "Access to health data was not granted",
            Self::HealthDataUnavailable => "Health data is not available on this device",
            Self::MetricUnavailable => "The requested metric is not supported",
            Self::QueryFailed => "The health data query failed",
            Self::Superseded => "The request was replaced by a newer one",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Error returned by aggregation and refresh operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    /// Source refused access
    #[error("authorization denied: {reason}")]
    AuthorizationDenied {
        /// Metric the query was issued for, `None` for authorization requests
        metric: Option<MetricKind>,
        /// Reason reported by the source
        reason: String,
    },

    /// The source has no health data capability
    #[error("health data is not available from source '{source_name}'")]
    HealthDataUnavailable {
        /// Name of the unavailable source
        source_name: String,
    },

    /// Metric type is not supported or not present on the source
    #[error("metric type {metric} is not supported by the sample source")]
    MissingMetricType {
        /// Unsupported metric
        metric: MetricKind,
    },

    /// Query failed for a metric
    #[error("{} query for {metric} failed: {reason}", .statistic.map_or("latest", StatKind::as_str))]
    QueryFailed {
        /// Metric the query was issued for
        metric: MetricKind,
        /// Statistic requested, `None` for latest-sample lookups
        statistic: Option<StatKind>,
        /// Reason reported by the source
        reason: String,
    },

    /// A newer refresh was triggered before this one published
    #[error("refresh for {range} range was superseded by a newer request")]
    Superseded {
        /// Range of the abandoned refresh
        range: TimeRange,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected failure such as a panicked task
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for aggregation operations
pub type HealthResult<T> = Result<T, HealthError>;

impl HealthError {
    /// Error class of this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::AuthorizationDenied { .. } => ErrorCode::AuthorizationDenied,
            Self::HealthDataUnavailable { .. } => ErrorCode::HealthDataUnavailable,
            Self::MissingMetricType { .. } => ErrorCode::MetricUnavailable,
            Self::QueryFailed { .. } => ErrorCode::QueryFailed,
            Self::Superseded { .. } => ErrorCode::Superseded,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Metric whose sub-query failed, if the failure is metric-specific
    #[must_use]
    pub const fn metric(&self) -> Option<MetricKind> {
        match self {
            Self::AuthorizationDenied { metric, .. } => *metric,
            Self::MissingMetricType { metric } | Self::QueryFailed { metric, .. } => Some(*metric),
            Self::HealthDataUnavailable { .. }
            | Self::Superseded { .. }
            | Self::Config(_)
            | Self::Internal(_) => None,
        }
    }

    /// Whether a caller may reasonably retry; the core itself never does
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_conversion_keeps_metric() {
        let error = SourceError::QueryFailed("timeout".to_owned())
            .into_health_error(MetricKind::HeartRate, Some(StatKind::Minimum));

        assert_eq!(error.code(), ErrorCode::QueryFailed);
        assert_eq!(error.metric(), Some(MetricKind::HeartRate));
        assert!(error.is_retryable());
        assert_eq!(error.to_string(), "min query for heart_rate failed: timeout");
    }

    #[test]
    fn test_metric_unavailable_maps_to_missing_type() {
        let error = SourceError::MetricUnavailable(MetricKind::RunningSpeed)
            .into_health_error(MetricKind::RunningSpeed, Some(StatKind::Average));

        assert_eq!(
            error,
            HealthError::MissingMetricType {
                metric: MetricKind::RunningSpeed
            }
        );
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::AuthorizationDenied).unwrap();
        assert_eq!(json, "\"AUTHORIZATION_DENIED\"");
    }
}
