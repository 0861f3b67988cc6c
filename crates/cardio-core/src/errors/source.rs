// ABOUTME: Error types reported by sample sources at the query boundary
// ABOUTME: Converted into HealthError with metric and statistic context by the aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::HealthError;
use crate::models::{MetricKind, StatKind};
use thiserror::Error;

/// Failure reported by a sample source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Read access was not granted or was revoked
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// The metric type does not exist on this source
    #[error("metric {0} is not available")]
    MetricUnavailable(MetricKind),

    /// The query itself failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Result type for sample source operations
pub type SourceResult<T> = Result<T, SourceError>;

impl SourceError {
    /// Attach the metric and statistic a failed query was issued for
    #[must_use]
    pub fn into_health_error(self, metric: MetricKind, statistic: Option<StatKind>) -> HealthError {
        match self {
            Self::AuthorizationDenied(reason) => HealthError::AuthorizationDenied {
                metric: Some(metric),
                reason,
            },
            Self::MetricUnavailable(_) => HealthError::MissingMetricType { metric },
            Self::QueryFailed(reason) => HealthError::QueryFailed {
                metric,
                statistic,
                reason,
            },
        }
    }
}
