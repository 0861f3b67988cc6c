// ABOUTME: Sample source capability trait consumed by the aggregation service
// ABOUTME: Defines the per-bucket statistics query contract every health data backend implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sample Source Contract
//!
//! A sample source owns raw health samples and answers one kind of question:
//! "what is statistic S of metric M in each bucket of this window?". It never
//! answers for an arbitrary range directly, so callers reduce the returned
//! buckets themselves.
//!
//! ## Implementing a Source
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use cardio_core::{MetricKind, SourceResult, StatKind, Window};
//! use cardio_sources::core::{BucketedStatistics, SampleSource};
//! use std::collections::BTreeSet;
//!
//! struct EmptySource;
//!
//! #[async_trait]
//! impl SampleSource for EmptySource {
//!     fn name(&self) -> &str {
//!         "empty"
//!     }
//!
//!     async fn request_authorization(&self, _metrics: &BTreeSet<MetricKind>) -> SourceResult<()> {
//!         Ok(())
//!     }
//!
//!     async fn query_statistics(
//!         &self,
//!         _metric: MetricKind,
//!         _statistic: StatKind,
//!         window: &Window,
//!     ) -> SourceResult<BucketedStatistics> {
//!         Ok(window.buckets().map(|(start, _)| (start, None)).collect())
//!     }
//! }
//! ```

use async_trait::async_trait;
use cardio_core::{MetricKind, Sample, SourceResult, StatKind, Window};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Per-bucket statistic keyed by bucket start; `None` marks a bucket without samples
pub type BucketedStatistics = BTreeMap<DateTime<Utc>, Option<f64>>;

/// Health data backend the aggregation service queries
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Source name for logs and error messages
    fn name(&self) -> &str;

    /// Whether health data exists on this source at all
    fn is_available(&self) -> bool {
        true
    }

    /// Request read access for `metrics`
    ///
    /// Must be idempotent; the surrounding application calls it before the
    /// first refresh.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::AuthorizationDenied` if access is refused
    async fn request_authorization(&self, metrics: &BTreeSet<MetricKind>) -> SourceResult<()>;

    /// Compute `statistic` of `metric` for every bucket of `window`
    ///
    /// # Errors
    ///
    /// Returns `AuthorizationDenied`, `MetricUnavailable`, or `QueryFailed`
    async fn query_statistics(
        &self,
        metric: MetricKind,
        statistic: StatKind,
        window: &Window,
    ) -> SourceResult<BucketedStatistics>;

    /// Most recent sample of `metric` inside `window`
    ///
    /// Sources that cannot answer this return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same failure classes as [`SampleSource::query_statistics`]
    async fn latest_sample(
        &self,
        _metric: MetricKind,
        _window: &Window,
    ) -> SourceResult<Option<Sample>> {
        Ok(None)
    }
}
