// ABOUTME: Statistics aggregator issuing per-bucket queries and reducing them across buckets
// ABOUTME: Builds heart rate and motion summaries from concurrent fail-fast sub-queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Statistics Aggregation
//!
//! A sample source only answers "statistic per bucket". The aggregator asks
//! for one statistic over a window and reduces the bucket values again with
//! the same statistic: minimum of minimums, maximum of maximums, average of
//! averages, sum of sums.
//!
//! Empty buckets are excluded from the cross-bucket reduction. For `Sum` this
//! gives the same total as treating them as zero; for the other statistics it
//! keeps a day without readings from dragging the result toward zero.

use cardio_core::constants::defaults;
use cardio_core::{
    HealthError, HealthResult, HeartRateSummary, MetricKind, MotionSummary, StatKind, Window,
};
use cardio_sources::{BucketedStatistics, SampleSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument};

/// Reduce per-bucket values into one scalar with `statistic`
///
/// Buckets without data are skipped; returns `None` when no bucket has data.
#[must_use]
pub fn reduce_buckets(statistic: StatKind, buckets: &BucketedStatistics) -> Option<f64> {
    statistic.reduce(buckets.values().filter_map(|value| *value))
}

/// Runs statistics queries against a sample source
#[derive(Clone)]
pub struct StatisticsAggregator {
    source: Arc<dyn SampleSource>,
    query_timeout: Duration,
}

impl StatisticsAggregator {
    /// Aggregator with the default per-query timeout
    #[must_use]
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self {
            source,
            query_timeout: Duration::from_millis(defaults::QUERY_TIMEOUT_MS),
        }
    }

    /// Override the per-query timeout
    #[must_use]
    pub const fn with_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Source queries are issued against
    #[must_use]
    pub fn source(&self) -> &Arc<dyn SampleSource> {
        &self.source
    }

    /// Compute `statistic` of `metric` over `window`
    ///
    /// Returns `Ok(None)` when no bucket in the window holds data.
    ///
    /// # Errors
    ///
    /// Returns `QueryFailed` (including timeouts), `MissingMetricType`, or
    /// `AuthorizationDenied`. Nothing is retried.
    #[instrument(skip(self, window), fields(source = %self.source.name()))]
    pub async fn aggregate(
        &self,
        metric: MetricKind,
        statistic: StatKind,
        window: &Window,
    ) -> HealthResult<Option<f64>> {
        let buckets = timeout(
            self.query_timeout,
            self.source.query_statistics(metric, statistic, window),
        )
        .await
        .map_err(|_| self.timed_out(metric, Some(statistic)))?
        .map_err(|e| e.into_health_error(metric, Some(statistic)))?;

        let value = reduce_buckets(statistic, &buckets);
        debug!(
            buckets = buckets.len(),
            populated = buckets.values().filter(|value| value.is_some()).count(),
            value = ?value,
            "Buckets reduced"
        );
        Ok(value)
    }

    /// Value of the most recent `metric` sample inside `window`
    ///
    /// # Errors
    ///
    /// Same failure classes as [`StatisticsAggregator::aggregate`]
    #[instrument(skip(self, window), fields(source = %self.source.name()))]
    pub async fn latest(&self, metric: MetricKind, window: &Window) -> HealthResult<Option<f64>> {
        let sample = timeout(self.query_timeout, self.source.latest_sample(metric, window))
            .await
            .map_err(|_| self.timed_out(metric, None))?
            .map_err(|e| e.into_health_error(metric, None))?;
        Ok(sample.map(|sample| sample.value))
    }

    /// Heart rate family over `window`
    ///
    /// Resting is the average of resting heart rate; minimum, maximum, and
    /// average come from heart rate; current is the latest heart rate sample.
    ///
    /// # Errors
    ///
    /// The first failing sub-query fails the summary; the rest are dropped.
    pub async fn heart_rate(&self, window: &Window) -> HealthResult<HeartRateSummary> {
        let (resting, minimum, maximum, average, current) = tokio::try_join!(
            self.aggregate(MetricKind::RestingHeartRate, StatKind::Average, window),
            self.aggregate(MetricKind::HeartRate, StatKind::Minimum, window),
            self.aggregate(MetricKind::HeartRate, StatKind::Maximum, window),
            self.aggregate(MetricKind::HeartRate, StatKind::Average, window),
            self.latest(MetricKind::HeartRate, window),
        )?;

        Ok(HeartRateSummary {
            resting,
            minimum,
            maximum,
            average,
            current,
        })
    }

    /// Motion family over `window`
    ///
    /// # Errors
    ///
    /// The first failing sub-query fails the summary; the rest are dropped.
    pub async fn motion(&self, window: &Window) -> HealthResult<MotionSummary> {
        let (average_speed, maximum_speed, distance_traveled) = tokio::try_join!(
            self.aggregate(MetricKind::RunningSpeed, StatKind::Average, window),
            self.aggregate(MetricKind::RunningSpeed, StatKind::Maximum, window),
            self.aggregate(MetricKind::DistanceWalkingRunning, StatKind::Sum, window),
        )?;

        Ok(MotionSummary {
            average_speed,
            maximum_speed,
            distance_traveled,
        })
    }

    fn timed_out(&self, metric: MetricKind, statistic: Option<StatKind>) -> HealthError {
        HealthError::QueryFailed {
            metric,
            statistic,
            reason: format!("timed out after {}ms", self.query_timeout.as_millis()),
        }
    }
}
