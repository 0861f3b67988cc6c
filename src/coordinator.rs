// ABOUTME: Refresh orchestration that resolves a window and publishes one snapshot per cycle
// ABOUTME: Newer refreshes supersede in-flight ones; failures never replace published state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metrics Coordinator
//!
//! One refresh cycle:
//!
//! 1. Take the next generation number
//! 2. Resolve the window once
//! 3. Run the heart rate and motion families concurrently, fail-fast
//! 4. Publish the snapshot if this cycle is still the newest
//!
//! Cycles run as spawned tasks. Starting a refresh aborts the cycle it
//! replaces, and the publish step compares generations under the watch
//! channel's lock, so an older cycle can never overwrite a newer snapshot.

use crate::aggregator::StatisticsAggregator;
use crate::config::ServiceConfig;
use crate::resolver::TimeRangeResolver;
use cardio_core::{
    HealthError, HealthResult, MetricKind, MetricsSnapshot, SourceError, TimeRange, Window,
};
use cardio_sources::SampleSource;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

type Published = Option<Arc<MetricsSnapshot>>;

/// Drives refresh cycles and publishes their snapshots
pub struct MetricsCoordinator {
    aggregator: StatisticsAggregator,
    resolver: TimeRangeResolver,
    generation: Arc<AtomicU64>,
    published: Arc<watch::Sender<Published>>,
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
    last_error: Mutex<Option<HealthError>>,
}

impl MetricsCoordinator {
    /// Coordinator over an aggregator and resolver
    #[must_use]
    pub fn new(aggregator: StatisticsAggregator, resolver: TimeRangeResolver) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            aggregator,
            resolver,
            generation: Arc::new(AtomicU64::new(0)),
            published: Arc::new(published),
            in_flight: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    /// Coordinator for `source` using the calendar offset and query timeout from `config`
    #[must_use]
    pub fn from_config(source: Arc<dyn SampleSource>, config: &ServiceConfig) -> Self {
        let aggregator = StatisticsAggregator::new(source).with_timeout(config.query_timeout);
        Self::new(aggregator, TimeRangeResolver::new(config.calendar_offset))
    }

    /// Request read access for every tracked metric
    ///
    /// # Errors
    ///
    /// Returns `HealthDataUnavailable` if the source has no health data, or
    /// `AuthorizationDenied` if the source refuses
    #[instrument(skip(self), fields(source = %self.aggregator.source().name()))]
    pub async fn authorize(&self) -> HealthResult<()> {
        let source = self.aggregator.source();
        if !source.is_available() {
            let error = self.unavailable();
            self.record_error(&error);
            return Err(error);
        }

        let metrics: BTreeSet<MetricKind> = MetricKind::ALL.into_iter().collect();
        match source.request_authorization(&metrics).await {
            Ok(()) => {
                info!(metrics = metrics.len(), "Read access authorized");
                Ok(())
            }
            Err(error) => {
                let error = match error {
                    SourceError::MetricUnavailable(metric) => {
                        HealthError::MissingMetricType { metric }
                    }
                    SourceError::AuthorizationDenied(reason) | SourceError::QueryFailed(reason) => {
                        HealthError::AuthorizationDenied {
                            metric: None,
                            reason,
                        }
                    }
                };
                warn!(error = %error, "Authorization failed");
                self.record_error(&error);
                Err(error)
            }
        }
    }

    /// Refresh `range` anchored at the current time
    ///
    /// # Errors
    ///
    /// See [`MetricsCoordinator::refresh_at`]
    pub async fn refresh(&self, range: TimeRange) -> HealthResult<Arc<MetricsSnapshot>> {
        self.refresh_at(range, Utc::now()).await
    }

    /// Refresh `range` anchored at `now` and publish the result
    ///
    /// # Errors
    ///
    /// Returns the first failing sub-query's error, `HealthDataUnavailable`
    /// if the source has no health data, or `Superseded` if a newer refresh
    /// started before this one could publish
    #[instrument(skip(self), fields(generation))]
    pub async fn refresh_at(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> HealthResult<Arc<MetricsSnapshot>> {
        if !self.aggregator.source().is_available() {
            let error = self.unavailable();
            self.record_error(&error);
            return Err(error);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", generation);
        let window = self.resolver.resolve(range, now);
        debug!(
            start = %window.start(),
            end = %window.end(),
            buckets = window.bucket_count(),
            "Window resolved"
        );

        let task = tokio::spawn(run_cycle(
            self.aggregator.clone(),
            Cycle {
                generation,
                range,
                window,
            },
            Arc::clone(&self.generation),
            Arc::clone(&self.published),
        ));
        self.track(generation, task.abort_handle())?;

        let outcome = match task.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => Err(HealthError::Superseded { range }),
            Err(join_error) => Err(HealthError::Internal(format!(
                "refresh task failed: {join_error}"
            ))),
        };

        match &outcome {
            Ok(_) => {
                info!(%range, "Snapshot published");
                self.clear_error(generation);
            }
            Err(HealthError::Superseded { .. }) => {
                debug!(%range, "Refresh superseded");
            }
            Err(error) => {
                warn!(%range, error = %error, metric = ?error.metric(), "Refresh failed");
                self.record_current_error(generation, error);
            }
        }
        outcome
    }

    /// Receiver that observes every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Published> {
        self.published.subscribe()
    }

    /// Most recently published snapshot
    #[must_use]
    pub fn latest(&self) -> Option<Arc<MetricsSnapshot>> {
        self.published.borrow().clone()
    }

    /// Most recent failure, cleared by the next successful refresh
    #[must_use]
    pub fn last_error(&self) -> Option<HealthError> {
        self.last_error
            .lock()
            .map(|last| last.clone())
            .unwrap_or_default()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn unavailable(&self) -> HealthError {
        HealthError::HealthDataUnavailable {
            source_name: self.aggregator.source().name().to_owned(),
        }
    }

    /// Keep the abort handle of the newest cycle, aborting whichever one loses
    fn track(&self, generation: u64, handle: AbortHandle) -> HealthResult<()> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| HealthError::Internal("in-flight refresh slot poisoned".to_owned()))?;
        match in_flight.as_ref() {
            Some((newer, _)) if *newer > generation => handle.abort(),
            _ => {
                if let Some((_, previous)) = in_flight.replace((generation, handle)) {
                    previous.abort();
                }
            }
        }
        Ok(())
    }

    fn record_error(&self, error: &HealthError) {
        if let Ok(mut last) = self.last_error.lock() {
            *last = Some(error.clone());
        }
    }

    /// Record `error` only while `generation` is still the newest cycle
    fn record_current_error(&self, generation: u64, error: &HealthError) {
        if let Ok(mut last) = self.last_error.lock() {
            if self.is_current(generation) {
                *last = Some(error.clone());
            }
        }
    }

    fn clear_error(&self, generation: u64) {
        if let Ok(mut last) = self.last_error.lock() {
            if self.is_current(generation) {
                *last = None;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cycle {
    generation: u64,
    range: TimeRange,
    window: Window,
}

async fn run_cycle(
    aggregator: StatisticsAggregator,
    cycle: Cycle,
    current: Arc<AtomicU64>,
    published: Arc<watch::Sender<Published>>,
) -> HealthResult<Arc<MetricsSnapshot>> {
    let (heart_rate, motion) = tokio::try_join!(
        aggregator.heart_rate(&cycle.window),
        aggregator.motion(&cycle.window)
    )?;
    let snapshot = Arc::new(MetricsSnapshot {
        generation: cycle.generation,
        range: cycle.range,
        window: cycle.window,
        heart_rate,
        motion,
        computed_at: Utc::now(),
    });

    // generation check runs under the channel lock
    let stored = published.send_if_modified(|slot| {
        if current.load(Ordering::SeqCst) != cycle.generation {
            return false;
        }
        *slot = Some(Arc::clone(&snapshot));
        true
    });
    if stored {
        Ok(snapshot)
    } else {
        Err(HealthError::Superseded { range: cycle.range })
    }
}
