// ABOUTME: In-memory synthetic sample source for development, testing, and the CLI
// ABOUTME: Computes real per-bucket statistics over stored samples with injectable failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to SourceError::QueryFailed
// for proper error propagation through the aggregation service

//! # Synthetic Sample Source
//!
//! Stands in for a platform health store. Unlike a real store it:
//!
//! - Holds samples in memory, loaded programmatically or from a JSON file
//! - Lets tests control authorization, metric support, and availability
//! - Injects failures for specific metric/statistic pairs
//! - Simulates query latency so supersession can be exercised
//!
//! ## Sample File Format
//!
//! ```json
//! {
//!   "samples": {
//!     "heart_rate": [{ "timestamp": "2024-01-07T08:00:00Z", "value": 62.0 }],
//!     "distance_walking_running": [{ "timestamp": "2024-01-07T09:00:00Z", "value": 1.2 }]
//!   }
//! }
//! ```

use crate::core::{BucketedStatistics, SampleSource};
use async_trait::async_trait;
use cardio_core::constants::service_names;
use cardio_core::{MetricKind, Sample, SourceError, SourceResult, StatKind, Window};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// How the synthetic source handles authorization requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationPolicy {
    /// Every metric is readable without asking
    Open,
    /// Metrics become readable once requested
    Prompt,
    /// Every request is refused with the given reason
    Deny(String),
}

/// Error loading a sample file
#[derive(Debug, Error)]
pub enum SampleFileError {
    /// File could not be read
    #[error("failed to read sample file: {0}")]
    Io(#[from] io::Error),

    /// File contents are not a valid sample document
    #[error("failed to parse sample file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SampleFile {
    #[serde(default)]
    samples: HashMap<MetricKind, Vec<Sample>>,
}

/// Synthetic sample source backed by in-memory samples
///
/// # Examples
///
/// ```rust,no_run
/// use cardio_core::{MetricKind, Sample};
/// use cardio_sources::SyntheticSampleSource;
/// use chrono::Utc;
///
/// let source = SyntheticSampleSource::new()
///     .with_samples(MetricKind::HeartRate, vec![Sample::new(Utc::now(), 64.0)]);
/// assert_eq!(source.sample_count(MetricKind::HeartRate), 1);
/// ```
pub struct SyntheticSampleSource {
    name: String,
    samples: RwLock<HashMap<MetricKind, Vec<Sample>>>,
    unsupported: HashSet<MetricKind>,
    policy: AuthorizationPolicy,
    granted: RwLock<BTreeSet<MetricKind>>,
    /// Keyed by metric and statistic; `None` statistic targets latest-sample lookups
    failures: RwLock<HashMap<(MetricKind, Option<StatKind>), String>>,
    latency: Option<Duration>,
    available: bool,
    query_count: AtomicUsize,
}

impl Default for SyntheticSampleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticSampleSource {
    /// Create an empty, open, always-available source
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: service_names::SYNTHETIC_SOURCE.to_owned(),
            samples: RwLock::new(HashMap::new()),
            unsupported: HashSet::new(),
            policy: AuthorizationPolicy::Open,
            granted: RwLock::new(BTreeSet::new()),
            failures: RwLock::new(HashMap::new()),
            latency: None,
            available: true,
            query_count: AtomicUsize::new(0),
        }
    }

    /// Parse a sample document
    ///
    /// # Errors
    ///
    /// Returns `SampleFileError::Parse` if the JSON is malformed
    pub fn from_json_str(json: &str) -> Result<Self, SampleFileError> {
        let file: SampleFile = serde_json::from_str(json)?;
        let source = Self::new();
        for (metric, samples) in file.samples {
            source.insert_samples(metric, samples);
        }
        Ok(source)
    }

    /// Load a sample document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SampleFileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Use a custom source name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Preload samples for a metric
    #[must_use]
    pub fn with_samples(self, metric: MetricKind, samples: Vec<Sample>) -> Self {
        self.insert_samples(metric, samples);
        self
    }

    /// Change the authorization policy
    #[must_use]
    pub fn with_authorization(mut self, policy: AuthorizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report `metric` as not existing on this source
    #[must_use]
    pub fn without_metric(mut self, metric: MetricKind) -> Self {
        self.unsupported.insert(metric);
        self
    }

    /// Delay every query by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Report health data as unavailable on this device
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Append samples for a metric
    pub fn insert_samples(&self, metric: MetricKind, samples: Vec<Sample>) {
        if let Ok(mut store) = self.samples.write() {
            store.entry(metric).or_default().extend(samples);
        }
    }

    /// Make queries for `metric`/`statistic` fail with `reason`
    ///
    /// A `None` statistic targets latest-sample lookups.
    pub fn fail_query(
        &self,
        metric: MetricKind,
        statistic: Option<StatKind>,
        reason: impl Into<String>,
    ) {
        if let Ok(mut failures) = self.failures.write() {
            failures.insert((metric, statistic), reason.into());
        }
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        if let Ok(mut failures) = self.failures.write() {
            failures.clear();
        }
    }

    /// Number of stored samples for a metric
    #[must_use]
    pub fn sample_count(&self, metric: MetricKind) -> usize {
        self.samples
            .read()
            .map_or(0, |store| store.get(&metric).map_or(0, Vec::len))
    }

    /// Number of queries answered or rejected so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    /// Metrics granted through `request_authorization`
    #[must_use]
    pub fn granted_metrics(&self) -> BTreeSet<MetricKind> {
        self.granted
            .read()
            .map(|granted| granted.clone())
            .unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_access(&self, metric: MetricKind, statistic: Option<StatKind>) -> SourceResult<()> {
        if !self.available {
            return Err(SourceError::QueryFailed(
                "health data is not available on this device".to_owned(),
            ));
        }
        if self.unsupported.contains(&metric) {
            return Err(SourceError::MetricUnavailable(metric));
        }
        match &self.policy {
            AuthorizationPolicy::Open => {}
            AuthorizationPolicy::Deny(reason) => {
                return Err(SourceError::AuthorizationDenied(reason.clone()));
            }
            AuthorizationPolicy::Prompt => {
                let granted = self.granted.read().map_err(|_| {
                    SourceError::QueryFailed("authorization state poisoned".to_owned())
                })?;
                if !granted.contains(&metric) {
                    return Err(SourceError::AuthorizationDenied(format!(
                        "read access for {metric} was not requested"
                    )));
                }
            }
        }
        let failures = self
            .failures
            .read()
            .map_err(|_| SourceError::QueryFailed("failure table poisoned".to_owned()))?;
        if let Some(reason) = failures.get(&(metric, statistic)) {
            return Err(SourceError::QueryFailed(reason.clone()));
        }
        Ok(())
    }

    fn samples_in(&self, metric: MetricKind, window: &Window) -> SourceResult<Vec<Sample>> {
        let store = self
            .samples
            .read()
            .map_err(|_| SourceError::QueryFailed("sample store poisoned".to_owned()))?;
        Ok(store
            .get(&metric)
            .map(|samples| {
                samples
                    .iter()
                    .filter(|sample| window.contains(sample.timestamp))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl SampleSource for SyntheticSampleSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_authorization(&self, metrics: &BTreeSet<MetricKind>) -> SourceResult<()> {
        match &self.policy {
            AuthorizationPolicy::Deny(reason) => {
                Err(SourceError::AuthorizationDenied(reason.clone()))
            }
            AuthorizationPolicy::Open | AuthorizationPolicy::Prompt => {
                let mut granted = self.granted.write().map_err(|_| {
                    SourceError::AuthorizationDenied("authorization state poisoned".to_owned())
                })?;
                granted.extend(metrics.iter().copied());
                debug!(source = %self.name, granted = granted.len(), "Read access granted");
                Ok(())
            }
        }
    }

    async fn query_statistics(
        &self,
        metric: MetricKind,
        statistic: StatKind,
        window: &Window,
    ) -> SourceResult<BucketedStatistics> {
        self.simulate_latency().await;
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.check_access(metric, Some(statistic))?;

        if !metric.supports(statistic) {
            return Err(SourceError::QueryFailed(format!(
                "statistic {statistic} is not compatible with {metric}"
            )));
        }

        let samples = self.samples_in(metric, window)?;
        let buckets: BucketedStatistics = window
            .buckets()
            .map(|(bucket_start, bucket_end)| {
                let value = statistic.reduce(
                    samples
                        .iter()
                        .filter(|sample| {
                            bucket_start <= sample.timestamp && sample.timestamp < bucket_end
                        })
                        .map(|sample| sample.value),
                );
                (bucket_start, value)
            })
            .collect();

        debug!(
            source = %self.name,
            %metric,
            %statistic,
            buckets = buckets.len(),
            samples = samples.len(),
            "Synthetic statistics query answered"
        );
        Ok(buckets)
    }

    async fn latest_sample(
        &self,
        metric: MetricKind,
        window: &Window,
    ) -> SourceResult<Option<Sample>> {
        self.simulate_latency().await;
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.check_access(metric, None)?;

        Ok(self
            .samples_in(metric, window)?
            .into_iter()
            .max_by_key(|sample| sample.timestamp))
    }
}
