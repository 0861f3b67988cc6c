// ABOUTME: Scripted sample source that records every query it receives
// ABOUTME: Lets tests fix per-bucket answers, inject failures and delays, and inspect windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use async_trait::async_trait;
use cardio_core::{MetricKind, Sample, SourceError, SourceResult, StatKind, Window};
use cardio_sources::{BucketedStatistics, SampleSource};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Key for scripted behaviour; `None` statistic is a latest-sample lookup
pub type QueryKey = (MetricKind, Option<StatKind>);

/// One query observed by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedQuery {
    pub metric: MetricKind,
    pub statistic: Option<StatKind>,
    pub window: Window,
}

/// Sample source answering from a script
#[derive(Default)]
pub struct RecordingSource {
    buckets: Mutex<HashMap<(MetricKind, StatKind), BucketedStatistics>>,
    latest: Mutex<HashMap<MetricKind, Sample>>,
    failures: Mutex<HashMap<QueryKey, SourceError>>,
    delays: Mutex<HashMap<QueryKey, Duration>>,
    default_delay: Option<Duration>,
    authorization: Option<SourceError>,
    calls: Mutex<Vec<RecordedQuery>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `metric`/`statistic` with one value per daily bucket starting at `first_bucket`
    pub fn respond(
        self,
        metric: MetricKind,
        statistic: StatKind,
        first_bucket: DateTime<Utc>,
        values: &[Option<f64>],
    ) -> Self {
        let buckets = values
            .iter()
            .enumerate()
            .map(|(day, value)| (first_bucket + ChronoDuration::days(day as i64), *value))
            .collect();
        self.buckets.lock().unwrap().insert((metric, statistic), buckets);
        self
    }

    pub fn with_latest(self, metric: MetricKind, sample: Sample) -> Self {
        self.latest.lock().unwrap().insert(metric, sample);
        self
    }

    pub fn failing(self, key: QueryKey, error: SourceError) -> Self {
        self.failures.lock().unwrap().insert(key, error);
        self
    }

    pub fn delaying(self, key: QueryKey, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(key, delay);
        self
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn denying_authorization(mut self, reason: &str) -> Self {
        self.authorization = Some(SourceError::AuthorizationDenied(reason.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queried_keys(&self) -> HashSet<QueryKey> {
        self.calls()
            .into_iter()
            .map(|call| (call.metric, call.statistic))
            .collect()
    }

    pub fn distinct_windows(&self) -> HashSet<Window> {
        self.calls().into_iter().map(|call| call.window).collect()
    }

    async fn answer(&self, key: QueryKey, window: &Window) -> SourceResult<()> {
        self.calls.lock().unwrap().push(RecordedQuery {
            metric: key.0,
            statistic: key.1,
            window: *window,
        });
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .or(self.default_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().get(&key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SampleSource for RecordingSource {
    fn name(&self) -> &str {
        "recording"
    }

    async fn request_authorization(&self, _metrics: &BTreeSet<MetricKind>) -> SourceResult<()> {
        self.authorization.clone().map_or(Ok(()), Err)
    }

    async fn query_statistics(
        &self,
        metric: MetricKind,
        statistic: StatKind,
        window: &Window,
    ) -> SourceResult<BucketedStatistics> {
        self.answer((metric, Some(statistic)), window).await?;
        Ok(self
            .buckets
            .lock()
            .unwrap()
            .get(&(metric, statistic))
            .cloned()
            .unwrap_or_default())
    }

    async fn latest_sample(
        &self,
        metric: MetricKind,
        window: &Window,
    ) -> SourceResult<Option<Sample>> {
        self.answer((metric, None), window).await?;
        Ok(self.latest.lock().unwrap().get(&metric).copied())
    }
}
