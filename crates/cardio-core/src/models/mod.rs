// ABOUTME: Core data models for health statistics aggregation
// ABOUTME: Re-exports time range, metric, and summary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Metric and statistic kinds, units, and samples
pub mod metric;
/// Summary records and published snapshots
pub mod summary;
/// Range selectors and query windows
pub mod time_range;

pub use metric::{AggregationStyle, MetricKind, Sample, StatKind, Unit};
pub use summary::{HeartRateSummary, MetricsSnapshot, MotionSummary};
pub use time_range::{Buckets, ParseTimeRangeError, TimeRange, Window};
