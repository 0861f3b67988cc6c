// ABOUTME: Per-range summary records produced by one refresh cycle
// ABOUTME: Every field is independently optional; absence means "no data", never zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{TimeRange, Window};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Heart rate statistics for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeartRateSummary {
    /// Average resting heart rate
    pub resting: Option<f64>,
    /// Lowest heart rate
    pub minimum: Option<f64>,
    /// Highest heart rate
    pub maximum: Option<f64>,
    /// Average heart rate
    pub average: Option<f64>,
    /// Most recent heart rate reading in the window
    pub current: Option<f64>,
}

/// Running and walking statistics for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MotionSummary {
    /// Average running speed
    pub average_speed: Option<f64>,
    /// Highest running speed
    pub maximum_speed: Option<f64>,
    /// Total walking and running distance
    pub distance_traveled: Option<f64>,
}

/// Result of one completed refresh, published as a unit
///
/// Both summaries were computed against `window`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Refresh trigger counter that produced this snapshot
    pub generation: u64,
    /// Selector the window was resolved from
    pub range: TimeRange,
    /// Window every field was aggregated over
    pub window: Window,
    /// Heart rate family
    pub heart_rate: HeartRateSummary,
    /// Motion family
    pub motion: MotionSummary,
    /// When aggregation finished
    pub computed_at: DateTime<Utc>,
}
