// ABOUTME: Metric kinds, statistic kinds, canonical units, and raw samples
// ABOUTME: Encodes which statistics each metric supports (discrete vs cumulative)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurable quantity supplied by a sample source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Instantaneous heart rate
    HeartRate,
    /// Resting heart rate computed by the platform
    RestingHeartRate,
    /// Running speed
    RunningSpeed,
    /// Distance covered walking or running
    DistanceWalkingRunning,
}

impl MetricKind {
    /// Every metric tracked by the aggregation service
    pub const ALL: [Self; 4] = [
        Self::HeartRate,
        Self::RestingHeartRate,
        Self::RunningSpeed,
        Self::DistanceWalkingRunning,
    ];

    /// Stable identifier used in logs and sample files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::RestingHeartRate => "resting_heart_rate",
            Self::RunningSpeed => "running_speed",
            Self::DistanceWalkingRunning => "distance_walking_running",
        }
    }

    /// Unit values of this metric are reported in
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::HeartRate | Self::RestingHeartRate => Unit::BeatsPerMinute,
            Self::RunningSpeed => Unit::MilesPerHour,
            Self::DistanceWalkingRunning => Unit::Miles,
        }
    }

    /// How samples of this metric combine
    #[must_use]
    pub const fn aggregation_style(self) -> AggregationStyle {
        match self {
            Self::DistanceWalkingRunning => AggregationStyle::Cumulative,
            Self::HeartRate | Self::RestingHeartRate | Self::RunningSpeed => {
                AggregationStyle::Discrete
            }
        }
    }

    /// Whether `statistic` is meaningful for this metric
    #[must_use]
    pub const fn supports(self, statistic: StatKind) -> bool {
        match self.aggregation_style() {
            AggregationStyle::Discrete => !matches!(statistic, StatKind::Sum),
            AggregationStyle::Cumulative => matches!(statistic, StatKind::Sum),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduction applied per bucket and again across buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    /// Smallest value
    Minimum,
    /// Largest value
    Maximum,
    /// Arithmetic mean
    Average,
    /// Total
    Sum,
}

impl StatKind {
    /// Stable identifier used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimum => "min",
            Self::Maximum => "max",
            Self::Average => "avg",
            Self::Sum => "sum",
        }
    }

    /// Reduce `values` with this statistic, skipping non-finite values
    ///
    /// Returns `None` when nothing is left to reduce. `Average` is the
    /// unweighted mean of the inputs.
    #[must_use]
    pub fn reduce<I>(self, values: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut finite = values.into_iter().filter(|value| value.is_finite());
        let first = finite.next()?;
        let (accumulated, count) = finite.fold((first, 1_usize), |(acc, count), value| {
            let next = match self {
                Self::Minimum => acc.min(value),
                Self::Maximum => acc.max(value),
                Self::Average | Self::Sum => acc + value,
            };
            (next, count + 1)
        });

        Some(match self {
            Self::Average => accumulated / count as f64,
            Self::Minimum | Self::Maximum | Self::Sum => accumulated,
        })
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a metric is a point reading or an accumulating quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStyle {
    /// Independent readings (min/max/avg)
    Discrete,
    /// Quantities that add up over time (sum)
    Cumulative,
}

/// Canonical reporting unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Beats per minute
    #[serde(rename = "count/min")]
    BeatsPerMinute,
    /// Miles per hour
    #[serde(rename = "mi/h")]
    MilesPerHour,
    /// Miles
    #[serde(rename = "mi")]
    Miles,
}

impl Unit {
    /// Short label for display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BeatsPerMinute => "BPM",
            Self::MilesPerHour => "MPH",
            Self::Miles => "Miles",
        }
    }
}

/// A single timestamped reading owned by the sample source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Reading in the metric's canonical unit
    pub value: f64,
}

impl Sample {
    /// Create a sample
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}
