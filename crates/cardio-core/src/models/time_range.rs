// ABOUTME: Time range selector and resolved query window types
// ABOUTME: Window enforces start < end and a positive bucket interval at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// User-facing range selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Since the start of the current day
    Daily,
    /// The last seven days
    Weekly,
    /// The last calendar month
    Monthly,
    /// The last calendar year
    Yearly,
}

impl TimeRange {
    /// Every selector, in picker order
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Display label for the selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a time range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time range '{0}', expected one of: daily, weekly, monthly, yearly")]
pub struct ParseTimeRangeError(pub String);

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(ParseTimeRangeError(s.to_owned())),
        }
    }
}

/// Concrete half-open query window `[start, end)` split into buckets
///
/// Buckets are anchored at `start` and step by `bucket_interval`; the last
/// bucket is clipped to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(rename = "bucket_interval_secs", serialize_with = "serialize_seconds")]
    bucket_interval: Duration,
}

impl Window {
    /// Build a window, returning `None` unless `start < end` and the interval is positive
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, bucket_interval: Duration) -> Option<Self> {
        (start < end && bucket_interval > Duration::zero()).then_some(Self {
            start,
            end,
            bucket_interval,
        })
    }

    /// First day of the Unix epoch in one daily bucket
    ///
    /// Only used when no window around the requested instant is representable.
    #[must_use]
    pub fn epoch_day() -> Self {
        let start = DateTime::<Utc>::default();
        Self {
            start,
            end: start + Duration::days(1),
            bucket_interval: Duration::days(1),
        }
    }

    /// Inclusive lower bound
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Width of each statistics bucket
    #[must_use]
    pub const fn bucket_interval(&self) -> Duration {
        self.bucket_interval
    }

    /// Whether `timestamp` falls inside `[start, end)`
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Iterate over the `(bucket_start, bucket_end)` pairs of this window
    #[must_use]
    pub fn buckets(&self) -> Buckets {
        Buckets {
            next: Some(self.start),
            end: self.end,
            step: self.bucket_interval,
        }
    }

    /// Number of buckets the window is split into
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets().count()
    }
}

/// Iterator over the buckets of a [`Window`]
#[derive(Debug, Clone)]
pub struct Buckets {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl Iterator for Buckets {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket_start = self.next.filter(|start| *start < self.end)?;
        let bucket_end = bucket_start
            .checked_add_signed(self.step)
            .map_or(self.end, |candidate| candidate.min(self.end));
        self.next = Some(bucket_end);
        Some((bucket_start, bucket_end))
    }
}

fn serialize_seconds<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(duration.num_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_rejects_empty_interval() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        assert!(Window::new(now, now, Duration::days(1)).is_none());
        assert!(Window::new(now - Duration::days(1), now, Duration::zero()).is_none());
    }

    #[test]
    fn test_last_bucket_is_clipped_to_end() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 6, 0, 0).unwrap();
        let window = Window::new(start, end, Duration::days(1)).unwrap();

        let buckets: Vec<_> = window.buckets().collect();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2].0, Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
        assert_eq!(buckets[2].1, end);
    }

    #[test]
    fn test_parse_time_range() {
        assert_eq!("Weekly".parse::<TimeRange>(), Ok(TimeRange::Weekly));
        assert_eq!(" yearly ".parse::<TimeRange>(), Ok(TimeRange::Yearly));
        assert!("fortnightly".parse::<TimeRange>().is_err());
    }
}
