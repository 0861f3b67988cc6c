// ABOUTME: Fixed sample data for a known week of heart rate and motion readings
// ABOUTME: Anchored at 2024-01-08T00:00:00Z so weekly windows cover January 1 through 7
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use cardio_core::{MetricKind, Sample};
use cardio_sources::SyntheticSampleSource;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

/// Daily heart rate minimums for January 1 through 7
pub const DAILY_MINIMUMS: [f64; 7] = [55.0, 58.0, 52.0, 60.0, 57.0, 54.0, 59.0];

/// Daily resting heart rates for January 1 through 7
pub const DAILY_RESTING: [f64; 7] = [50.0, 52.0, 48.0, 51.0, 49.0, 50.0, 50.0];

/// Daily distances for January 1 through 7 (day four has no readings)
pub const DAILY_DISTANCE: [Option<f64>; 7] =
    [Some(1.2), Some(0.0), Some(3.4), None, Some(2.1), None, None];

/// Added to each daily minimum for the afternoon reading
pub const AFTERNOON_DELTA: f64 = 40.0;

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Instant weekly fixtures are anchored at
pub fn week_anchor() -> DateTime<Utc> {
    utc(2024, 1, 8, 0)
}

fn first_day() -> DateTime<Utc> {
    utc(2024, 1, 1, 0)
}

/// Two heart rate readings per day: the minimum at 06:00 and minimum + 40 at 17:00
pub fn heart_rate_week() -> Vec<Sample> {
    DAILY_MINIMUMS
        .iter()
        .enumerate()
        .flat_map(|(day, minimum)| {
            let midnight = first_day() + Duration::days(day as i64);
            [
                Sample::new(midnight + Duration::hours(6), *minimum),
                Sample::new(midnight + Duration::hours(17), minimum + AFTERNOON_DELTA),
            ]
        })
        .collect()
}

pub fn resting_week() -> Vec<Sample> {
    DAILY_RESTING
        .iter()
        .enumerate()
        .map(|(day, value)| {
            Sample::new(
                first_day() + Duration::days(day as i64) + Duration::hours(5),
                *value,
            )
        })
        .collect()
}

/// One speed reading per day: 4.0 mph on odd days, 6.0 mph on even days
pub fn speed_week() -> Vec<Sample> {
    (0..7)
        .map(|day| {
            let value = if day % 2 == 0 { 6.0 } else { 4.0 };
            Sample::new(first_day() + Duration::days(day) + Duration::hours(7), value)
        })
        .collect()
}

/// Distance readings split into two halves per populated day
pub fn distance_week() -> Vec<Sample> {
    DAILY_DISTANCE
        .iter()
        .enumerate()
        .filter_map(|(day, value)| value.map(|value| (day, value)))
        .flat_map(|(day, value)| {
            let midnight = first_day() + Duration::days(day as i64);
            [
                Sample::new(midnight + Duration::hours(8), value / 2.0),
                Sample::new(midnight + Duration::hours(19), value / 2.0),
            ]
        })
        .collect()
}

/// Synthetic source holding the full fixture week for every metric
pub fn week_source() -> SyntheticSampleSource {
    SyntheticSampleSource::new()
        .with_samples(MetricKind::HeartRate, heart_rate_week())
        .with_samples(MetricKind::RestingHeartRate, resting_week())
        .with_samples(MetricKind::RunningSpeed, speed_week())
        .with_samples(MetricKind::DistanceWalkingRunning, distance_week())
}

/// The fixture week as a sample file document
pub fn week_document() -> String {
    let entries = |samples: Vec<Sample>| {
        samples
            .into_iter()
            .map(|sample| json!({ "timestamp": sample.timestamp, "value": sample.value }))
            .collect::<Vec<_>>()
    };
    json!({
        "samples": {
            "heart_rate": entries(heart_rate_week()),
            "resting_heart_rate": entries(resting_week()),
            "running_speed": entries(speed_week()),
            "distance_walking_running": entries(distance_week()),
        }
    })
    .to_string()
}

pub fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got no value"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
