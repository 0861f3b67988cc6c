// ABOUTME: Text and JSON rendering of published metrics snapshots
// ABOUTME: Absent values render as "--" so missing data is never mistaken for zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cardio_core::{HealthError, MetricKind, MetricsSnapshot, Unit, Window};
use std::fmt::Write;

/// Placeholder printed for values with no data
pub const MISSING: &str = "--";

const RULE_WIDTH: usize = 48;

/// Format a single optional value with its unit, or [`MISSING`]
#[must_use]
pub fn format_value(value: Option<f64>, unit: Unit) -> String {
    value.map_or_else(
        || MISSING.to_owned(),
        |value| format!("{value:.1} {}", unit.label()),
    )
}

/// Format a window as `start .. end (n daily buckets)`
#[must_use]
pub fn format_window(window: &Window) -> String {
    let buckets = window.bucket_count();
    format!(
        "{} .. {} ({buckets} daily {})",
        window.start().format("%Y-%m-%d %H:%M UTC"),
        window.end().format("%Y-%m-%d %H:%M UTC"),
        if buckets == 1 { "bucket" } else { "buckets" }
    )
}

/// One-line explanation of a failed operation, led by its error class
#[must_use]
pub fn describe_error(error: &HealthError) -> String {
    format!("{}: {error}", error.code().description())
}

/// Render a snapshot as a human-readable report
#[must_use]
pub fn render_text(snapshot: &MetricsSnapshot) -> String {
    let heart = MetricKind::HeartRate.unit();
    let speed = MetricKind::RunningSpeed.unit();
    let distance = MetricKind::DistanceWalkingRunning.unit();
    let hr = &snapshot.heart_rate;
    let motion = &snapshot.motion;

    let rows = [
        ("Resting Heart Rate", format_value(hr.resting, heart)),
        ("Minimum Heart Rate", format_value(hr.minimum, heart)),
        ("Maximum Heart Rate", format_value(hr.maximum, heart)),
        ("Average Heart Rate", format_value(hr.average, heart)),
        ("Current Heart Rate", format_value(hr.current, heart)),
        ("Average Speed", format_value(motion.average_speed, speed)),
        ("Maximum Speed", format_value(motion.maximum_speed, speed)),
        ("Distance", format_value(motion.distance_traveled, distance)),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{} Summary", snapshot.range);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Window: {}", format_window(&snapshot.window));
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<20} {value:>12}");
    }
    out
}

/// Render a snapshot as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn render_json(snapshot: &MetricsSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
