// ABOUTME: Core types and constants for the Cardio Metrics aggregation service
// ABOUTME: Foundation crate with time ranges, windows, metric kinds, summaries, and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cardio Core
//!
//! Foundation crate providing shared types for the Cardio Metrics aggregation
//! service. Both the sample source crate and the aggregation service depend on
//! it, so it is kept free of async runtime dependencies.
//!
//! ## Modules
//!
//! - **errors**: `HealthError`, `SourceError`, and stable `ErrorCode` values
//! - **models**: time ranges, query windows, metric kinds, and summary records
//! - **constants**: environment variable names and defaults

/// Unified error taxonomy for sample sources and aggregation
pub mod errors;

/// Time ranges, windows, metric kinds, and summary records
pub mod models;

/// Environment variable names, defaults, and service identifiers
pub mod constants;

pub use errors::{ErrorCode, HealthError, HealthResult, SourceError, SourceResult};
pub use models::{
    AggregationStyle, HeartRateSummary, MetricKind, MetricsSnapshot, MotionSummary,
    ParseTimeRangeError, Sample, StatKind, TimeRange, Unit, Window,
};
