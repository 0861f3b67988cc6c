// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names, defaults, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name reported by the aggregation service
    pub const CARDIO_METRICS: &str = "cardio-metrics";
    /// Name reported by the synthetic sample source
    pub const SYNTHETIC_SOURCE: &str = "synthetic";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Calendar UTC offset used for start-of-day arithmetic (e.g. `+02:00`)
    pub const CALENDAR_OFFSET: &str = "CARDIO_CALENDAR_OFFSET";
    /// Per-query timeout in milliseconds
    pub const QUERY_TIMEOUT_MS: &str = "CARDIO_QUERY_TIMEOUT_MS";
    /// Default time range selector
    pub const DEFAULT_RANGE: &str = "CARDIO_DEFAULT_RANGE";
}

/// Default configuration values
pub mod defaults {
    /// Default per-query timeout
    pub const QUERY_TIMEOUT_MS: u64 = 10_000;
    /// Number of days each statistics bucket spans
    pub const BUCKET_DAYS: i64 = 1;
    /// Days covered by the weekly range
    pub const WEEKLY_DAYS: u64 = 7;
    /// Months covered by the monthly range
    pub const MONTHLY_MONTHS: u32 = 1;
    /// Months covered by the yearly range
    pub const YEARLY_MONTHS: u32 = 12;
}
