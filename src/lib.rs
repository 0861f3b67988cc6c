// ABOUTME: Main library entry point for the Cardio Metrics aggregation service
// ABOUTME: Turns bucketed health statistics into per-range heart rate and motion summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cardio Metrics
//!
//! Aggregates heart rate, resting heart rate, running speed, and walking plus
//! running distance from a [`SampleSource`] into summaries over a selected
//! time range.
//!
//! ## Architecture
//!
//! - **Resolver**: maps a `TimeRange` and an instant to a bucketed window
//! - **Aggregator**: queries one statistic per bucket and reduces across buckets
//! - **Coordinator**: runs refresh cycles, supersedes stale ones, publishes snapshots
//! - **Config / Logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cardio_metrics::config::ServiceConfig;
//! use cardio_metrics::coordinator::MetricsCoordinator;
//! use cardio_metrics::sources::SyntheticSampleSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let source = Arc::new(SyntheticSampleSource::from_json_file("samples.json")?);
//!     let coordinator = MetricsCoordinator::from_config(source, &config);
//!
//!     coordinator.authorize().await?;
//!     let snapshot = coordinator.refresh(config.default_range).await?;
//!     println!("minimum heart rate: {:?}", snapshot.heart_rate.minimum);
//!     Ok(())
//! }
//! ```

/// Statistics queries and cross-bucket reduction
pub mod aggregator;

/// Environment-driven service configuration
pub mod config;

/// Refresh cycles and snapshot publishing
pub mod coordinator;

/// Structured logging setup
pub mod logging;

/// Snapshot rendering for the CLI
pub mod report;

/// Time range to window resolution
pub mod resolver;

pub use cardio_core::{constants, errors, models};
pub use cardio_sources as sources;

pub use aggregator::StatisticsAggregator;
pub use cardio_core::{HealthError, HealthResult, MetricsSnapshot, TimeRange, Window};
pub use cardio_sources::SampleSource;
pub use coordinator::MetricsCoordinator;
pub use resolver::TimeRangeResolver;
