// ABOUTME: Configuration module for the aggregation service
// ABOUTME: Loads calendar, timeout, and default range settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for Cardio Metrics
//!
//! - **Environment**: service settings read from `CARDIO_*` variables

/// Environment-driven service configuration
pub mod environment;

pub use environment::{ConfigError, ServiceConfig};
