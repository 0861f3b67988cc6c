// ABOUTME: Health sample source abstractions and implementations
// ABOUTME: Sample source trait plus the in-memory synthetic source used for tests and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health sample sources.
//!
//! A sample source is the external collaborator that owns raw samples and
//! answers per-bucket statistics queries. Platform health stores implement
//! [`SampleSource`]; this crate ships the [`SyntheticSampleSource`].

// Re-export cardio-core modules so source implementations can use `crate::errors::*`
pub use cardio_core::errors;
pub use cardio_core::models;

/// Sample source capability trait
pub mod core;
/// In-memory synthetic sample source
pub mod synthetic;

pub use crate::core::{BucketedStatistics, SampleSource};
pub use synthetic::{AuthorizationPolicy, SampleFileError, SyntheticSampleSource};
