// ABOUTME: cardio-stats - command-line front end for the aggregation service
// ABOUTME: Loads a sample file, refreshes a time range, and prints the resulting summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Weekly summary from a sample file
//! cardio-stats summary --samples samples.json --range weekly
//!
//! # Reproducible run anchored at a fixed instant, as JSON
//! cardio-stats summary --samples samples.json --range monthly \
//!     --now 2024-01-08T00:00:00Z --format json
//!
//! # Show the window a range resolves to
//! cardio-stats window --range yearly
//! ```

use anyhow::{Context, Result};
use cardio_metrics::config::ServiceConfig;
use cardio_metrics::coordinator::MetricsCoordinator;
use cardio_metrics::logging::{LogFormat, LoggingConfig};
use cardio_metrics::report::{describe_error, format_window, render_json, render_text};
use cardio_metrics::resolver::TimeRangeResolver;
use cardio_metrics::sources::SyntheticSampleSource;
use cardio_metrics::{HealthError, TimeRange};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "cardio-stats",
    about = "Cardio Metrics statistics CLI",
    long_about = "Aggregate heart rate and motion statistics from a sample file over a daily, weekly, monthly, or yearly range."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute and print the summary for a range
    Summary {
        /// Sample file (JSON)
        #[arg(long)]
        samples: PathBuf,

        /// Range to summarize (defaults to CARDIO_DEFAULT_RANGE)
        #[arg(long, short = 'r')]
        range: Option<TimeRange>,

        /// Anchor instant in RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the window a range resolves to
    Window {
        /// Range to resolve (defaults to CARDIO_DEFAULT_RANGE)
        #[arg(long, short = 'r')]
        range: Option<TimeRange>,

        /// Anchor instant in RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::from_env()
        .with_level(log_level)
        .with_format(LogFormat::Compact)
        .init()?;

    let config = ServiceConfig::from_env()?;

    match cli.command {
        Command::Summary {
            samples,
            range,
            now,
            format,
        } => {
            let range = range.unwrap_or(config.default_range);
            summary(&config, &samples, range, now, format).await?;
        }
        Command::Window { range, now } => {
            let range = range.unwrap_or(config.default_range);
            let resolver = TimeRangeResolver::new(config.calendar_offset);
            let window = resolver.resolve(range, now.unwrap_or_else(Utc::now));
            println!(
                "{range}: {} [calendar {}]",
                format_window(&window),
                resolver.calendar()
            );
        }
    }

    Ok(())
}

async fn summary(
    config: &ServiceConfig,
    samples: &Path,
    range: TimeRange,
    now: Option<DateTime<Utc>>,
    format: OutputFormat,
) -> Result<()> {
    let source = SyntheticSampleSource::from_json_file(samples)
        .with_context(|| format!("Failed to load samples from {}", samples.display()))?;
    info!(path = %samples.display(), "Sample file loaded");

    let coordinator = MetricsCoordinator::from_config(Arc::new(source), config);
    coordinator.authorize().await.map_err(explain)?;

    let snapshot = match now {
        Some(now) => coordinator.refresh_at(range, now).await,
        None => coordinator.refresh(range).await,
    }
    .map_err(explain)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&snapshot)),
        OutputFormat::Json => println!("{}", render_json(&snapshot)?),
    }
    Ok(())
}

fn explain(error: HealthError) -> anyhow::Error {
    anyhow::Error::msg(describe_error(&error))
}
