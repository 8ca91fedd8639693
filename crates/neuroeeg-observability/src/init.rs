// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use neuroeeg_config::{LogFormat, NeuroEegConfig};

use crate::cli::CrateDebugFlags;

/// Map config log levels onto `EnvFilter` levels.
fn normalize_level(level: &str) -> String {
    match level.to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        other => other.to_string(),
    }
}

/// Build the filter for a run; `RUST_LOG` wins when set.
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = debug_flags.to_filter_string(&normalize_level(default_level));
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

/// Install the global console subscriber
///
/// # Errors
///
/// Fails if the filter is invalid or a global subscriber is already installed.
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    format: LogFormat,
) -> Result<()> {
    let filter = build_filter(debug_flags, default_level)?;

    let layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(filter)
            .boxed(),
    };

    Registry::default()
        .with(layer)
        .try_init()
        .context("Failed to install global tracing subscriber")
}

/// Initialize logging from a loaded configuration and the process debug flags
pub fn init_logging_from_config(config: &NeuroEegConfig) -> Result<()> {
    let debug_flags = crate::cli::parse_debug_flags();
    init_logging(&debug_flags, &config.system.log_level, config.logging.format)
}
