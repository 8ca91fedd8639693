// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, NeuroEegConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "neuroeeg.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `NEUROEEG_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroeeg.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEUROEEG_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEUROEEG_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet NEUROEEG_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroEegConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuroEegConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROEEG_ATLAS_DIR` -> `atlas.data_dir`
/// - `NEUROEEG_DEFAULT_ATLAS` -> `atlas.default_atlas`
/// - `NEUROEEG_LOG_LEVEL` -> `system.log_level`
/// - `NEUROEEG_PARALLEL_THRESHOLD` -> `labeling.parallel_threshold`
pub fn apply_environment_overrides(config: &mut NeuroEegConfig) {
    if let Ok(value) = env::var("NEUROEEG_ATLAS_DIR") {
        config.atlas.data_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROEEG_DEFAULT_ATLAS") {
        config.atlas.default_atlas = value;
    }
    if let Ok(value) = env::var("NEUROEEG_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("NEUROEEG_PARALLEL_THRESHOLD") {
        if let Ok(threshold) = value.parse::<usize>() {
            config.labeling.parallel_threshold = threshold;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys: `atlas_dir`, `atlas`, `log_level`, `parallel_threshold`, `subject`,
/// `volume_spacing_mm`, `surface_spacing`.
pub fn apply_cli_overrides(config: &mut NeuroEegConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("atlas_dir") {
        config.atlas.data_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("atlas") {
        config.atlas.default_atlas = value.clone();
    }
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = cli_args.get("parallel_threshold") {
        if let Ok(threshold) = value.parse::<usize>() {
            config.labeling.parallel_threshold = threshold;
        }
    }

    // Head model
    if let Some(value) = cli_args.get("subject") {
        config.head_model.subject = value.clone();
    }
    if let Some(value) = cli_args.get("volume_spacing_mm") {
        if let Ok(spacing) = value.parse::<f64>() {
            config.head_model.volume_spacing_mm = spacing;
        }
    }
    if let Some(value) = cli_args.get("surface_spacing") {
        config.head_model.surface_spacing = value.clone();
    }
}
