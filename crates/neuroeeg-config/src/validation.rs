// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! All problems are collected and reported together.

use crate::{ConfigError, ConfigResult, NeuroEegConfig, SourceSpaceType};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NeuroEegConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation problem in `config`
pub fn collect_errors(config: &NeuroEegConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if config.atlas.default_atlas.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "atlas.default_atlas".to_string(),
        });
    }
    if config.atlas.lut_file.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "atlas.lut_file".to_string(),
        });
    }

    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!("'{}' is not one of {:?}", config.system.log_level, LOG_LEVELS),
        });
    }

    let head_model = &config.head_model;
    if head_model.subject.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "head_model.subject".to_string(),
        });
    }
    match head_model.source_space {
        SourceSpaceType::Volumetric => {
            if !(head_model.volume_spacing_mm > 0.0) {
                errors.push(ConfigValidationError::InvalidValue {
                    field: "head_model.volume_spacing_mm".to_string(),
                    reason: format!("must be positive, got {}", head_model.volume_spacing_mm),
                });
            }
        }
        SourceSpaceType::Surface => {
            if head_model.surface_spacing.trim().is_empty() {
                errors.push(ConfigValidationError::MissingRequired {
                    field: "head_model.surface_spacing".to_string(),
                });
            }
        }
    }
    for (layer, conductance) in head_model.conductances.iter().enumerate() {
        if !(*conductance > 0.0) {
            errors.push(ConfigValidationError::InvalidValue {
                field: format!("head_model.conductances[{}]", layer),
                reason: format!("must be positive, got {}", conductance),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_problems() {
        let mut config = NeuroEegConfig::default();
        config.atlas.default_atlas = "".to_string();
        config.system.log_level = "loud".to_string();
        config.head_model.volume_spacing_mm = 0.0;
        config.head_model.conductances = vec![0.3, -0.1];

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 4);

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("atlas.default_atlas"));
        assert!(message.contains("head_model.conductances[1]"));
    }

    #[test]
    fn test_surface_spacing_only_checked_for_surface_sources() {
        let mut config = NeuroEegConfig::default();
        config.head_model.surface_spacing = String::new();
        assert!(validate_config(&config).is_ok());

        config.head_model.source_space = SourceSpaceType::Surface;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = NeuroEegConfig::default();
        config.system.log_level = "WARNING".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
