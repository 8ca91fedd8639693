// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use neuroeeg_atlas::AtlasError;
use neuroeeg_config::ConfigError;
use neuroeeg_leadfield::LeadfieldError;

/// Result type for pipeline operations
pub type NeuroEegResult<T> = Result<T, NeuroEegError>;

/// Errors surfaced by the region-projection pipeline
#[derive(Debug, thiserror::Error)]
pub enum NeuroEegError {
    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error(transparent)]
    Leadfield(#[from] LeadfieldError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Forward model error: {0}")]
    ForwardModel(String),
}
