// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroeeg.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroEegConfig {
    pub system: SystemConfig,
    pub atlas: AtlasConfig,
    pub labeling: LabelingConfig,
    pub head_model: HeadModelConfig,
    pub logging: LoggingConfig,
}

/// System-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Location of the atlas files
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub data_dir: PathBuf,
    pub default_atlas: String,
    /// Lookup-table XML, relative to `data_dir`
    pub lut_file: String,
    /// Labeled volume, relative to `data_dir`
    pub volume_file: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/atlas"),
            default_atlas: "aal2".to_string(),
            lut_file: "AAL2.xml".to_string(),
            volume_file: "AAL2.nii".to_string(),
        }
    }
}

/// Batch labeling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Batches with at least this many points are labeled in parallel
    pub parallel_threshold: usize,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
        }
    }
}

/// Source space discretisation handed to the forward-model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSpaceType {
    Volumetric,
    Surface,
}

/// Dipole orientation constraint of the source space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrientation {
    /// One leadfield column per dipole (e.g. surface normals)
    Fixed,
    /// Three leadfield columns (x, y, z) per dipole
    Loose,
}

/// Head model parameters for the forward-model provider
///
/// Only conductances and the source space are user-tunable; `volume_spacing_mm`
/// applies to volumetric sources and `surface_spacing` to surface sources.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadModelConfig {
    pub subject: String,
    pub source_space: SourceSpaceType,
    pub volume_spacing_mm: f64,
    pub surface_spacing: String,
    /// Layer conductances in S/m; empty means provider defaults
    pub conductances: Vec<f64>,
    pub orientation: SourceOrientation,
}

impl Default for HeadModelConfig {
    fn default() -> Self {
        Self {
            subject: "fsaverage".to_string(),
            source_space: SourceSpaceType::Volumetric,
            volume_spacing_mm: 5.0,
            surface_spacing: "oct6".to_string(),
            conductances: Vec::new(),
            orientation: SourceOrientation::Fixed,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}
