// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
One-time atlas loading from static files.

The lookup table is parsed here. Decoding the labeled volume (e.g. NIfTI) is
left to an injected [`VolumeReader`], so the labeler never touches image
formats itself.
*/

use std::path::{Path, PathBuf};

use ndarray::Array3;
use tracing::info;

use neuroeeg_config::AtlasConfig;

use crate::atlas::{Atlas, AtlasId, AtlasRegistry};
use crate::error::AtlasResult;
use crate::lut::LabelLut;

/// Integer-coded volume together with its voxel-to-physical affine
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    pub codes: Array3<i32>,
    /// Row-major 4x4 affine, voxel index -> millimetres
    pub affine: [[f64; 4]; 4],
}

/// Decodes a labeled volume file.
pub trait VolumeReader: Send + Sync {
    fn read_volume(&self, path: &Path) -> AtlasResult<LabelVolume>;
}

/// Loads atlases from the directory named in the configuration.
#[derive(Debug, Clone)]
pub struct AtlasLoader {
    config: AtlasConfig,
}

impl AtlasLoader {
    pub fn new(config: AtlasConfig) -> Self {
        AtlasLoader { config }
    }

    pub fn lut_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.lut_file)
    }

    pub fn volume_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.volume_file)
    }

    /// Load and validate the configured atlas.
    pub fn load(&self, reader: &dyn VolumeReader) -> AtlasResult<Atlas> {
        let lut_path = self.lut_path();
        let lut = LabelLut::from_xml_file(&lut_path)?;

        let volume_path = self.volume_path();
        let volume = reader.read_volume(&volume_path)?;
        let atlas = Atlas::new(volume.codes, volume.affine, lut)?;

        let (nx, ny, nz) = atlas.dims();
        info!(
            atlas = %self.config.default_atlas,
            lut = %lut_path.display(),
            volume = %volume_path.display(),
            regions = atlas.lut().len(),
            nx, ny, nz,
            "Atlas loaded"
        );
        Ok(atlas)
    }

    /// Load the configured atlas into a fresh registry.
    pub fn load_registry(&self, reader: &dyn VolumeReader) -> AtlasResult<AtlasRegistry> {
        let id: AtlasId = self.config.default_atlas.parse()?;
        let atlas = self.load(reader)?;
        Ok(AtlasRegistry::new().with_atlas(id, atlas))
    }
}
