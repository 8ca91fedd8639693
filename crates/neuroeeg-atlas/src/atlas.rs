// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Atlas data model - labeled voxel volume, voxel-to-physical affine and lookup table.

An [`Atlas`] is validated once when constructed and is read-only afterwards;
share it between labelers through an [`AtlasRegistry`].
*/

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use nalgebra::Matrix4;
use ndarray::Array3;

use crate::error::{AtlasError, AtlasResult};
use crate::lut::LabelLut;

/// Atlases known to the labeler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtlasId {
    /// Automated Anatomical Labeling atlas, version 2 (MNI space, 2 mm)
    Aal2,
}

impl AtlasId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtlasId::Aal2 => "aal2",
        }
    }
}

impl fmt::Display for AtlasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtlasId {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aal2" => Ok(AtlasId::Aal2),
            other => Err(AtlasError::UnsupportedAtlas(other.to_string())),
        }
    }
}

/// Labeled reference volume with its affine and region table.
#[derive(Debug, Clone)]
pub struct Atlas {
    volume: Array3<i32>,
    affine: Matrix4<f64>,
    affine_inverse: Matrix4<f64>,
    lut: LabelLut,
}

impl Atlas {
    /// Assemble and validate an atlas.
    ///
    /// `affine` maps voxel indices `(i, j, k, 1)` to physical millimetres, row-major.
    ///
    /// # Errors
    ///
    /// * `SingularAffine` if the affine cannot be inverted
    /// * `VolumeShape` if the volume has an empty axis
    /// * `UnresolvableLabelCode` if a code in the volume is missing from `lut`
    pub fn new(volume: Array3<i32>, affine: [[f64; 4]; 4], lut: LabelLut) -> AtlasResult<Self> {
        if volume.is_empty() {
            return Err(AtlasError::VolumeShape(format!(
                "volume has an empty axis: {:?}",
                volume.shape()
            )));
        }

        let affine_matrix = Matrix4::from_fn(|r, c| affine[r][c]);
        let affine_inverse = affine_matrix
            .try_inverse()
            .ok_or(AtlasError::SingularAffine(affine))?;

        let present: AHashSet<i32> = volume.iter().copied().collect();
        let mut missing: Vec<i32> = present.into_iter().filter(|c| !lut.contains(*c)).collect();
        missing.sort_unstable();
        if let Some(&code) = missing.first() {
            tracing::error!(
                missing_codes = ?missing,
                "Atlas volume contains codes absent from its lookup table"
            );
            return Err(AtlasError::UnresolvableLabelCode { code });
        }

        Ok(Atlas {
            volume,
            affine: affine_matrix,
            affine_inverse,
            lut,
        })
    }

    pub fn volume(&self) -> &Array3<i32> {
        &self.volume
    }

    /// Voxel grid extent `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.volume.dim()
    }

    pub fn affine(&self) -> &Matrix4<f64> {
        &self.affine
    }

    pub fn affine_inverse(&self) -> &Matrix4<f64> {
        &self.affine_inverse
    }

    pub fn lut(&self) -> &LabelLut {
        &self.lut
    }

    /// Stored code at a voxel index, `None` outside the grid.
    pub fn code_at(&self, index: [usize; 3]) -> Option<i32> {
        self.volume.get(index).copied()
    }
}

/// Explicitly constructed set of loaded atlases.
///
/// Cloning is cheap; atlases are shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AtlasRegistry {
    atlases: AHashMap<AtlasId, Arc<Atlas>>,
}

impl AtlasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_atlas(mut self, id: AtlasId, atlas: Atlas) -> Self {
        self.insert(id, atlas);
        self
    }

    pub fn insert(&mut self, id: AtlasId, atlas: Atlas) {
        self.atlases.insert(id, Arc::new(atlas));
    }

    /// Resolve an atlas by its textual identifier.
    ///
    /// # Errors
    ///
    /// `UnsupportedAtlas` for unknown identifiers, `AtlasNotLoaded` for known
    /// ones that were never inserted.
    pub fn get(&self, atlas_id: &str) -> AtlasResult<&Arc<Atlas>> {
        let id: AtlasId = atlas_id.parse()?;
        self.atlases
            .get(&id)
            .ok_or_else(|| AtlasError::AtlasNotLoaded(id.to_string()))
    }

    pub fn contains(&self, id: AtlasId) -> bool {
        self.atlases.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> [[f64; 4]; 4] {
        [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_atlas_id_parsing() {
        assert_eq!("aal2".parse::<AtlasId>().unwrap(), AtlasId::Aal2);
        assert!(matches!(
            "AAL2".parse::<AtlasId>(),
            Err(AtlasError::UnsupportedAtlas(_))
        ));
        assert!(matches!(
            "aal3".parse::<AtlasId>(),
            Err(AtlasError::UnsupportedAtlas(_))
        ));
    }

    #[test]
    fn test_missing_lut_entry_rejected() {
        let mut volume = Array3::<i32>::zeros((2, 2, 2));
        volume[[1, 1, 1]] = 42;
        let lut = LabelLut::from_entries([(7, "Seven")]);
        let result = Atlas::new(volume, identity(), lut);
        assert!(matches!(
            result,
            Err(AtlasError::UnresolvableLabelCode { code: 42 })
        ));
    }

    #[test]
    fn test_singular_affine_rejected() {
        let mut affine = identity();
        affine[2][2] = 0.0;
        let volume = Array3::<i32>::zeros((2, 2, 2));
        let result = Atlas::new(volume, affine, LabelLut::from_entries::<_, String>([]));
        assert!(matches!(result, Err(AtlasError::SingularAffine(_))));
    }

    #[test]
    fn test_empty_volume_rejected() {
        let volume = Array3::<i32>::zeros((0, 2, 2));
        let result = Atlas::new(volume, identity(), LabelLut::from_entries::<_, String>([]));
        assert!(matches!(result, Err(AtlasError::VolumeShape(_))));
    }

    #[test]
    fn test_registry_lookup() {
        let atlas = Atlas::new(
            Array3::<i32>::zeros((2, 2, 2)),
            identity(),
            LabelLut::from_entries::<_, String>([]),
        )
        .unwrap();

        let empty = AtlasRegistry::new();
        assert!(matches!(empty.get("aal2"), Err(AtlasError::AtlasNotLoaded(_))));

        let registry = AtlasRegistry::new().with_atlas(AtlasId::Aal2, atlas);
        assert!(registry.get("aal2").is_ok());
        assert!(matches!(
            registry.get("destrieux"),
            Err(AtlasError::UnsupportedAtlas(_))
        ));
        assert_eq!(registry.len(), 1);
    }
}
