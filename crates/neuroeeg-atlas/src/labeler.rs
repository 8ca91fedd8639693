// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Batch region labeling of physical-space points.

Each point is labeled independently; a point whose back-projected voxel lies
outside the atlas grid is reported as not found (code missing, acronym
`"invalid"`) and never aborts the batch.
*/

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use tracing::{debug, warn};

use neuroeeg_config::LabelingConfig;

use crate::atlas::{Atlas, AtlasRegistry};
use crate::error::{AtlasError, AtlasResult};
use crate::projection::{backproject_batch, voxel_index};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Acronym reported for points outside the atlas volume
pub const INVALID_ACRONYM: &str = "invalid";

/// Default batch size from which labeling runs in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Region assignment of one point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelAssignment {
    /// `false` iff the point falls outside the atlas volume
    pub found: bool,
    /// Region code, `None` when not found
    pub code: Option<i32>,
    /// Region acronym, `"invalid"` when not found
    pub acronym: String,
}

impl LabelAssignment {
    fn invalid() -> Self {
        LabelAssignment {
            found: false,
            code: None,
            acronym: INVALID_ACRONYM.to_string(),
        }
    }
}

/// Labels of a point batch, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling {
    assignments: Vec<LabelAssignment>,
}

impl Labeling {
    pub fn assignments(&self) -> &[LabelAssignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn found(&self) -> Vec<bool> {
        self.assignments.iter().map(|a| a.found).collect()
    }

    /// Codes as floats with `NaN` for unresolved points, ready for downsampling.
    pub fn codes(&self) -> Array1<f64> {
        self.assignments
            .iter()
            .map(|a| a.code.map_or(f64::NAN, f64::from))
            .collect()
    }

    pub fn acronyms(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.acronym.as_str()).collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.found).count()
    }

    /// Indices of the points assigned to `code`.
    pub fn indices_of(&self, code: i32) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.code == Some(code))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Split into `(found, codes, acronyms)` parallel arrays.
    pub fn into_parts(self) -> (Vec<bool>, Array1<f64>, Vec<String>) {
        let found = self.found();
        let codes = self.codes();
        let acronyms = self.assignments.into_iter().map(|a| a.acronym).collect();
        (found, codes, acronyms)
    }
}

/// Resolves points to atlas regions.
///
/// Holds no mutable state; labeling the same batch twice gives identical results.
#[derive(Debug, Clone)]
pub struct AtlasLabeler {
    registry: AtlasRegistry,
    parallel_threshold: usize,
}

impl AtlasLabeler {
    pub fn new(registry: AtlasRegistry) -> Self {
        AtlasLabeler {
            registry,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn from_config(registry: AtlasRegistry, config: &LabelingConfig) -> Self {
        Self::new(registry).with_parallel_threshold(config.parallel_threshold)
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn registry(&self) -> &AtlasRegistry {
        &self.registry
    }

    /// Label an `N x 3` batch of points given in the atlas's physical space (mm).
    ///
    /// # Errors
    ///
    /// * `InvalidShape` if the batch does not have exactly 3 columns
    /// * `UnsupportedAtlas` / `AtlasNotLoaded` if `atlas_id` cannot be resolved
    /// * `UnresolvableLabelCode` if an in-bounds voxel carries a code the table lacks
    pub fn label(&self, points: ArrayView2<'_, f64>, atlas_id: &str) -> AtlasResult<Labeling> {
        let (rows, cols) = points.dim();
        if cols != 3 {
            return Err(AtlasError::InvalidShape { rows, cols });
        }
        let atlas = self.registry.get(atlas_id)?;

        let snapped = backproject_batch(points, atlas.affine(), atlas.affine_inverse());

        #[cfg(feature = "parallel")]
        let assignments: Vec<LabelAssignment> = if rows >= self.parallel_threshold {
            snapped
                .axis_iter(Axis(0))
                .into_par_iter()
                .map(|row| resolve(atlas, row))
                .collect::<AtlasResult<Vec<_>>>()?
        } else {
            snapped
                .axis_iter(Axis(0))
                .map(|row| resolve(atlas, row))
                .collect::<AtlasResult<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let assignments: Vec<LabelAssignment> = snapped
            .axis_iter(Axis(0))
            .map(|row| resolve(atlas, row))
            .collect::<AtlasResult<Vec<_>>>()?;

        let labeling = Labeling { assignments };
        let resolved = labeling.resolved_count();
        if resolved < rows {
            warn!(
                atlas = atlas_id,
                total_points = rows,
                resolved_points = resolved,
                "The atlas does not specify valid labels for all the given points"
            );
        } else {
            debug!(atlas = atlas_id, total_points = rows, "All points labeled");
        }

        Ok(labeling)
    }
}

fn resolve(atlas: &Atlas, snapped: ArrayView1<'_, f64>) -> AtlasResult<LabelAssignment> {
    let Some(code) = voxel_index([snapped[0], snapped[1], snapped[2]], atlas.dims())
        .and_then(|index| atlas.code_at(index))
    else {
        return Ok(LabelAssignment::invalid());
    };

    let acronym = atlas
        .lut()
        .acronym(code)
        .ok_or(AtlasError::UnresolvableLabelCode { code })?;

    Ok(LabelAssignment {
        found: true,
        code: Some(code),
        acronym: acronym.to_string(),
    })
}
