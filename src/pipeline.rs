// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region projection pipeline.

provider -> dipole positions + leadfield -> atlas labels -> region leadfield.
The resulting leadfield maps per-region activity to electrode signals.
*/

use ndarray::Array1;
use tracing::info;

use neuroeeg_atlas::{AtlasLabeler, AtlasRegistry, Labeling};
use neuroeeg_config::{HeadModelConfig, NeuroEegConfig, SourceOrientation};
use neuroeeg_leadfield::{
    downsample, downsample_loose_orientation, LooseRegionLeadfield, RegionLeadfield,
};

use crate::error::NeuroEegResult;
use crate::forward::ForwardModelProvider;

/// Region leadfield in the layout of the source space
#[derive(Debug, Clone, PartialEq)]
pub enum RegionModel {
    Fixed(RegionLeadfield),
    Loose(LooseRegionLeadfield),
}

impl RegionModel {
    pub fn unique_labels(&self) -> &Array1<f64> {
        match self {
            RegionModel::Fixed(reduced) => &reduced.unique_labels,
            RegionModel::Loose(reduced) => &reduced.unique_labels,
        }
    }

    pub fn n_regions(&self) -> usize {
        self.unique_labels().len()
    }

    pub fn n_channels(&self) -> usize {
        match self {
            RegionModel::Fixed(reduced) => reduced.n_channels(),
            RegionModel::Loose(reduced) => reduced.n_channels(),
        }
    }
}

/// Per-dipole labels together with the region leadfield built from them
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProjection {
    pub labeling: Labeling,
    pub model: RegionModel,
}

/// Builds region leadfields from forward solutions.
#[derive(Debug, Clone)]
pub struct RegionProjector {
    labeler: AtlasLabeler,
    atlas_id: String,
}

impl RegionProjector {
    pub fn new(labeler: AtlasLabeler, atlas_id: impl Into<String>) -> Self {
        RegionProjector {
            labeler,
            atlas_id: atlas_id.into(),
        }
    }

    pub fn from_config(registry: AtlasRegistry, config: &NeuroEegConfig) -> Self {
        Self::new(
            AtlasLabeler::from_config(registry, &config.labeling),
            config.atlas.default_atlas.clone(),
        )
    }

    pub fn labeler(&self) -> &AtlasLabeler {
        &self.labeler
    }

    /// Solve the head model, label its dipoles and reduce the leadfield.
    pub fn build(
        &self,
        provider: &dyn ForwardModelProvider,
        head_model: &HeadModelConfig,
    ) -> NeuroEegResult<RegionProjection> {
        let solution = provider.solve(head_model)?;

        let labeling = self
            .labeler
            .label(solution.positions_mm.view(), &self.atlas_id)?;
        let codes = labeling.codes();

        let model = match solution.orientation {
            SourceOrientation::Fixed => {
                RegionModel::Fixed(downsample(solution.leadfield.view(), codes.view())?)
            }
            SourceOrientation::Loose => RegionModel::Loose(downsample_loose_orientation(
                solution.leadfield.view(),
                codes.view(),
            )?),
        };

        info!(
            atlas = %self.atlas_id,
            dipoles = labeling.len(),
            labeled = labeling.resolved_count(),
            regions = model.n_regions(),
            channels = model.n_channels(),
            "Region leadfield ready"
        );

        Ok(RegionProjection { labeling, model })
    }
}
