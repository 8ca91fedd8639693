// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Forward-model provider seam.

Computing a forward solution (BEM, source space, conduction model) happens
outside this crate. A provider only has to hand back dipole positions and the
matching leadfield for a head-model configuration.
*/

use ndarray::Array2;
use tracing::debug;

use neuroeeg_config::{HeadModelConfig, SourceOrientation};

use crate::error::{NeuroEegError, NeuroEegResult};

/// Dipole positions and leadfield of one head model
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardSolution {
    /// Dipoles x 3, millimetres in the atlas's stereotactic space
    pub positions_mm: Array2<f64>,
    /// Channels x dipoles (fixed) or channels x 3 dipoles (loose)
    pub leadfield: Array2<f64>,
    pub orientation: SourceOrientation,
}

impl ForwardSolution {
    pub fn n_dipoles(&self) -> usize {
        self.positions_mm.nrows()
    }

    pub fn n_channels(&self) -> usize {
        self.leadfield.nrows()
    }
}

/// Supplies forward solutions for a head model.
pub trait ForwardModelProvider: Send + Sync {
    fn solve(&self, head_model: &HeadModelConfig) -> NeuroEegResult<ForwardSolution>;
}

/// Serves a solution computed ahead of time.
#[derive(Debug, Clone)]
pub struct PrecomputedForwardModel {
    solution: ForwardSolution,
}

impl PrecomputedForwardModel {
    pub fn new(solution: ForwardSolution) -> Self {
        PrecomputedForwardModel { solution }
    }
}

impl ForwardModelProvider for PrecomputedForwardModel {
    fn solve(&self, head_model: &HeadModelConfig) -> NeuroEegResult<ForwardSolution> {
        if head_model.orientation != self.solution.orientation {
            return Err(NeuroEegError::ForwardModel(format!(
                "precomputed solution has {:?} orientation, head model requests {:?}",
                self.solution.orientation, head_model.orientation
            )));
        }
        debug!(
            subject = %head_model.subject,
            dipoles = self.solution.n_dipoles(),
            channels = self.solution.n_channels(),
            "Serving precomputed forward solution"
        );
        Ok(self.solution.clone())
    }
}
