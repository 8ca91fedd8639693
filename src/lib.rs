// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroeeg - Region-level EEG forward projection
//!
//! Projects simulated whole-brain, per-region activity onto scalp electrodes:
//! dipoles of a forward model are labeled with anatomical regions from an
//! atlas, and the dipole-resolved leadfield is averaged into one column per
//! region.
//!
//! ## Crates
//! - [`atlas`]: atlas loading, voxel back-projection, point labeling
//! - [`leadfield`]: region averaging (fixed and loose orientation), activity projection
//! - [`config`]: TOML configuration with environment and CLI overrides
//! - [`observability`]: logging setup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ndarray::Array2;
//! use neuroeeg::prelude::*;
//!
//! # fn run(registry: AtlasRegistry, solution: ForwardSolution) -> NeuroEegResult<()> {
//! let config = NeuroEegConfig::default();
//! let projector = RegionProjector::from_config(registry, &config);
//! let provider = PrecomputedForwardModel::new(solution);
//!
//! let projection = projector.build(&provider, &config.head_model)?;
//! if let RegionModel::Fixed(reduced) = &projection.model {
//!     let activity = Array2::<f64>::zeros((reduced.n_regions(), 1000));
//!     let electrodes = reduced.project(activity.view())?;
//!     assert_eq!(electrodes.nrows(), reduced.n_channels());
//! }
//! # Ok(())
//! # }
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod forward;
pub mod pipeline;

pub use neuroeeg_atlas as atlas;
pub use neuroeeg_config as config;
pub use neuroeeg_leadfield as leadfield;
pub use neuroeeg_observability as observability;

pub use error::{NeuroEegError, NeuroEegResult};
pub use forward::{ForwardModelProvider, ForwardSolution, PrecomputedForwardModel};
pub use pipeline::{RegionModel, RegionProjection, RegionProjector};

/// Commonly used types
pub mod prelude {
    pub use crate::error::{NeuroEegError, NeuroEegResult};
    pub use crate::forward::{ForwardModelProvider, ForwardSolution, PrecomputedForwardModel};
    pub use crate::pipeline::{RegionModel, RegionProjection, RegionProjector};

    pub use neuroeeg_atlas::{
        filter_for_regions, mask_codes, Atlas, AtlasId, AtlasLabeler, AtlasLoader,
        AtlasRegistry, LabelAssignment, LabelLut, Labeling, VolumeReader,
    };
    pub use neuroeeg_config::{HeadModelConfig, NeuroEegConfig, SourceOrientation};
    pub use neuroeeg_leadfield::{
        downsample, downsample_loose_orientation, LooseRegionLeadfield, RegionLeadfield,
    };
}
