// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# neuroeeg-atlas

Anatomical atlas access for source-space labeling:
- Region lookup tables parsed from atlas XML documents
- Validated, immutable atlases (labeled volume + affine + table)
- Batch back-projection of millimetre coordinates into the voxel grid
- Per-point region assignment with a single batch-level diagnostic
- Region-of-interest filtering of assigned labels

Currently the AAL2 atlas is the only supported atlas.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod atlas;
pub mod error;
pub mod labeler;
pub mod loader;
pub mod lut;
pub mod projection;
pub mod regions;

pub use atlas::{Atlas, AtlasId, AtlasRegistry};
pub use error::{AtlasError, AtlasResult};
pub use labeler::{AtlasLabeler, LabelAssignment, Labeling, INVALID_ACRONYM};
pub use loader::{AtlasLoader, LabelVolume, VolumeReader};
pub use lut::{LabelLut, BACKGROUND_CODE};
pub use regions::{filter_for_regions, mask_codes};
