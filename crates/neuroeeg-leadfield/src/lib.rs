// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# neuroeeg-leadfield

Reduces a dipole-resolved leadfield (channels x dipoles) to a region-resolved
one (channels x regions) by averaging the columns of all dipoles that share an
atlas label, and projects region activity through the reduced leadfield.

Both source layouts are supported:
- fixed orientation: one column per dipole
- loose orientation: three consecutive columns (x, y, z) per dipole

Channel rows are never reordered.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod downsample;
pub mod error;
pub mod projection;

pub use downsample::{
    downsample, downsample_loose_orientation, region_groups, LooseRegionLeadfield,
    RegionGroup, RegionLeadfield, ORIENTATION_COMPONENTS,
};
pub use error::{LeadfieldError, LeadfieldResult};
