// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Error types for atlas loading and region labeling.

Points that fall outside the atlas volume are not errors: they are reported
per point through [`LabelAssignment::found`](crate::LabelAssignment) and
summarised once per batch in the log.
*/

use std::path::PathBuf;

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur while loading an atlas or labeling points
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Invalid shape: expected an N x 3 point batch, got {rows} x {cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Unsupported atlas '{0}' (supported: aal2)")]
    UnsupportedAtlas(String),

    #[error("Atlas '{0}' is supported but has not been loaded into the registry")]
    AtlasNotLoaded(String),

    #[error("Affine is not invertible: {0:?}")]
    SingularAffine([[f64; 4]; 4]),

    #[error("Label code {code} occurs in the atlas volume but has no lookup-table entry")]
    UnresolvableLabelCode { code: i32 },

    #[error("Invalid atlas volume: {0}")]
    VolumeShape(String),

    #[error("Region mask has {mask} entries for {codes} label codes")]
    MaskLength { codes: usize, mask: usize },

    #[error("Failed to parse label lookup table: {0}")]
    LutParse(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<quick_xml::DeError> for AtlasError {
    fn from(err: quick_xml::DeError) -> Self {
        AtlasError::LutParse(err.to_string())
    }
}
