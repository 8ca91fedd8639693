// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Result type for leadfield operations
pub type LeadfieldResult<T> = Result<T, LeadfieldError>;

/// Errors that can occur while reducing or applying a leadfield
#[derive(Debug, thiserror::Error)]
pub enum LeadfieldError {
    /// The only fatal precondition: array extents that do not line up.
    /// An empty result (no valid regions) is not an error.
    #[error("Dimension mismatch ({context}): expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
}
