// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region-of-interest selection over labeled dipoles.
*/

use ndarray::{Array1, ArrayView1};

use crate::error::{AtlasError, AtlasResult};

/// Flag each label that is one of `regions`.
///
/// Matching is exact: no case folding, no substring matches.
pub fn filter_for_regions<L, R>(labels: &[L], regions: &[R]) -> Vec<bool>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    labels
        .iter()
        .map(|label| regions.iter().any(|r| r.as_ref() == label.as_ref()))
        .collect()
}

/// Zero the codes of deselected dipoles so that downsampling drops them.
///
/// `keep` is parallel to `codes`; unresolved codes (`NaN`) stay `NaN`.
pub fn mask_codes(codes: ArrayView1<'_, f64>, keep: &[bool]) -> AtlasResult<Array1<f64>> {
    if codes.len() != keep.len() {
        return Err(AtlasError::MaskLength {
            codes: codes.len(),
            mask: keep.len(),
        });
    }
    Ok(codes
        .iter()
        .zip(keep)
        .map(|(&code, &kept)| if kept || code.is_nan() { code } else { 0.0 })
        .collect())
}
