// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Physical-to-voxel back-projection.

A point `p` in millimetres is homogenised to `[x, y, z, 1]` and mapped through
the inverse affine. The raw voxel coordinate `v` is then snapped per axis as

```text
v_rounded[a] = round(inv[a][a] * v[a]) * affine[a][a]
```

using round-half-to-even, and truncated toward zero to an integer index.

NOTE: this snapping only coincides with plain rounding of `v` when the
affine is diagonal (axis-aligned grid, no rotation or shear), which holds for
the AAL2 reference atlas. For rotated or sheared grids the result is *not* a
general nearest-voxel lookup.
*/

use nalgebra::Matrix4;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};

/// Diagonal of the leading 3x3 block.
fn spatial_diagonal(m: &Matrix4<f64>) -> Array1<f64> {
    Array1::from_iter((0..3).map(|a| m[(a, a)]))
}

/// Back-project a batch of `N x 3` physical points to snapped voxel coordinates.
///
/// The whole batch goes through one matrix product; the returned array is
/// `N x 3` and still floating point.
pub fn backproject_batch(
    points: ArrayView2<'_, f64>,
    affine: &Matrix4<f64>,
    affine_inverse: &Matrix4<f64>,
) -> Array2<f64> {
    let n_points = points.len_of(Axis(0));

    let mut homogeneous = Array2::<f64>::ones((n_points, 4));
    homogeneous.slice_mut(s![.., 0..3]).assign(&points);

    let inverse = Array2::from_shape_fn((4, 4), |(r, c)| affine_inverse[(r, c)]);
    let projected = homogeneous.dot(&inverse.t());

    let mut snapped = projected.slice(s![.., 0..3]).to_owned();
    snapped.zip_mut_with(&spatial_diagonal(affine_inverse), |v, &scale| *v *= scale);
    snapped.mapv_inplace(f64::round_ties_even);
    snapped.zip_mut_with(&spatial_diagonal(affine), |v, &scale| *v *= scale);
    snapped
}

/// Convert a snapped voxel coordinate into an index inside `dims`.
///
/// Components are truncated toward zero. Returns `None` when any axis is
/// non-finite, negative or beyond the grid.
pub fn voxel_index(snapped: [f64; 3], dims: (usize, usize, usize)) -> Option<[usize; 3]> {
    let extents = [dims.0, dims.1, dims.2];
    let mut index = [0usize; 3];
    for a in 0..3 {
        let value = snapped[a].trunc();
        if !value.is_finite() || value < 0.0 || value >= extents[a] as f64 {
            return None;
        }
        index[a] = value as usize;
    }
    Some(index)
}
