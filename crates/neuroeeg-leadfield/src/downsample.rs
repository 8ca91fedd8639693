// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Leadfield downsampling - one column per atlas region instead of per dipole.

Label codes run parallel to the dipoles. `NaN` (dipole outside the atlas)
and `0` (non-brain tissue) are dropped; every other distinct code becomes one
output column holding the arithmetic mean of its dipoles' columns. Output
columns follow the ascending order of `unique_labels`.
*/

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use tracing::debug;

use crate::error::{LeadfieldError, LeadfieldResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of leadfield columns per dipole in the loose-orientation layout
pub const ORIENTATION_COMPONENTS: usize = 3;

/// Dipole indices sharing one region code
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub code: f64,
    pub dipoles: Vec<usize>,
}

/// Group dipole indices by valid region code, ascending by code.
pub fn region_groups(label_codes: ArrayView1<'_, f64>) -> Vec<RegionGroup> {
    let mut valid: Vec<(f64, usize)> = label_codes
        .iter()
        .enumerate()
        .filter(|(_, code)| !code.is_nan() && **code != 0.0)
        .map(|(idx, &code)| (code, idx))
        .collect();
    valid.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut groups: Vec<RegionGroup> = Vec::new();
    for (code, idx) in valid {
        match groups.last_mut() {
            Some(group) if group.code == code => group.dipoles.push(idx),
            _ => groups.push(RegionGroup {
                code,
                dipoles: vec![idx],
            }),
        }
    }
    groups
}

fn mean_into(mut out: ArrayViewMut1<'_, f64>, columns: ArrayView2<'_, f64>, dipoles: &[usize]) {
    for &idx in dipoles {
        out.scaled_add(1.0, &columns.column(idx));
    }
    let count = dipoles.len() as f64;
    out.mapv_inplace(|sum| sum / count);
}

/// Average `columns` (channels x dipoles) over each group.
fn average_groups(columns: ArrayView2<'_, f64>, groups: &[RegionGroup]) -> Array2<f64> {
    let mut reduced = Array2::<f64>::zeros((columns.nrows(), groups.len()));

    #[cfg(feature = "parallel")]
    reduced
        .axis_iter_mut(Axis(1))
        .into_par_iter()
        .zip(groups.par_iter())
        .for_each(|(out, group)| mean_into(out, columns, &group.dipoles));

    #[cfg(not(feature = "parallel"))]
    reduced
        .axis_iter_mut(Axis(1))
        .zip(groups.iter())
        .for_each(|(out, group)| mean_into(out, columns, &group.dipoles));

    reduced
}

fn unique_labels(groups: &[RegionGroup]) -> Array1<f64> {
    groups.iter().map(|g| g.code).collect()
}

/// Region-resolved leadfield for fixed-orientation sources
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLeadfield {
    /// Region code of each column, ascending, no `NaN` or `0`
    pub unique_labels: Array1<f64>,
    /// Channels x regions
    pub leadfield: Array2<f64>,
}

impl RegionLeadfield {
    pub fn n_channels(&self) -> usize {
        self.leadfield.nrows()
    }

    pub fn n_regions(&self) -> usize {
        self.unique_labels.len()
    }

    /// Column holding region `code`.
    pub fn column_of(&self, code: f64) -> Option<usize> {
        self.unique_labels
            .as_slice()
            .and_then(|labels| labels.binary_search_by(|l| l.total_cmp(&code)).ok())
    }
}

/// Region-resolved leadfield for loose-orientation sources, one matrix per axis
#[derive(Debug, Clone, PartialEq)]
pub struct LooseRegionLeadfield {
    pub unique_labels: Array1<f64>,
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

impl LooseRegionLeadfield {
    pub fn n_channels(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_regions(&self) -> usize {
        self.unique_labels.len()
    }

    /// Components in x, y, z order.
    pub fn components(&self) -> [&Array2<f64>; 3] {
        [&self.x, &self.y, &self.z]
    }
}

/// Reduce a channels x dipoles leadfield to channels x regions.
///
/// # Errors
///
/// `DimensionMismatch` if the column count differs from `label_codes.len()`.
pub fn downsample(
    leadfield: ArrayView2<'_, f64>,
    label_codes: ArrayView1<'_, f64>,
) -> LeadfieldResult<RegionLeadfield> {
    if leadfield.ncols() != label_codes.len() {
        return Err(LeadfieldError::DimensionMismatch {
            context: "leadfield columns vs. label codes",
            expected: label_codes.len(),
            actual: leadfield.ncols(),
        });
    }

    let groups = region_groups(label_codes);
    debug!(
        channels = leadfield.nrows(),
        dipoles = leadfield.ncols(),
        regions = groups.len(),
        "Downsampling fixed-orientation leadfield"
    );

    Ok(RegionLeadfield {
        unique_labels: unique_labels(&groups),
        leadfield: average_groups(leadfield, &groups),
    })
}

/// Reduce a loose-orientation leadfield, columns laid out `(d0x, d0y, d0z, d1x, ...)`.
///
/// `label_codes` has one entry per dipole, i.e. a third of the column count.
///
/// # Errors
///
/// `DimensionMismatch` if the column count is not a multiple of three or does
/// not match three times the number of labels.
pub fn downsample_loose_orientation(
    leadfield: ArrayView2<'_, f64>,
    label_codes: ArrayView1<'_, f64>,
) -> LeadfieldResult<LooseRegionLeadfield> {
    let n_columns = leadfield.ncols();
    if n_columns % ORIENTATION_COMPONENTS != 0 {
        return Err(LeadfieldError::DimensionMismatch {
            context: "leadfield columns must be a multiple of 3 for xyz components",
            expected: n_columns - n_columns % ORIENTATION_COMPONENTS,
            actual: n_columns,
        });
    }
    if n_columns / ORIENTATION_COMPONENTS != label_codes.len() {
        return Err(LeadfieldError::DimensionMismatch {
            context: "leadfield columns vs. 3 x label codes",
            expected: label_codes.len() * ORIENTATION_COMPONENTS,
            actual: n_columns,
        });
    }

    let groups = region_groups(label_codes);
    debug!(
        channels = leadfield.nrows(),
        dipoles = label_codes.len(),
        regions = groups.len(),
        "Downsampling loose-orientation leadfield"
    );

    let x = average_groups(leadfield.slice(s![.., 0..;3]), &groups);
    let y = average_groups(leadfield.slice(s![.., 1..;3]), &groups);
    let z = average_groups(leadfield.slice(s![.., 2..;3]), &groups);

    Ok(LooseRegionLeadfield {
        unique_labels: unique_labels(&groups),
        x,
        y,
        z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_region_groups_sorted_and_filtered() {
        let codes = array![3.0, 0.0, f64::NAN, 1.0, 3.0, -0.0, 2.0];
        let groups = region_groups(codes.view());
        assert_eq!(
            groups,
            vec![
                RegionGroup { code: 1.0, dipoles: vec![3] },
                RegionGroup { code: 2.0, dipoles: vec![6] },
                RegionGroup { code: 3.0, dipoles: vec![0, 4] },
            ]
        );
    }

    #[test]
    fn test_single_dipole_region_copies_column() {
        let leadfield = array![[1.0, 2.0], [3.0, 4.0]];
        let codes = array![5.0, 0.0];
        let reduced = downsample(leadfield.view(), codes.view()).unwrap();
        assert_eq!(reduced.unique_labels, array![5.0]);
        assert_eq!(reduced.leadfield, array![[1.0], [3.0]]);
    }

    #[test]
    fn test_column_of() {
        let leadfield = array![[1.0, 2.0, 3.0]];
        let codes = array![7002.0, 2001.0, 7001.0];
        let reduced = downsample(leadfield.view(), codes.view()).unwrap();
        assert_eq!(reduced.column_of(2001.0), Some(0));
        assert_eq!(reduced.column_of(7002.0), Some(2));
        assert_eq!(reduced.column_of(9999.0), None);
        assert_eq!(reduced.leadfield[[0, reduced.column_of(7002.0).unwrap()]], 1.0);
    }

    #[test]
    fn test_mismatch_fixed() {
        let leadfield = Array2::<f64>::zeros((4, 5));
        let codes = array![1.0, 2.0];
        assert!(matches!(
            downsample(leadfield.view(), codes.view()),
            Err(LeadfieldError::DimensionMismatch { expected: 2, actual: 5, .. })
        ));
    }

    #[test]
    fn test_mismatch_loose_not_multiple_of_three() {
        let leadfield = Array2::<f64>::zeros((4, 7));
        let codes = array![1.0, 2.0];
        assert!(matches!(
            downsample_loose_orientation(leadfield.view(), codes.view()),
            Err(LeadfieldError::DimensionMismatch { actual: 7, .. })
        ));
    }

    #[test]
    fn test_mismatch_loose_label_count() {
        let leadfield = Array2::<f64>::zeros((4, 9));
        let codes = array![1.0, 2.0];
        assert!(matches!(
            downsample_loose_orientation(leadfield.view(), codes.view()),
            Err(LeadfieldError::DimensionMismatch { expected: 6, actual: 9, .. })
        ));
    }
}
