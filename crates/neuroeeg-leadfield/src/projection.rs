// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Projection of region activity onto electrodes.

Activity rows must follow the column order of the reduced leadfield, i.e. the
ascending `unique_labels`. Use [`RegionLeadfield::column_of`] to realign data
indexed by region code.
*/

use ndarray::{Array2, ArrayView2};

use crate::downsample::{LooseRegionLeadfield, RegionLeadfield};
use crate::error::{LeadfieldError, LeadfieldResult};

fn check_activity_rows(n_regions: usize, activity: &ArrayView2<'_, f64>) -> LeadfieldResult<()> {
    if activity.nrows() != n_regions {
        return Err(LeadfieldError::DimensionMismatch {
            context: "activity rows vs. leadfield regions",
            expected: n_regions,
            actual: activity.nrows(),
        });
    }
    Ok(())
}

impl RegionLeadfield {
    /// Electrode signals (channels x time) from region activity (regions x time).
    pub fn project(&self, activity: ArrayView2<'_, f64>) -> LeadfieldResult<Array2<f64>> {
        check_activity_rows(self.n_regions(), &activity)?;
        Ok(self.leadfield.dot(&activity))
    }
}

impl LooseRegionLeadfield {
    /// Sum of the per-axis projections of x, y and z dipole activity.
    pub fn project(
        &self,
        activity_x: ArrayView2<'_, f64>,
        activity_y: ArrayView2<'_, f64>,
        activity_z: ArrayView2<'_, f64>,
    ) -> LeadfieldResult<Array2<f64>> {
        for activity in [&activity_x, &activity_y, &activity_z] {
            check_activity_rows(self.n_regions(), activity)?;
        }
        if activity_y.ncols() != activity_x.ncols() || activity_z.ncols() != activity_x.ncols() {
            return Err(LeadfieldError::DimensionMismatch {
                context: "time samples across orientation components",
                expected: activity_x.ncols(),
                actual: activity_y.ncols().max(activity_z.ncols()),
            });
        }

        let mut signals = self.x.dot(&activity_x);
        signals.scaled_add(1.0, &self.y.dot(&activity_y));
        signals.scaled_add(1.0, &self.z.dot(&activity_z));
        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_project_fixed() {
        let reduced = RegionLeadfield {
            unique_labels: array![1.0, 2.0],
            leadfield: array![[1.0, 0.0], [0.5, 2.0], [0.0, -1.0]],
        };
        let activity = array![[1.0, 2.0, 3.0], [10.0, 20.0, 30.0]];
        let signals = reduced.project(activity.view()).unwrap();
        assert_eq!(
            signals,
            array![[1.0, 2.0, 3.0], [20.5, 41.0, 61.5], [-10.0, -20.0, -30.0]]
        );
    }

    #[test]
    fn test_project_wrong_region_count() {
        let reduced = RegionLeadfield {
            unique_labels: array![1.0, 2.0],
            leadfield: array![[1.0, 0.0]],
        };
        let activity = array![[1.0, 2.0]];
        assert!(matches!(
            reduced.project(activity.view()),
            Err(LeadfieldError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_project_loose_sums_components() {
        let reduced = LooseRegionLeadfield {
            unique_labels: array![1.0],
            x: array![[1.0], [0.0]],
            y: array![[0.0], [1.0]],
            z: array![[1.0], [1.0]],
        };
        let ax = array![[1.0, 1.0]];
        let ay = array![[2.0, 2.0]];
        let az = array![[3.0, 0.0]];
        let signals = reduced.project(ax.view(), ay.view(), az.view()).unwrap();
        assert_eq!(signals, array![[4.0, 1.0], [5.0, 2.0]]);
    }
}
