// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region Projection Pipeline Tests

Runs forward solution -> atlas labeling -> leadfield reduction end to end
against a small synthetic atlas, covering:
- Fixed orientation: dipoles outside the atlas or in background are dropped
- Loose orientation: per-axis averaging
- Projection of region activity to electrodes
- Orientation mismatch between provider and head model
- Atlas loading through a configured directory and an injected volume reader
*/

use std::fs;
use std::path::Path;

use ndarray::{array, Array2, Array3};
use neuroeeg::prelude::*;
use neuroeeg::atlas::{AtlasResult, LabelVolume};

const IDENTITY: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// 10 x 10 x 10 grid at 1 mm: x < 5 is region 11, x >= 5 region 12, z == 9 background.
fn two_region_volume() -> Array3<i32> {
    Array3::from_shape_fn((10, 10, 10), |(x, _, z)| {
        if z == 9 {
            0
        } else if x < 5 {
            11
        } else {
            12
        }
    })
}

fn two_region_lut() -> LabelLut {
    LabelLut::from_entries([(11, "Left_Block"), (12, "Right_Block")])
}

fn projector() -> RegionProjector {
    let atlas = Atlas::new(two_region_volume(), IDENTITY, two_region_lut()).unwrap();
    let registry = AtlasRegistry::new().with_atlas(AtlasId::Aal2, atlas);
    RegionProjector::new(AtlasLabeler::new(registry), "aal2")
}

fn dipoles() -> Array2<f64> {
    array![
        [1.0, 1.0, 1.0],  // region 11
        [2.0, 3.0, 4.0],  // region 11
        [7.0, 1.0, 1.0],  // region 12
        [7.0, 1.0, 9.0],  // background
        [50.0, 1.0, 1.0], // outside the grid
    ]
}

#[test]
fn test_fixed_orientation_pipeline() {
    let leadfield = array![
        [1.0, 3.0, 10.0, 100.0, 1000.0],
        [2.0, 4.0, 20.0, 200.0, 2000.0],
    ];
    let provider = PrecomputedForwardModel::new(ForwardSolution {
        positions_mm: dipoles(),
        leadfield,
        orientation: SourceOrientation::Fixed,
    });

    let projection = projector()
        .build(&provider, &HeadModelConfig::default())
        .unwrap();

    assert_eq!(projection.labeling.found(), vec![true, true, true, true, false]);
    assert_eq!(projection.labeling.resolved_count(), 4);

    let RegionModel::Fixed(reduced) = &projection.model else {
        panic!("expected a fixed-orientation model");
    };
    assert_eq!(reduced.unique_labels, array![11.0, 12.0]);
    assert_eq!(reduced.leadfield, array![[2.0, 10.0], [3.0, 20.0]]);

    let activity = array![[1.0, 0.0], [0.0, 1.0]];
    let electrodes = reduced.project(activity.view()).unwrap();
    assert_eq!(electrodes, array![[2.0, 10.0], [3.0, 20.0]]);
}

#[test]
fn test_loose_orientation_pipeline() {
    // One channel, three columns per dipole: (x, y, z) = (d, 10d, 100d) for dipole d+1
    let leadfield = Array2::from_shape_fn((1, 15), |(_, col)| {
        let dipole = (col / 3 + 1) as f64;
        dipole * [1.0, 10.0, 100.0][col % 3]
    });
    let provider = PrecomputedForwardModel::new(ForwardSolution {
        positions_mm: dipoles(),
        leadfield,
        orientation: SourceOrientation::Loose,
    });
    let head_model = HeadModelConfig {
        orientation: SourceOrientation::Loose,
        ..HeadModelConfig::default()
    };

    let projection = projector().build(&provider, &head_model).unwrap();

    let RegionModel::Loose(reduced) = &projection.model else {
        panic!("expected a loose-orientation model");
    };
    assert_eq!(reduced.unique_labels, array![11.0, 12.0]);
    // region 11 = dipoles 1 and 2, region 12 = dipole 3
    assert_eq!(reduced.x, array![[1.5, 3.0]]);
    assert_eq!(reduced.y, array![[15.0, 30.0]]);
    assert_eq!(reduced.z, array![[150.0, 300.0]]);
}

#[test]
fn test_orientation_mismatch_is_reported() {
    let provider = PrecomputedForwardModel::new(ForwardSolution {
        positions_mm: dipoles(),
        leadfield: Array2::zeros((2, 5)),
        orientation: SourceOrientation::Fixed,
    });
    let head_model = HeadModelConfig {
        orientation: SourceOrientation::Loose,
        ..HeadModelConfig::default()
    };
    assert!(matches!(
        projector().build(&provider, &head_model),
        Err(NeuroEegError::ForwardModel(_))
    ));
}

#[test]
fn test_leadfield_dipole_mismatch_is_fatal() {
    let provider = PrecomputedForwardModel::new(ForwardSolution {
        positions_mm: dipoles(),
        leadfield: Array2::zeros((2, 4)),
        orientation: SourceOrientation::Fixed,
    });
    assert!(matches!(
        projector().build(&provider, &HeadModelConfig::default()),
        Err(NeuroEegError::Leadfield(_))
    ));
}

struct InMemoryVolume;

impl VolumeReader for InMemoryVolume {
    fn read_volume(&self, _path: &Path) -> AtlasResult<LabelVolume> {
        Ok(LabelVolume {
            codes: two_region_volume(),
            affine: IDENTITY,
        })
    }
}

#[test]
fn test_projector_from_configured_atlas_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AAL2.xml"),
        r#"<atlas><data>
             <label><index>11</index><name>Left_Block</name></label>
             <label><index>12</index><name>Right_Block</name></label>
           </data></atlas>"#,
    )
    .unwrap();

    let mut config = NeuroEegConfig::default();
    config.atlas.data_dir = dir.path().to_path_buf();

    let registry = AtlasLoader::new(config.atlas.clone())
        .load_registry(&InMemoryVolume)
        .unwrap();
    let projector = RegionProjector::from_config(registry, &config);

    let labeling = projector
        .labeler()
        .label(array![[7.0, 1.0, 1.0]].view(), "aal2")
        .unwrap();
    assert_eq!(labeling.acronyms(), vec!["Right_Block"]);
}
