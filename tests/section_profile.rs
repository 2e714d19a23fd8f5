//! Building section scenarios.

use planforge_draw::render::path_builder::PathCommand;
use planforge_draw::render::section::{Level, SectionProfile, format_elevation};
use planforge_draw::render::{Node, PassKind};
use planforge_draw::{DrawingError, NumericError, SectionOptions, render_section};

fn elevation_labels(scene: &planforge_draw::Scene) -> Vec<String> {
    scene
        .nodes(PassKind::ElevationCallouts)
        .iter()
        .filter_map(Node::as_text)
        .map(|t| t.content.clone())
        .collect()
}

#[test]
fn nine_metre_building_levels() {
    let options = SectionOptions::default();
    let profile = SectionProfile::new(9.0, &options).unwrap();
    let levels: Vec<Level> = profile.levels().iter().map(|(l, _)| *l).collect();
    assert_eq!(levels, Level::ALL.to_vec());

    let scene = render_section(9.0, &options).unwrap();
    insta::assert_snapshot!(elevation_labels(&scene).join("\n"), @r"
    -0.60
    ±0.00
    +3.00
    +3.15
    +6.15
    +6.30
    +7.30
    ");
}

#[test]
fn staircase_has_one_segment_pair_per_step() {
    let options = SectionOptions::default();
    let scene = render_section(9.0, &options).unwrap();
    let path = scene
        .nodes(PassKind::Staircase)
        .iter()
        .find_map(|n| match n {
            Node::Path { data, .. } => Some(data.clone()),
            _ => None,
        })
        .expect("staircase path");

    let (runs, rises) = path.axis_segment_counts();
    assert_eq!(runs, options.stair_steps);
    assert_eq!(rises, options.stair_steps);
    assert!(matches!(path.commands()[0], PathCommand::MoveTo(_)));
}

#[test]
fn custom_riser_and_tread_are_respected() {
    let options = SectionOptions {
        stair_steps: 10,
        stair_riser: 0.3,
        stair_tread: 0.3,
        ..SectionOptions::default()
    };
    let profile = SectionProfile::new(9.0, &options).unwrap();
    let stair = profile.stair_profile(&options).unwrap();
    assert_eq!(stair.steps.len(), 10);
    assert!(stair.steps.iter().all(|s| s.riser == 0.3 && s.tread == 0.3));
}

#[test]
fn section_pass_order() {
    let scene = render_section(9.0, &SectionOptions::default()).unwrap();
    assert_eq!(
        scene.pass_order(),
        vec![
            PassKind::Background,
            PassKind::Footings,
            PassKind::GroundHatch,
            PassKind::SectionWalls,
            PassKind::FloorSlab,
            PassKind::RoofSlab,
            PassKind::Parapets,
            PassKind::Staircase,
            PassKind::GroundLine,
            PassKind::ElevationCallouts,
            PassKind::FloorHeights,
            PassKind::Zones,
            PassKind::WidthDimension,
            PassKind::Caption,
        ]
    );
}

#[test]
fn width_dimension_and_floor_heights() {
    let scene = render_section(9.0, &SectionOptions::default()).unwrap();
    let width: Vec<&str> = scene
        .nodes(PassKind::WidthDimension)
        .iter()
        .filter_map(Node::as_text)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(width, vec!["9.00 m"]);

    let heights: Vec<&str> = scene
        .nodes(PassKind::FloorHeights)
        .iter()
        .filter_map(Node::as_text)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(heights, vec!["3.00 m", "3.00 m", "1.00 m"]);
}

#[test]
fn zero_width_is_rejected() {
    let err = render_section(0.0, &SectionOptions::default()).unwrap_err();
    assert_eq!(
        err,
        DrawingError::InvalidBuildingWidth {
            value: 0.0,
            reason: NumericError::Zero,
        }
    );
}

#[test]
fn section_dimensions_are_validated_before_the_viewport() {
    let cases = [
        (
            SectionOptions { parapet_height: -20.0, ..SectionOptions::default() },
            "parapet height",
            NumericError::Negative,
        ),
        (
            SectionOptions { slab_thickness: 0.0, ..SectionOptions::default() },
            "slab thickness",
            NumericError::Zero,
        ),
        (
            SectionOptions { first_floor_height: f64::INFINITY, ..SectionOptions::default() },
            "first floor height",
            NumericError::Infinite,
        ),
        (
            SectionOptions { foundation_depth: -0.6, ..SectionOptions::default() },
            "foundation depth",
            NumericError::Negative,
        ),
    ];
    for (options, expected, expected_reason) in cases {
        match render_section(9.0, &options) {
            Err(DrawingError::InvalidSectionDimension { dimension, reason, .. }) => {
                assert_eq!(dimension, expected);
                assert_eq!(reason, expected_reason);
            }
            other => panic!("{expected}: unexpected {other:?}"),
        }
    }
}

#[test]
fn ground_datum_reads_plus_minus_zero() {
    assert_eq!(format_elevation(0.0), "±0.00");
    assert_eq!(format_elevation(-0.0), "±0.00");
}
