//! End-to-end floor plan scenarios.

use planforge_draw::render::defaults::UTILITY_PALETTE;
use planforge_draw::render::envelope::{self, Envelope, WallAxis};
use planforge_draw::render::openings::{self, Edge, OpeningRules};
use planforge_draw::render::{Node, PassKind};
use planforge_draw::{
    Axis, ColumnMarker, DrawingError, FloorPlan, Layout, NumericError, Plot, RenderOptions,
    RoadSide, RoomRect, RoomType, TitleBlock, render_floor_plan, render_layout,
};

fn plot() -> Plot {
    Plot::rectangle(9.0, 12.0, RoadSide::South)
}

fn floor(rooms: Vec<RoomRect>) -> FloorPlan {
    FloorPlan::new(0, rooms, vec![])
}

fn texts(scene: &planforge_draw::Scene, kind: PassKind) -> Vec<String> {
    scene
        .nodes(kind)
        .iter()
        .filter_map(Node::as_text)
        .map(|t| t.content.clone())
        .collect()
}

#[test]
fn front_left_living_room() {
    let living = RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0);
    let grid = envelope::extract_walls(std::slice::from_ref(&living));
    assert_eq!(
        grid.envelope,
        Envelope {
            min_x: 0.0,
            max_x: 4.0,
            min_y: 0.0,
            max_y: 5.0,
        }
    );

    let placed = openings::place_openings(&living, &grid.envelope, 9.0, &OpeningRules::default());
    let edges: Vec<Edge> = placed.windows.iter().map(|w| w.edge).collect();
    assert!(edges.contains(&Edge::Left));
    assert!(edges.contains(&Edge::Front));
    assert_eq!(placed.door.map(|d| d.edge), Some(Edge::Front));

    let scene = render_floor_plan(&plot(), &floor(vec![living]), &RenderOptions::default()).unwrap();
    assert!(!scene.nodes(PassKind::Windows).is_empty());
    assert!(!scene.nodes(PassKind::Doors).is_empty());
}

#[test]
fn empty_floor_draws_plot_shell() {
    let scene = render_floor_plan(&plot(), &FloorPlan::default(), &RenderOptions::default()).unwrap();
    assert_eq!(scene.nodes(PassKind::PlotBoundary).len(), 1);
    assert!(!scene.nodes(PassKind::RoadStrip).is_empty());
    for kind in [
        PassKind::RoomFills,
        PassKind::InteriorWalls,
        PassKind::ExteriorWalls,
        PassKind::Windows,
        PassKind::Doors,
        PassKind::RoomLabels,
    ] {
        assert!(scene.nodes(kind).is_empty(), "{kind:?} should be empty");
    }
}

#[test]
fn unknown_room_type_uses_neutral_palette() {
    let room = RoomRect::new("r1", "Sauna", "sauna", 0.0, 0.0, 3.0, 3.0);
    let scene = render_floor_plan(&plot(), &floor(vec![room]), &RenderOptions::default()).unwrap();
    match &scene.nodes(PassKind::RoomFills)[0] {
        Node::Rect { style, .. } => assert_eq!(style.fill, Some(UTILITY_PALETTE.fill)),
        other => panic!("expected a rect, got {other:?}"),
    }
    // neither habitable nor utility
    assert!(scene.nodes(PassKind::Windows).is_empty());
    assert!(scene.nodes(PassKind::Doors).is_empty());
}

#[test]
fn toilet_gets_neither_window_nor_door() {
    let rooms = vec![
        RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 6.0, 5.0),
        RoomRect::new("r2", "Toilet", RoomType::Toilet, 6.0, 0.0, 2.0, 2.0),
    ];
    let env = Envelope::from_rooms(&rooms);
    let placed = openings::place_openings(&rooms[1], &env, 9.0, &OpeningRules::default());
    assert!(placed.windows.is_empty());
    assert!(placed.door.is_none());
}

#[test]
fn utility_gets_door_without_window() {
    let room = RoomRect::new("u1", "Utility", RoomType::Utility, 0.0, 0.0, 2.0, 3.0);
    let env = Envelope::from_rooms([&room]);
    let placed = openings::place_openings(&room, &env, 9.0, &OpeningRules::default());
    assert!(placed.windows.is_empty());
    assert_eq!(placed.door.map(|d| d.edge), Some(Edge::Front));
}

#[test]
fn one_door_even_with_several_exterior_sides() {
    let room = RoomRect::new("b1", "Bedroom", RoomType::Bedroom, 0.0, 0.0, 4.0, 4.0);
    let scene = render_floor_plan(&plot(), &floor(vec![room.clone()]), &RenderOptions::default()).unwrap();
    let env = Envelope::from_rooms([&room]);
    let placed = openings::place_openings(&room, &env, 9.0, &OpeningRules::default());
    assert_eq!(placed.windows.len(), 4);
    assert!(placed.door.is_some());
    // cut-out, leaf, swing arc
    assert_eq!(scene.nodes(PassKind::Doors).len(), 3);
}

#[test]
fn gap_equal_to_tolerance_is_not_exterior() {
    // 0.25 is exact in binary, so the rear gap below is exactly the tolerance
    let rooms = vec![
        RoomRect::new("a", "A", RoomType::Bedroom, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("b", "B", RoomType::Bedroom, 4.0, 0.0, 5.0, 5.25),
    ];
    let env = Envelope::from_rooms(&rooms);
    assert!(!openings::exterior_edges(&rooms[0], &env, 0.25).contains(&Edge::Rear));
    assert!(openings::exterior_edges(&rooms[0], &env, 0.5).contains(&Edge::Rear));
    assert!(openings::exterior_edges(&rooms[1], &env, 0.25).contains(&Edge::Rear));

    let rooms = vec![
        RoomRect::new("a", "A", RoomType::Bedroom, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("b", "B", RoomType::Bedroom, 4.0, 0.0, 5.0, 5.26),
    ];
    let env = Envelope::from_rooms(&rooms);
    assert!(!openings::exterior_edges(&rooms[0], &env, 0.25).contains(&Edge::Rear));
}

#[test]
fn shared_edge_becomes_one_interior_wall() {
    let rooms = vec![
        RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("r2", "Kitchen", RoomType::Kitchen, 4.0, 0.0, 3.0, 5.0),
    ];
    let grid = envelope::extract_walls(&rooms);
    assert_eq!(grid.interior_positions(WallAxis::Vertical), vec![4.0]);
    assert!(grid.interior_positions(WallAxis::Horizontal).is_empty());

    let scene = render_floor_plan(&plot(), &floor(rooms), &RenderOptions::default()).unwrap();
    // two faces of one wall
    assert_eq!(scene.nodes(PassKind::InteriorWalls).len(), 2);
}

#[test]
fn duplicate_columns_are_drawn_once() {
    let rooms = vec![RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0)];
    let columns = vec![
        ColumnMarker::new(0.0, 0.0),
        ColumnMarker::new(4.0, 5.0),
        ColumnMarker::new(4.0004, 5.0),
    ];
    let floor = FloorPlan::new(0, rooms, columns);
    let scene = render_floor_plan(&plot(), &floor, &RenderOptions::default()).unwrap();
    assert_eq!(scene.nodes(PassKind::Columns).len(), 2);
}

#[test]
fn small_rooms_lose_their_labels() {
    let rooms = vec![
        RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("r2", "Pooja", RoomType::Pooja, 4.0, 0.0, 0.5, 0.5),
    ];
    let options = RenderOptions {
        show_room_dimensions: true,
        ..RenderOptions::default()
    };
    let scene = render_floor_plan(&plot(), &floor(rooms), &options).unwrap();
    let labels = texts(&scene, PassKind::RoomLabels);
    assert!(labels.iter().any(|t| t == "Living"));
    assert!(!labels.iter().any(|t| t.contains("Pooja")));
    assert_eq!(texts(&scene, PassKind::RoomDimensions), vec!["4.00 × 5.00"]);
}

#[test]
fn degenerate_room_is_skipped() {
    let rooms = vec![
        RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("r2", "Ghost", RoomType::Bedroom, 4.0, 0.0, 0.0, 3.0),
    ];
    let scene = render_floor_plan(&plot(), &floor(rooms), &RenderOptions::default()).unwrap();
    assert_eq!(scene.nodes(PassKind::RoomFills).len(), 1);
}

#[test]
fn plot_dimensions_read_in_metres() {
    let scene = render_floor_plan(&plot(), &FloorPlan::default(), &RenderOptions::default()).unwrap();
    assert_eq!(texts(&scene, PassKind::PlotDimensions), vec!["9.00 m", "12.00 m"]);
}

#[test]
fn invalid_plots_are_rejected() {
    let opts = RenderOptions::default();
    let empty = FloorPlan::default();

    let err = render_floor_plan(&Plot::rectangle(0.0, 12.0, RoadSide::South), &empty, &opts).unwrap_err();
    assert_eq!(
        err,
        DrawingError::InvalidPlotDimension {
            axis: Axis::Width,
            value: 0.0,
            reason: NumericError::Zero,
        }
    );

    let err = render_floor_plan(&Plot::rectangle(9.0, -4.0, RoadSide::South), &empty, &opts).unwrap_err();
    assert!(matches!(
        err,
        DrawingError::InvalidPlotDimension {
            axis: Axis::Length,
            reason: NumericError::Negative,
            ..
        }
    ));

    let err = render_floor_plan(&Plot::rectangle(f64::NAN, 12.0, RoadSide::South), &empty, &opts).unwrap_err();
    assert!(matches!(
        err,
        DrawingError::InvalidPlotDimension {
            reason: NumericError::NaN,
            ..
        }
    ));

    let err = render_floor_plan(&Plot::trapezoid(0.0, 9.0, 12.0, RoadSide::South), &empty, &opts).unwrap_err();
    assert!(matches!(err, DrawingError::InvalidTrapezoid { .. }));
}

#[test]
fn canvas_too_small_for_reserved_strips() {
    let opts = RenderOptions::default().with_canvas(200.0, 150.0);
    let err = render_floor_plan(&plot(), &FloorPlan::default(), &opts).unwrap_err();
    assert!(matches!(err, DrawingError::CanvasTooSmall { .. }));
}

#[test]
fn layout_renders_every_floor() {
    let layout = Layout {
        id: "L1".to_string(),
        name: "Compact 2BHK".to_string(),
        floors: vec![
            floor(vec![RoomRect::new("g1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0)]),
            FloorPlan::new(
                1,
                vec![RoomRect::new("f1", "Bedroom", RoomType::Bedroom, 0.0, 0.0, 4.0, 4.0)],
                vec![],
            ),
        ],
    };
    let options = RenderOptions::default().with_title(TitleBlock {
        project: "Plot 42".to_string(),
        ..TitleBlock::default()
    });
    let scenes = render_layout(&plot(), &layout, &options).unwrap();
    assert_eq!(scenes.len(), 2);

    let first = texts(&scenes[0], PassKind::TitleBlock);
    assert!(first.iter().any(|t| t == "Compact 2BHK"));
    assert!(first.iter().any(|t| t == "Ground Floor"));
    let second = texts(&scenes[1], PassKind::TitleBlock);
    assert!(second.iter().any(|t| t == "First Floor"));
}

#[test]
fn rendering_is_deterministic() {
    let rooms = vec![
        RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0),
        RoomRect::new("r2", "Kitchen", RoomType::Kitchen, 4.0, 0.0, 3.0, 5.0),
        RoomRect::new("r3", "Bedroom", RoomType::Bedroom, 0.0, 5.0, 7.0, 4.0),
    ];
    let options = RenderOptions {
        show_structural_grid: true,
        infer_columns: true,
        ..RenderOptions::default()
    };
    let a = render_floor_plan(&plot(), &floor(rooms.clone()), &options).unwrap();
    let b = render_floor_plan(&plot(), &floor(rooms), &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());
}
