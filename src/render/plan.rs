//! Floor plan composition.
//!
//! Passes are appended in a fixed order so later layers paint over earlier
//! ones: walls over room fills, labels over walls, annotations last.

use glam::{DVec2, dvec2};

use crate::errors::DrawingError;
use crate::model::{ColumnMarker, FloorPlan, Layout, Plot, PlotShape, RoomRect, TitleBlock};
use crate::types::Metres;

use super::RenderOptions;
use super::annotations::{
    Annotation, DimensionLine, GridBubble, NorthArrow, RoomCaption, RoomLabel, ScaleBar, TitleStrip,
    draw_all, grid_letter,
};
use super::context::DrawContext;
use super::defaults;
use super::envelope::{self, Envelope, WallAxis, WallGrid};
use super::openings;
use super::scene::{Node, PassKind, Scene, Style, TextNode};
use super::viewport::ViewportTransform;

/// Render one floor of a plot into a scene.
///
/// Plot and canvas are validated before any node is produced. An empty room
/// list renders the plot shell only.
pub fn render_floor_plan(
    plot: &Plot,
    floor: &FloorPlan,
    options: &RenderOptions,
) -> Result<Scene, DrawingError> {
    let (width, length) = plot.extents()?;
    let viewport = ViewportTransform::fit(width.raw(), length.raw(), &options.canvas(plot))?;
    let ctx = DrawContext::new(viewport, &options.theme)
        .with_labels(options.labels)
        .with_wall_thickness(options.exterior_wall);

    let rooms = envelope::drawable_rooms(&floor.rooms);
    let grid = envelope::extract_walls(&floor.rooms);
    let env = grid.envelope;

    let mut windows: Vec<Annotation> = Vec::new();
    let mut doors: Vec<Annotation> = Vec::new();
    for room in &rooms {
        let placed = openings::place_openings(room, &env, plot.width, &options.openings);
        windows.extend(placed.windows.into_iter().map(Annotation::from));
        doors.extend(placed.door.map(Annotation::from));
    }

    let columns = if floor.columns.is_empty() && options.infer_columns {
        envelope::infer_columns(&floor.rooms)
    } else {
        envelope::dedup_columns(&floor.columns)
    };

    crate::log::debug!(
        level = floor.level,
        rooms = rooms.len(),
        skipped = floor.rooms.len() - rooms.len(),
        windows = windows.len(),
        doors = doors.len(),
        columns = columns.len(),
        "rendering floor plan"
    );

    let plan = PlanParts {
        plot,
        floor,
        options,
        ctx,
        rooms,
        grid,
    };

    let mut scene = Scene::new(options.canvas_width, options.canvas_height);
    scene.push_pass(PassKind::Background, plan.background());
    scene.push_pass(PassKind::RoadStrip, plan.road_strip());
    scene.push_pass(PassKind::PlotBoundary, plan.plot_boundary());
    if options.show_structural_grid {
        scene.push_pass(PassKind::StructuralGrid, plan.structural_grid());
    }
    scene.push_pass(PassKind::RoomFills, plan.room_fills());
    scene.push_pass(PassKind::InteriorWalls, plan.interior_walls());
    scene.push_pass(PassKind::ExteriorWalls, plan.exterior_walls());
    scene.push_pass(PassKind::Windows, draw_all(&windows, &ctx));
    scene.push_pass(PassKind::Doors, draw_all(&doors, &ctx));
    scene.push_pass(PassKind::Columns, plan.columns(&columns));
    scene.push_pass(PassKind::RoomLabels, draw_all(&plan.room_labels(), &ctx));
    if options.show_room_dimensions {
        scene.push_pass(PassKind::RoomDimensions, draw_all(&plan.room_captions(), &ctx));
    }
    for (kind, symbols) in plan.sheet_annotations() {
        scene.push_pass(kind, draw_all(&symbols, &ctx));
    }
    Ok(scene)
}

/// Render every floor of a layout, in floor order.
///
/// When a title block is configured its layout field falls back to the
/// layout's name.
pub fn render_layout(
    plot: &Plot,
    layout: &Layout,
    options: &RenderOptions,
) -> Result<Vec<Scene>, DrawingError> {
    let mut options = options.clone();
    if let Some(title) = options.title.as_mut() {
        if title.layout.is_empty() {
            title.layout = layout.name.clone();
        }
    }
    layout
        .floors
        .iter()
        .map(|floor| render_floor_plan(plot, floor, &options))
        .collect()
}

/// Borrowed inputs for one plan render
struct PlanParts<'a> {
    plot: &'a Plot,
    floor: &'a FloorPlan,
    options: &'a RenderOptions,
    ctx: DrawContext<'a>,
    rooms: Vec<&'a RoomRect>,
    grid: WallGrid,
}

impl PlanParts<'_> {
    fn vp(&self) -> &ViewportTransform {
        &self.ctx.viewport
    }

    fn road_top(&self) -> f64 {
        self.vp().bottom() + self.options.road_gap
    }

    fn background(&self) -> Vec<Node> {
        vec![Node::rect(
            DVec2::ZERO,
            dvec2(self.options.canvas_width, self.options.canvas_height),
            Style::filled(self.ctx.theme.ink.background),
        )]
    }

    fn road_strip(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let vp = self.vp();
        let top = self.road_top();
        let h = self.options.road_strip_height;
        let mut label = format!("ROAD ({})", self.plot.road_side.letter());
        if let Some(w) = self.plot.road_width.filter(|w| w.is_finite() && *w > 0.0) {
            label.push_str(&format!(" · {} wide", Metres(w)));
        }
        vec![
            Node::rect(
                dvec2(vp.origin_x(), top),
                dvec2(vp.draw_width(), h),
                Style::filled(ink.road).with_stroke(ink.rule, 0.8),
            ),
            TextNode::new(
                dvec2(vp.origin_x() + vp.draw_width() / 2.0, top + h / 2.0 + 3.0),
                label,
                8.0,
                ink.muted,
            )
            .bold()
            .into(),
        ]
    }

    fn plot_boundary(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let points = self.plot.outline().iter().map(|p| self.vp().to_screen(*p)).collect();
        vec![Node::polygon(points, Style::stroked(ink.muted, 1.0).dashed(6.0, 3.0))]
    }

    fn structural_grid(&self) -> Vec<Node> {
        let env = &self.grid.envelope;
        if env.is_empty() {
            return Vec::new();
        }
        let vp = self.vp();
        let ink = &self.ctx.theme.ink;
        let line = Style::stroked(ink.grid, 0.6).dashed(8.0, 3.0);
        let reach = 40.0;
        let top = vp.origin_y() - reach;
        let left = vp.origin_x() - reach;
        let r = defaults::GRID_BUBBLE_RADIUS_PX;

        let mut nodes = Vec::new();
        let mut bubbles: Vec<Annotation> = Vec::new();
        for (i, &x) in self.grid.xs.iter().enumerate() {
            let sx = vp.to_screen_x(x);
            nodes.push(Node::line(
                dvec2(sx, top + r),
                dvec2(sx, vp.to_screen_y(env.min_y)),
                line,
            ));
            bubbles.push(
                GridBubble {
                    center: dvec2(sx, top),
                    label: grid_letter(i),
                }
                .into(),
            );
        }
        for (i, &y) in self.grid.ys.iter().enumerate() {
            let sy = vp.to_screen_y(y);
            nodes.push(Node::line(
                dvec2(left + r, sy),
                dvec2(vp.to_screen_x(env.max_x), sy),
                line,
            ));
            bubbles.push(
                GridBubble {
                    center: dvec2(left, sy),
                    label: (i + 1).to_string(),
                }
                .into(),
            );
        }
        nodes.extend(draw_all(&bubbles, &self.ctx));
        nodes
    }

    fn room_fills(&self) -> Vec<Node> {
        self.rooms
            .iter()
            .map(|room| {
                let palette = self.ctx.theme.room(&room.room_type);
                let (origin, size) = self.vp().rect(room.x, room.y, room.width, room.depth);
                Node::rect(origin, size, Style::filled(palette.fill).with_stroke(palette.stroke, 0.5))
            })
            .collect()
    }

    fn interior_walls(&self) -> Vec<Node> {
        let vp = self.vp();
        let style = Style::stroked(self.ctx.theme.ink.wall, 0.8);
        let half = self.options.interior_wall / 2.0;
        let mut nodes = Vec::new();
        for line in &self.grid.interior {
            for &(start, end) in &line.spans {
                for side in [-half, half] {
                    let p = line.position + side;
                    let (a, b) = match line.axis {
                        WallAxis::Vertical => (dvec2(p, start), dvec2(p, end)),
                        WallAxis::Horizontal => (dvec2(start, p), dvec2(end, p)),
                    };
                    nodes.push(Node::line(vp.to_screen(a), vp.to_screen(b), style));
                }
            }
        }
        nodes
    }

    fn exterior_walls(&self) -> Vec<Node> {
        let env = &self.grid.envelope;
        if env.is_empty() {
            return Vec::new();
        }
        let ink = &self.ctx.theme.ink;
        let (outer, inner) = envelope::exterior_faces(env, self.options.exterior_wall);
        let mut nodes = vec![self.envelope_rect(&outer, Style::stroked(ink.wall, 1.6))];
        // a wall thicker than the building has no inner face
        if !inner.is_empty() {
            nodes.push(self.envelope_rect(&inner, Style::stroked(ink.wall, 0.8)));
        }
        nodes
    }

    fn envelope_rect(&self, env: &Envelope, style: Style) -> Node {
        Node::rect_between(self.vp().to_screen(env.min()), self.vp().to_screen(env.max()), style)
    }

    fn columns(&self, columns: &[ColumnMarker]) -> Vec<Node> {
        let half = self.options.column_size / 2.0;
        let style = Style::filled(self.ctx.theme.ink.column);
        columns
            .iter()
            .map(|c| {
                let a = self.vp().to_screen(dvec2(c.x - half, c.y - half));
                let b = self.vp().to_screen(dvec2(c.x + half, c.y + half));
                Node::rect_between(a, b, style)
            })
            .collect()
    }

    fn room_labels(&self) -> Vec<Annotation> {
        self.rooms.iter().map(|r| RoomLabel::new(r).into()).collect()
    }

    fn room_captions(&self) -> Vec<Annotation> {
        self.rooms.iter().map(|r| RoomCaption::new(r).into()).collect()
    }

    /// Dimensions, north arrow, scale bar and title block, one pass each
    fn sheet_annotations(&self) -> Vec<(PassKind, Vec<Annotation>)> {
        let mut passes: Vec<(PassKind, Vec<Annotation>)> = vec![
            (PassKind::PlotDimensions, self.plot_dimensions()),
            (PassKind::NorthArrow, vec![self.north_arrow().into()]),
            (PassKind::ScaleBar, vec![self.scale_bar().into()]),
        ];
        if let Some(title) = &self.options.title {
            passes.push((PassKind::TitleBlock, vec![self.title_block(title).into()]));
        }
        passes
    }

    fn plot_dimensions(&self) -> Vec<Annotation> {
        let outline = self.plot.outline();
        let (rear_left, rear_right) = (outline[3], outline[2]);
        let offset = -defaults::DIMENSION_OFFSET_PX;
        let rear = DimensionLine::horizontal(rear_left.x, rear_right.x, self.plot.length, offset);
        let mut dims = Vec::new();
        match self.plot.shape {
            PlotShape::Rectangle => dims.push(rear),
            PlotShape::Trapezoid { front_width, rear_width } => {
                dims.push(rear.with_text(format!("{} rear", Metres(rear_width))));
                // front edge sits on the road side, in its own row under the road strip
                let below = self.options.road_gap + self.options.road_strip_height + 6.0;
                dims.push(
                    DimensionLine::horizontal(0.0, front_width, 0.0, below)
                        .with_text(format!("{} front", Metres(front_width))),
                );
            }
        }
        dims.push(DimensionLine::vertical(0.0, self.plot.length, 0.0, offset));

        let env = &self.grid.envelope;
        if !env.is_empty() {
            // built extent, measured inside the plot lines
            let inset = defaults::DIMENSION_OFFSET_PX * defaults::ENVELOPE_DIMENSION_RATIO;
            dims.push(DimensionLine::horizontal(env.min_x, env.max_x, env.max_y, inset));
            dims.push(DimensionLine::vertical(env.min_y, env.max_y, env.max_x, inset));
        }
        dims.into_iter().map(Annotation::from).collect()
    }

    fn north_arrow(&self) -> NorthArrow {
        let vp = self.vp();
        let r = defaults::NORTH_ARROW_RADIUS_PX;
        let x = (vp.origin_x() + vp.draw_width() + self.options.padding / 2.0)
            .min(self.options.canvas_width - r - 4.0);
        NorthArrow {
            center: dvec2(x, vp.origin_y() + r + 10.0),
            radius: r,
            rotation: self.ctx.theme.north_rotation(self.plot.road_side),
        }
    }

    fn scale_bar(&self) -> ScaleBar {
        let below_road =
            self.road_top() + self.options.road_strip_height + self.options.front_row(self.plot);
        ScaleBar {
            origin: dvec2(self.vp().origin_x(), below_road + 18.0),
            length: self.options.scale_bar_length,
        }
    }

    fn title_block(&self, title: &TitleBlock) -> TitleStrip {
        let ratio = self.vp().scale().ratio(defaults::MM_PER_PX).round();
        let mut cells = vec![
            ("Project".to_string(), title.project.clone()),
            ("Layout".to_string(), title.layout.clone()),
            ("Floor".to_string(), self.floor.label()),
            (
                "Plot".to_string(),
                format!("{:.2} × {:.2} m", self.plot.width, self.plot.length),
            ),
            ("Scale".to_string(), format!("1:{ratio}")),
        ];
        if let Some(config) = &title.config {
            cells.push(("Configuration".to_string(), config.clone()));
        }
        if let Some(date) = &title.date {
            cells.push(("Date".to_string(), date.clone()));
        }
        let margin = 10.0;
        let h = self.options.title_block_height;
        TitleStrip {
            origin: dvec2(margin, self.options.canvas_height - h - margin),
            size: dvec2(self.options.canvas_width - 2.0 * margin, h),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadSide;
    use crate::render::scene::Color;

    fn living_only() -> FloorPlan {
        FloorPlan::new(
            0,
            vec![RoomRect::new("r1", "Living", "living", 0.0, 0.0, 4.0, 5.0)],
            vec![],
        )
    }

    #[test]
    fn passes_follow_paint_order() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let scene = render_floor_plan(&plot, &living_only(), &RenderOptions::default()).unwrap();
        assert_eq!(
            scene.pass_order(),
            vec![
                PassKind::Background,
                PassKind::RoadStrip,
                PassKind::PlotBoundary,
                PassKind::RoomFills,
                PassKind::InteriorWalls,
                PassKind::ExteriorWalls,
                PassKind::Windows,
                PassKind::Doors,
                PassKind::Columns,
                PassKind::RoomLabels,
                PassKind::PlotDimensions,
                PassKind::NorthArrow,
                PassKind::ScaleBar,
            ]
        );
    }

    #[test]
    fn optional_passes_slot_in_place() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let options = RenderOptions {
            show_structural_grid: true,
            show_room_dimensions: true,
            ..RenderOptions::default()
        }
        .with_title(TitleBlock {
            project: "Villa".into(),
            ..TitleBlock::default()
        });
        let scene = render_floor_plan(&plot, &living_only(), &options).unwrap();
        let order = scene.pass_order();
        let pos = |k| order.iter().position(|p| *p == k).unwrap();
        assert!(pos(PassKind::StructuralGrid) < pos(PassKind::RoomFills));
        assert_eq!(pos(PassKind::RoomDimensions), pos(PassKind::RoomLabels) + 1);
        assert_eq!(order.last(), Some(&PassKind::TitleBlock));
    }

    #[test]
    fn road_label_carries_side_and_width() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::East).with_road_width(9.0);
        let scene = render_floor_plan(&plot, &FloorPlan::default(), &RenderOptions::default()).unwrap();
        let label = scene
            .nodes(PassKind::RoadStrip)
            .iter()
            .find_map(Node::as_text)
            .unwrap();
        assert_eq!(label.content, "ROAD (E) · 9.00 m wide");
    }

    #[test]
    fn road_strip_sits_below_the_plot() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let scene = render_floor_plan(&plot, &FloorPlan::default(), &RenderOptions::default()).unwrap();
        let Node::Rect { origin, size, .. } = &scene.nodes(PassKind::RoadStrip)[0] else {
            panic!("road strip is a rect");
        };
        let Node::Polygon { points, .. } = &scene.nodes(PassKind::PlotBoundary)[0] else {
            panic!("plot boundary is a polygon");
        };
        let plot_bottom = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!(origin.y > plot_bottom);
        assert!(origin.y + size.y <= 600.0);
    }

    #[test]
    fn room_fill_uses_palette_with_fallback() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let floor = FloorPlan::new(
            0,
            vec![RoomRect::new("x", "Sauna", "sauna", 0.0, 0.0, 3.0, 3.0)],
            vec![],
        );
        let scene = render_floor_plan(&plot, &floor, &RenderOptions::default()).unwrap();
        let Node::Rect { style, .. } = &scene.nodes(PassKind::RoomFills)[0] else {
            panic!("room fill is a rect");
        };
        assert_eq!(style.fill, Some(Color::hex(0xF8FAFC)));
    }

    #[test]
    fn interior_walls_are_double_lines() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let floor = FloorPlan::new(
            0,
            vec![
                RoomRect::new("a", "Living", "living", 0.0, 0.0, 4.0, 5.0),
                RoomRect::new("b", "Kitchen", "kitchen", 4.0, 0.0, 3.0, 5.0),
            ],
            vec![],
        );
        let scene = render_floor_plan(&plot, &floor, &RenderOptions::default()).unwrap();
        assert_eq!(scene.nodes(PassKind::InteriorWalls).len(), 2);
        assert_eq!(scene.nodes(PassKind::ExteriorWalls).len(), 2);
    }

    #[test]
    fn inferred_columns_only_when_none_supplied() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let options = RenderOptions {
            infer_columns: true,
            ..RenderOptions::default()
        };
        let scene = render_floor_plan(&plot, &living_only(), &options).unwrap();
        assert_eq!(scene.nodes(PassKind::Columns).len(), 4);

        let mut floor = living_only();
        floor.columns = vec![ColumnMarker::new(0.0, 0.0)];
        let scene = render_floor_plan(&plot, &floor, &options).unwrap();
        assert_eq!(scene.nodes(PassKind::Columns).len(), 1);
    }

    #[test]
    fn layout_renders_each_floor_with_titles() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let layout = Layout {
            id: "L1".into(),
            name: "Compact".into(),
            floors: vec![living_only(), FloorPlan::new(1, vec![], vec![])],
        };
        let options = RenderOptions::default().with_title(TitleBlock {
            project: "Villa".into(),
            date: Some("2026-10-18".into()),
            ..TitleBlock::default()
        });
        let scenes = render_layout(&plot, &layout, &options).unwrap();
        assert_eq!(scenes.len(), 2);
        let texts: Vec<&str> = scenes[1]
            .nodes(PassKind::TitleBlock)
            .iter()
            .filter_map(Node::as_text)
            .map(|t| t.content.as_str())
            .collect();
        assert!(texts.contains(&"Compact"));
        assert!(texts.contains(&"First Floor"));
        assert!(texts.contains(&"2026-10-18"));
        assert!(texts.iter().any(|t| t.starts_with("1:")));
    }

    #[test]
    fn trapezoid_outline_interpolates_widths() {
        let plot = Plot::trapezoid(9.0, 11.0, 15.0, RoadSide::South);
        let scene = render_floor_plan(&plot, &FloorPlan::default(), &RenderOptions::default()).unwrap();
        let Node::Polygon { points, .. } = &scene.nodes(PassKind::PlotBoundary)[0] else {
            panic!("plot boundary is a polygon");
        };
        assert_eq!(points.len(), 4);
        // front edge is shorter than the rear edge on screen
        assert!((points[1].x - points[0].x) < (points[2].x - points[3].x));
        // trapezoids get a third dimension for the front edge
        let dims = scene.nodes(PassKind::PlotDimensions);
        assert_eq!(dims.iter().filter_map(Node::as_text).count(), 3);
    }

    fn dimension_texts(scene: &Scene) -> Vec<&TextNode> {
        scene
            .nodes(PassKind::PlotDimensions)
            .iter()
            .filter_map(Node::as_text)
            .collect()
    }

    #[test]
    fn built_extent_is_dimensioned_inside_the_plot_lines() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let scene = render_floor_plan(&plot, &living_only(), &RenderOptions::default()).unwrap();
        let texts = dimension_texts(&scene);
        let content: Vec<&str> = texts.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(content, vec!["9.00 m", "12.00 m", "4.00 m", "5.00 m"]);
        // plot width reads above the rear line, built width below it
        assert!(texts[2].position.y > texts[0].position.y);

        let empty = render_floor_plan(&plot, &FloorPlan::default(), &RenderOptions::default()).unwrap();
        assert_eq!(dimension_texts(&empty).len(), 2);
    }

    #[test]
    fn trapezoid_front_dimension_has_its_own_row() {
        let plot = Plot::trapezoid(9.0, 11.0, 15.0, RoadSide::South);
        let scene = render_floor_plan(&plot, &living_only(), &RenderOptions::default()).unwrap();
        let front = dimension_texts(&scene)
            .into_iter()
            .find(|t| t.content == "9.00 m front")
            .unwrap();
        let scale = scene
            .nodes(PassKind::ScaleBar)
            .iter()
            .find_map(Node::as_text)
            .unwrap();
        let Node::Rect { origin, size, .. } = &scene.nodes(PassKind::RoadStrip)[0] else {
            panic!("road strip is a rect");
        };
        assert!(front.position.y - front.font_size > origin.y + size.y);
        assert!(scale.position.y - scale.font_size > front.position.y);
        assert!(dimension_texts(&scene).iter().any(|t| t.content == "11.00 m rear"));
    }
}
