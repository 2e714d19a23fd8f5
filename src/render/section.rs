//! Building section composition.
//!
//! The section is driven by fixed architectural constants plus one building
//! width. Elevations accumulate from the ground datum; the world frame puts
//! the foundation base at y = 0 so the shared viewport maps it to the bottom
//! of the drawing area.

use glam::dvec2;

use crate::errors::DrawingError;
use crate::model::RoomType;
use crate::types::Metres;

use super::annotations::{Annotation, DimensionLine, draw_all};
use super::context::DrawContext;
use super::defaults::{self, Theme};
use super::path_builder::{PathData, StepPathBuilder, StepProfile};
use super::scene::{Node, PassKind, Scene, Style, TextAnchor, TextNode};
use super::viewport::{Canvas, ViewportTransform};

/// Canvas and architectural constants for the section view
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub padding: f64,
    /// Strip kept free at the bottom for the caption
    pub caption_strip: f64,
    pub ground_floor_height: f64,
    pub first_floor_height: f64,
    pub slab_thickness: f64,
    pub parapet_height: f64,
    pub foundation_depth: f64,
    pub wall_thickness: f64,
    pub stair_steps: usize,
    pub stair_riser: f64,
    pub stair_tread: f64,
    /// Steps smaller than this many pixels are not drawn
    pub step_visibility_px: f64,
    pub caption: String,
    pub theme: Theme,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            canvas_width: defaults::SECTION_CANVAS_WIDTH,
            canvas_height: defaults::SECTION_CANVAS_HEIGHT,
            padding: defaults::SECTION_PADDING,
            caption_strip: 24.0,
            ground_floor_height: defaults::GROUND_FLOOR_HEIGHT,
            first_floor_height: defaults::FIRST_FLOOR_HEIGHT,
            slab_thickness: defaults::SLAB_THICKNESS,
            parapet_height: defaults::PARAPET_HEIGHT,
            foundation_depth: defaults::FOUNDATION_DEPTH,
            wall_thickness: defaults::EXTERIOR_WALL,
            stair_steps: defaults::STAIR_STEPS,
            stair_riser: defaults::STAIR_RISER,
            stair_tread: defaults::STAIR_TREAD,
            step_visibility_px: defaults::STEP_VISIBILITY_PX,
            caption: "SECTION A-A".to_string(),
            theme: Theme::default(),
        }
    }
}

/// Named elevation levels, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    FoundationBase,
    GroundLine,
    GroundFloorTop,
    FirstFloorSlabTop,
    FirstFloorTop,
    RoofTop,
    ParapetTop,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::FoundationBase,
        Level::GroundLine,
        Level::GroundFloorTop,
        Level::FirstFloorSlabTop,
        Level::FirstFloorTop,
        Level::RoofTop,
        Level::ParapetTop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::FoundationBase => "foundation base",
            Level::GroundLine => "ground line",
            Level::GroundFloorTop => "ground floor top",
            Level::FirstFloorSlabTop => "first floor slab top",
            Level::FirstFloorTop => "first floor top",
            Level::RoofTop => "roof top",
            Level::ParapetTop => "parapet top",
        }
    }
}

/// Vertical model of the building: elevations in metres from the ground datum
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProfile {
    pub building_width: Metres,
    levels: [(Level, f64); 7],
}

impl SectionProfile {
    pub fn new(building_width: f64, options: &SectionOptions) -> Result<Self, DrawingError> {
        let width = Metres::try_positive(building_width).map_err(|reason| {
            DrawingError::InvalidBuildingWidth {
                value: building_width,
                reason,
            }
        })?;

        let positive = |dimension: &'static str, value: f64| {
            Metres::try_positive(value)
                .map(Metres::raw)
                .map_err(|reason| DrawingError::InvalidSectionDimension { dimension, value, reason })
        };
        let non_negative = |dimension: &'static str, value: f64| {
            Metres::try_non_negative(value)
                .map(Metres::raw)
                .map_err(|reason| DrawingError::InvalidSectionDimension { dimension, value, reason })
        };
        let gf_height = positive("ground floor height", options.ground_floor_height)?;
        let ff_height = positive("first floor height", options.first_floor_height)?;
        let slab = positive("slab thickness", options.slab_thickness)?;
        let parapet = non_negative("parapet height", options.parapet_height)?;
        let foundation = non_negative("foundation depth", options.foundation_depth)?;

        let ground = 0.0;
        let gf_top = ground + gf_height;
        let ff_slab_top = gf_top + slab;
        let ff_top = ff_slab_top + ff_height;
        let roof_top = ff_top + slab;
        let parapet_top = roof_top + parapet;

        Ok(Self {
            building_width: width,
            levels: [
                (Level::FoundationBase, ground - foundation),
                (Level::GroundLine, ground),
                (Level::GroundFloorTop, gf_top),
                (Level::FirstFloorSlabTop, ff_slab_top),
                (Level::FirstFloorTop, ff_top),
                (Level::RoofTop, roof_top),
                (Level::ParapetTop, parapet_top),
            ],
        })
    }

    /// Every level with its elevation, bottom to top
    pub fn levels(&self) -> &[(Level, f64)] {
        &self.levels
    }

    pub fn elevation(&self, level: Level) -> f64 {
        self.levels
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, e)| *e)
            .unwrap_or_default()
    }

    /// Foundation base to parapet top
    pub fn total_height(&self) -> f64 {
        self.elevation(Level::ParapetTop) - self.elevation(Level::FoundationBase)
    }

    /// World y of an elevation (foundation base at 0)
    pub fn world_y(&self, elevation: f64) -> f64 {
        elevation - self.elevation(Level::FoundationBase)
    }

    /// Staircase profile from the ground line, starting at the inner face of
    /// the left wall. `None` when the flight does not fit between the walls.
    pub fn stair_profile(&self, options: &SectionOptions) -> Option<StepProfile> {
        let start_x = options.wall_thickness;
        let run = options.stair_steps as f64 * options.stair_tread;
        if start_x + run > self.building_width.raw() - options.wall_thickness {
            return None;
        }
        let mut builder = StepPathBuilder::new(dvec2(start_x, self.world_y(0.0)));
        builder.flight(options.stair_steps, options.stair_riser, options.stair_tread);
        Some(builder.build())
    }
}

/// Elevation callout text: `±0.00`, `+3.15`, `-0.60`
pub fn format_elevation(elevation: f64) -> String {
    if elevation.abs() < 0.005 {
        "±0.00".to_string()
    } else if elevation > 0.0 {
        format!("+{elevation:.2}")
    } else {
        format!("{elevation:.2}")
    }
}

/// Render the building section for `building_width` metres.
pub fn render_section(building_width: f64, options: &SectionOptions) -> Result<Scene, DrawingError> {
    let profile = SectionProfile::new(building_width, options)?;
    let canvas = Canvas::new(options.canvas_width, options.canvas_height)
        .with_padding(options.padding)
        .with_reserved_bottom(options.caption_strip);
    let viewport = ViewportTransform::fit(building_width, profile.total_height(), &canvas)?;
    let ctx = DrawContext::new(viewport, &options.theme).with_wall_thickness(options.wall_thickness);

    crate::log::debug!(
        width = building_width,
        height = profile.total_height(),
        scale = viewport.scale().raw(),
        "rendering section"
    );

    let section = SectionParts {
        profile: &profile,
        options,
        ctx,
    };

    let mut scene = Scene::new(options.canvas_width, options.canvas_height);
    scene.push_pass(PassKind::Background, section.background());
    scene.push_pass(PassKind::Footings, section.footings());
    scene.push_pass(PassKind::GroundHatch, section.ground_hatch());
    scene.push_pass(PassKind::SectionWalls, section.walls());
    scene.push_pass(PassKind::FloorSlab, section.slab(Level::GroundFloorTop));
    scene.push_pass(PassKind::RoofSlab, section.slab(Level::FirstFloorTop));
    scene.push_pass(PassKind::Parapets, section.parapets());
    scene.push_pass(PassKind::Staircase, section.staircase());
    scene.push_pass(PassKind::GroundLine, section.ground_line());
    scene.push_pass(PassKind::ElevationCallouts, section.elevation_callouts());
    scene.push_pass(PassKind::FloorHeights, section.floor_heights());
    scene.push_pass(PassKind::Zones, section.zones());
    scene.push_pass(PassKind::WidthDimension, section.width_dimension());
    scene.push_pass(PassKind::Caption, section.caption());
    Ok(scene)
}

struct SectionParts<'a> {
    profile: &'a SectionProfile,
    options: &'a SectionOptions,
    ctx: DrawContext<'a>,
}

impl SectionParts<'_> {
    fn width(&self) -> f64 {
        self.profile.building_width.raw()
    }

    fn y(&self, level: Level) -> f64 {
        self.profile.world_y(self.profile.elevation(level))
    }

    /// Screen rect between two world corners
    fn block(&self, x1: f64, y1: f64, x2: f64, y2: f64, style: Style) -> Node {
        let vp = &self.ctx.viewport;
        Node::rect_between(vp.to_screen(dvec2(x1, y1)), vp.to_screen(dvec2(x2, y2)), style)
    }

    fn background(&self) -> Vec<Node> {
        vec![Node::rect(
            glam::DVec2::ZERO,
            dvec2(self.options.canvas_width, self.options.canvas_height),
            Style::filled(self.ctx.theme.ink.background),
        )]
    }

    fn footings(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let t = self.options.wall_thickness;
        let base = self.y(Level::FoundationBase);
        let ground = self.y(Level::GroundLine);
        let pad_top = base + self.options.foundation_depth / 2.0;
        let style = Style::filled(ink.rule).with_stroke(ink.muted, 0.8);
        let mut nodes = Vec::new();
        for center in [t / 2.0, self.width() - t / 2.0] {
            nodes.push(self.block(center - 1.5 * t, base, center + 1.5 * t, pad_top, style));
            nodes.push(self.block(center - t / 2.0, pad_top, center + t / 2.0, ground, style));
        }
        nodes
    }

    fn ground_hatch(&self) -> Vec<Node> {
        let vp = &self.ctx.viewport;
        let ink = &self.ctx.theme.ink;
        let gy = vp.to_screen_y(self.y(Level::GroundLine));
        let by = vp.to_screen_y(self.y(Level::FoundationBase));
        let left = vp.to_screen_x(0.0) - 30.0;
        let right = vp.to_screen_x(self.width()) + 30.0;
        let mut nodes = vec![Node::rect(
            dvec2(left, gy),
            dvec2(right - left, by - gy),
            Style::filled(ink.road),
        )];
        let depth = (by - gy).min(10.0);
        let hatch = Style::stroked(ink.faint, 0.5);
        let mut x = left + depth;
        while x <= right {
            nodes.push(Node::line(dvec2(x, gy), dvec2(x - depth, gy + depth), hatch));
            x += 10.0;
        }
        nodes
    }

    fn walls(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let t = self.options.wall_thickness;
        let ground = self.y(Level::GroundLine);
        let roof = self.y(Level::RoofTop);
        let style = Style::filled(ink.grid).with_stroke(ink.wall, 1.2);
        vec![
            self.block(0.0, ground, t, roof, style),
            self.block(self.width() - t, ground, self.width(), roof, style),
        ]
    }

    /// Slab whose underside sits at `underside`
    fn slab(&self, underside: Level) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let bottom = self.y(underside);
        let top = bottom + self.options.slab_thickness;
        vec![self.block(0.0, bottom, self.width(), top, Style::filled(ink.muted).with_stroke(ink.wall, 1.0))]
    }

    fn parapets(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        let t = self.options.wall_thickness;
        let roof = self.y(Level::RoofTop);
        let top = self.y(Level::ParapetTop);
        let style = Style::filled(ink.grid).with_stroke(ink.wall, 1.0);
        vec![
            self.block(0.0, roof, t, top, style),
            self.block(self.width() - t, roof, self.width(), top, style),
        ]
    }

    fn staircase(&self) -> Vec<Node> {
        let vp = &self.ctx.viewport;
        let ink = &self.ctx.theme.ink;
        let step_px = vp.len(self.options.stair_riser.min(self.options.stair_tread));
        if self.options.stair_steps == 0 || step_px <= self.options.step_visibility_px {
            crate::log::debug!(step_px, "staircase below visibility floor");
            return Vec::new();
        }
        let Some(profile) = self.profile.stair_profile(self.options) else {
            crate::log::debug!(width = self.width(), "staircase does not fit");
            return Vec::new();
        };

        let start = vp.to_screen(profile.start());
        let end = vp.to_screen(profile.end());
        let mut outline = PathData::new().m(start.x, start.y);
        for pair in profile.vertices.windows(2) {
            let to = vp.to_screen(pair[1]);
            outline = if pair[0].x == pair[1].x { outline.v(to.y) } else { outline.h(to.x) };
        }

        let mut fill: Vec<_> = profile.vertices.iter().map(|p| vp.to_screen(*p)).collect();
        fill.push(dvec2(end.x, start.y));
        vec![
            Node::polygon(fill, Style::filled(ink.road)),
            Node::path(outline, Style::stroked(ink.text, 1.0)),
        ]
    }

    fn ground_line(&self) -> Vec<Node> {
        let vp = &self.ctx.viewport;
        let gy = vp.to_screen_y(self.y(Level::GroundLine));
        vec![Node::line(
            dvec2(vp.to_screen_x(0.0) - 40.0, gy),
            dvec2(vp.to_screen_x(self.width()) + 40.0, gy),
            Style::stroked(self.ctx.theme.ink.text, 1.6),
        )]
    }

    fn elevation_callouts(&self) -> Vec<Node> {
        let vp = &self.ctx.viewport;
        let ink = &self.ctx.theme.ink;
        let x = vp.to_screen_x(self.width());
        let mut nodes = Vec::new();
        for &(_, elevation) in self.profile.levels() {
            let sy = vp.to_screen_y(self.profile.world_y(elevation));
            nodes.push(Node::line(
                dvec2(x + 4.0, sy),
                dvec2(x + 16.0, sy),
                Style::stroked(ink.muted, 0.6),
            ));
            nodes.push(
                TextNode::new(dvec2(x + 19.0, sy + 3.0), format_elevation(elevation), 7.5, ink.text)
                    .anchored(TextAnchor::Start)
                    .into(),
            );
        }
        nodes
    }

    fn floor_heights(&self) -> Vec<Node> {
        let offset = -defaults::DIMENSION_OFFSET_PX;
        let dims: Vec<Annotation> = [
            DimensionLine::vertical(self.y(Level::GroundLine), self.y(Level::GroundFloorTop), 0.0, offset),
            DimensionLine::vertical(
                self.y(Level::FirstFloorSlabTop),
                self.y(Level::FirstFloorTop),
                0.0,
                offset,
            ),
            DimensionLine::vertical(self.y(Level::RoofTop), self.y(Level::ParapetTop), 0.0, offset),
        ]
        .into_iter()
        // a flat roof without parapet has nothing to measure
        .filter(|d| d.start != d.end)
        .map(Annotation::from)
        .collect();
        draw_all(&dims, &self.ctx)
    }

    fn zones(&self) -> Vec<Node> {
        let vp = &self.ctx.viewport;
        let theme = self.ctx.theme;
        let t = self.options.wall_thickness;
        let zones = [
            (Level::GroundLine, Level::GroundFloorTop, "GROUND FLOOR", RoomType::Living),
            (Level::FirstFloorSlabTop, Level::FirstFloorTop, "FIRST FLOOR", RoomType::Bedroom),
        ];
        let mut nodes = Vec::new();
        for (bottom, top, label, tint) in zones {
            let (y1, y2) = (self.y(bottom), self.y(top));
            nodes.push(self.block(
                t,
                y1,
                self.width() - t,
                y2,
                Style::filled(theme.room(&tint).fill).with_opacity(0.45),
            ));
            let c = vp.to_screen(dvec2(self.width() / 2.0, (y1 + y2) / 2.0));
            nodes.push(TextNode::new(c + dvec2(0.0, 3.0), label, 9.0, theme.ink.muted).bold().into());
        }
        nodes
    }

    fn width_dimension(&self) -> Vec<Node> {
        let base = self.y(Level::FoundationBase);
        let dim = DimensionLine::horizontal(0.0, self.width(), base, defaults::DIMENSION_OFFSET_PX);
        draw_all(&[Annotation::from(dim)], &self.ctx)
    }

    fn caption(&self) -> Vec<Node> {
        let ink = &self.ctx.theme.ink;
        vec![
            TextNode::new(
                dvec2(self.options.canvas_width / 2.0, self.options.canvas_height - 14.0),
                self.options.caption.clone(),
                12.0,
                ink.text,
            )
            .bold()
            .into(),
        ]
    }
}
