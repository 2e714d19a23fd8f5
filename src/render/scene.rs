//! In-memory scene description.
//!
//! A [`Scene`] is a fixed-size logical canvas holding an explicit, ordered
//! list of [`DrawPass`]es. Passes paint in list order, so later passes sit on
//! top of earlier ones. Every coordinate is in canvas pixels with y growing
//! downward.

use std::fmt;

use glam::DVec2;

use super::path_builder::PathData;

/// RGB colour packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const BLACK: Color = Color(0x000000);

    pub const fn hex(rgb: u32) -> Self {
        Color(rgb & 0xFF_FF_FF)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Presentation attributes for shape nodes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Dash and gap lengths in pixels
    pub dash: Option<(f64, f64)>,
    pub opacity: Option<f64>,
}

impl Style {
    pub fn filled(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: Color, width: f64) -> Self {
        Self {
            stroke: Some(stroke),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A single line of text anchored at `position` (baseline)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    pub position: DVec2,
    pub content: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub weight: FontWeight,
    pub fill: Color,
    /// Rotation in degrees about `position`, clockwise on screen
    pub rotation: Option<f64>,
}

impl TextNode {
    pub fn new(position: DVec2, content: impl Into<String>, font_size: f64, fill: Color) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            anchor: TextAnchor::Middle,
            weight: FontWeight::Normal,
            fill,
            rotation: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }
}

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Axis-aligned rectangle from its top-left corner
    Rect { origin: DVec2, size: DVec2, style: Style },
    Line { from: DVec2, to: DVec2, style: Style },
    Polygon { points: Vec<DVec2>, style: Style },
    Circle { center: DVec2, radius: f64, style: Style },
    Path { data: PathData, style: Style },
    Text(TextNode),
}

impl Node {
    pub fn rect(origin: DVec2, size: DVec2, style: Style) -> Self {
        Node::Rect { origin, size, style }
    }

    /// Rectangle spanning two arbitrary corners
    pub fn rect_between(a: DVec2, b: DVec2, style: Style) -> Self {
        let origin = a.min(b);
        let size = (a - b).abs();
        Node::Rect { origin, size, style }
    }

    pub fn line(from: DVec2, to: DVec2, style: Style) -> Self {
        Node::Line { from, to, style }
    }

    pub fn polygon(points: Vec<DVec2>, style: Style) -> Self {
        Node::Polygon { points, style }
    }

    pub fn circle(center: DVec2, radius: f64, style: Style) -> Self {
        Node::Circle { center, radius, style }
    }

    pub fn path(data: PathData, style: Style) -> Self {
        Node::Path { data, style }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<TextNode> for Node {
    fn from(t: TextNode) -> Self {
        Node::Text(t)
    }
}

/// Named draw passes. The scene's pass list fixes the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassKind {
    Background,
    // plan view
    RoadStrip,
    PlotBoundary,
    StructuralGrid,
    RoomFills,
    InteriorWalls,
    ExteriorWalls,
    Windows,
    Doors,
    Columns,
    RoomLabels,
    RoomDimensions,
    PlotDimensions,
    NorthArrow,
    ScaleBar,
    TitleBlock,
    // section view
    Footings,
    GroundHatch,
    SectionWalls,
    FloorSlab,
    RoofSlab,
    Parapets,
    Staircase,
    GroundLine,
    ElevationCallouts,
    FloorHeights,
    Zones,
    WidthDimension,
    Caption,
}

impl PassKind {
    /// Group id used when serialising
    pub fn id(self) -> &'static str {
        match self {
            PassKind::Background => "background",
            PassKind::RoadStrip => "road",
            PassKind::PlotBoundary => "plot",
            PassKind::StructuralGrid => "grid",
            PassKind::RoomFills => "rooms",
            PassKind::InteriorWalls => "walls-interior",
            PassKind::ExteriorWalls => "walls-exterior",
            PassKind::Windows => "windows",
            PassKind::Doors => "doors",
            PassKind::Columns => "columns",
            PassKind::RoomLabels => "labels",
            PassKind::RoomDimensions => "room-dimensions",
            PassKind::PlotDimensions => "dimensions",
            PassKind::NorthArrow => "north-arrow",
            PassKind::ScaleBar => "scale-bar",
            PassKind::TitleBlock => "title-block",
            PassKind::Footings => "footings",
            PassKind::GroundHatch => "ground-hatch",
            PassKind::SectionWalls => "walls",
            PassKind::FloorSlab => "floor-slab",
            PassKind::RoofSlab => "roof-slab",
            PassKind::Parapets => "parapets",
            PassKind::Staircase => "staircase",
            PassKind::GroundLine => "ground-line",
            PassKind::ElevationCallouts => "elevations",
            PassKind::FloorHeights => "floor-heights",
            PassKind::Zones => "zones",
            PassKind::WidthDimension => "width-dimension",
            PassKind::Caption => "caption",
        }
    }
}

/// One layer of the paint order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawPass {
    pub kind: PassKind,
    pub nodes: Vec<Node>,
}

/// A fully composed drawing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub passes: Vec<DrawPass>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            passes: Vec::new(),
        }
    }

    /// Append a pass. Empty passes are kept so the order stays inspectable.
    pub fn push_pass(&mut self, kind: PassKind, nodes: Vec<Node>) {
        self.passes.push(DrawPass { kind, nodes });
    }

    pub fn pass(&self, kind: PassKind) -> Option<&DrawPass> {
        self.passes.iter().find(|p| p.kind == kind)
    }

    /// Nodes of one pass, empty when the pass is absent
    pub fn nodes(&self, kind: PassKind) -> &[Node] {
        self.pass(kind).map(|p| p.nodes.as_slice()).unwrap_or(&[])
    }

    pub fn pass_order(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.kind).collect()
    }

    /// Every text node in paint order
    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.passes
            .iter()
            .flat_map(|p| p.nodes.iter())
            .filter_map(Node::as_text)
    }

    pub fn node_count(&self) -> usize {
        self.passes.iter().map(|p| p.nodes.len()).sum()
    }
}
