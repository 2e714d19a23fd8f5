//! Drawing symbols: openings, dimension lines, labels, north arrow, scale
//! bar, grid bubbles and the title strip.
//!
//! Every symbol implements [`Symbol`] and is dispatched through the
//! [`Annotation`] enum, so a pass can hold a heterogeneous list of symbols
//! without boxing.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::model::RoomRect;
use crate::types::Metres;

use super::context::{DrawContext, LabelRules};
use super::defaults;
use super::openings::{DoorSymbol, WindowSymbol};
use super::path_builder::PathData;
use super::scene::{Node, Style, TextAnchor, TextNode};

/// Something that knows how to turn itself into scene nodes
#[enum_dispatch]
pub trait Symbol {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node>;
}

/// Every drawable annotation
#[enum_dispatch(Symbol)]
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    WindowSymbol,
    DoorSymbol,
    DimensionLine,
    RoomLabel,
    RoomCaption,
    NorthArrow,
    ScaleBar,
    GridBubble,
    TitleStrip,
}

/// Draw a list of symbols in order
pub fn draw_all<'a, S: Symbol + 'a>(
    symbols: impl IntoIterator<Item = &'a S>,
    ctx: &DrawContext<'_>,
) -> Vec<Node> {
    symbols.into_iter().flat_map(|s| s.draw(ctx)).collect()
}

// ============================================================================
// Openings
// ============================================================================

/// Screen-space unit vectors (run, across) for an opening on `edge`
fn screen_axes(horizontal: bool) -> (DVec2, DVec2) {
    if horizontal {
        (DVec2::X, DVec2::Y)
    } else {
        (DVec2::Y, DVec2::X)
    }
}

impl Symbol for WindowSymbol {
    /// Cut-out plus three strokes along the wall run, spread across the
    /// wall thickness.
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let vp = &ctx.viewport;
        let ink = &ctx.theme.ink;
        let center = vp.to_screen(self.center);
        let (run, across) = screen_axes(self.edge.is_horizontal());
        let half = run * vp.len(self.length) / 2.0;
        let t = ctx.wall_px();

        let mut nodes = vec![Node::rect_between(
            center - half - across * t / 2.0,
            center + half + across * t / 2.0,
            Style::filled(ink.background),
        )];
        for k in [-0.5, 0.0, 0.5] {
            let shift = across * t * k;
            nodes.push(Node::line(
                center - half + shift,
                center + half + shift,
                Style::stroked(ink.opening, 0.8),
            ));
        }
        nodes
    }
}

impl Symbol for DoorSymbol {
    /// Wall cut-out, the open leaf, and a quarter-circle swing arc.
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let vp = &ctx.viewport;
        let ink = &ctx.theme.ink;
        let hinge = vp.to_screen(self.hinge);
        let open = vp.to_screen(self.open_tip());
        let closed = vp.to_screen(self.closed_tip());
        let r = vp.len(self.radius);
        let (_, across) = screen_axes(self.edge.is_horizontal());
        let t = ctx.wall_px();

        // y is flipped, so the winding is decided in screen space
        let sweep = (open - hinge).perp_dot(closed - hinge) > 0.0;
        let arc = PathData::new().m(open.x, open.y).a(r, sweep, closed.x, closed.y);

        vec![
            Node::rect_between(
                hinge - across * t / 2.0,
                closed + across * t / 2.0,
                Style::filled(ink.background),
            ),
            Node::line(hinge, open, Style::stroked(ink.text, 1.2)),
            Node::path(arc, Style::stroked(ink.muted, 0.7).dashed(2.0, 2.0)),
        ]
    }
}

// ============================================================================
// Dimension lines
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A measured distance between two world points.
///
/// `offset` is in pixels along screen +y (horizontal lines) or screen +x
/// (vertical lines); negative values move the line above or to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLine {
    pub start: DVec2,
    pub end: DVec2,
    pub offset: f64,
    pub text: String,
    pub orientation: Orientation,
}

impl DimensionLine {
    /// Horizontal dimension from `x1` to `x2` measured at world `y`
    pub fn horizontal(x1: f64, x2: f64, y: f64, offset: f64) -> Self {
        Self {
            start: dvec2(x1, y),
            end: dvec2(x2, y),
            offset,
            text: Metres((x2 - x1).abs()).to_string(),
            orientation: Orientation::Horizontal,
        }
    }

    /// Vertical dimension from `y1` to `y2` measured at world `x`
    pub fn vertical(y1: f64, y2: f64, x: f64, offset: f64) -> Self {
        Self {
            start: dvec2(x, y1),
            end: dvec2(x, y2),
            offset,
            text: Metres((y2 - y1).abs()).to_string(),
            orientation: Orientation::Vertical,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

impl Symbol for DimensionLine {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let vp = &ctx.viewport;
        let ink = &ctx.theme.ink;
        let a = vp.to_screen(self.start);
        let b = vp.to_screen(self.end);
        let normal = match self.orientation {
            Orientation::Horizontal => DVec2::Y,
            Orientation::Vertical => DVec2::X,
        };
        let shift = normal * self.offset;
        let (pa, pb) = (a + shift, b + shift);
        let half_tick = normal * defaults::TICK_PX / 2.0;
        let thin = Style::stroked(ink.muted, 0.6);

        let mid = (pa + pb) / 2.0;
        // labels sit on the side away from the measured object
        let side = if self.offset < 0.0 { -1.0 } else { 1.0 };
        let label = match self.orientation {
            Orientation::Horizontal => {
                let y = if side < 0.0 { mid.y - 4.0 } else { mid.y + 4.0 + defaults::DIMENSION_FONT };
                TextNode::new(dvec2(mid.x, y), self.text.clone(), defaults::DIMENSION_FONT, ink.text)
            }
            Orientation::Vertical => TextNode::new(
                dvec2(mid.x + side * 4.0, mid.y),
                self.text.clone(),
                defaults::DIMENSION_FONT,
                ink.text,
            )
            .rotated(-90.0),
        };

        vec![
            Node::line(a, pa, thin.dashed(2.0, 2.0)),
            Node::line(b, pb, thin.dashed(2.0, 2.0)),
            Node::line(pa, pb, thin),
            Node::line(pa - half_tick, pa + half_tick, Style::stroked(ink.muted, 1.0)),
            Node::line(pb - half_tick, pb + half_tick, Style::stroked(ink.muted, 1.0)),
            label.into(),
        ]
    }
}

// ============================================================================
// Room labels
// ============================================================================

/// Font size and line split chosen for a room of a given pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub font_size: f64,
    pub two_lines: bool,
}

/// `None` when the room is too small to carry readable text.
pub fn label_layout(width_px: f64, height_px: f64, rules: &LabelRules) -> Option<LabelLayout> {
    if width_px < rules.min_width || height_px < rules.min_height {
        return None;
    }
    let font_size = (width_px / 8.0)
        .min(height_px / 4.0)
        .clamp(rules.font_min, rules.font_max);
    Some(LabelLayout {
        font_size,
        two_lines: height_px > rules.two_line_height,
    })
}

/// Name and area label centred in a room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLabel {
    pub name: String,
    pub area: f64,
    /// Lower-left corner and extents in world metres
    pub origin: DVec2,
    pub size: DVec2,
}

impl RoomLabel {
    pub fn new(room: &RoomRect) -> Self {
        Self {
            name: room.name.clone(),
            area: room.area,
            origin: dvec2(room.x, room.y),
            size: dvec2(room.width, room.depth),
        }
    }

    fn area_text(&self) -> String {
        format!("{:.1} m²", self.area)
    }
}

impl Symbol for RoomLabel {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let vp = &ctx.viewport;
        let ink = &ctx.theme.ink;
        let Some(layout) = label_layout(vp.len(self.size.x), vp.len(self.size.y), &ctx.labels) else {
            return Vec::new();
        };
        let c = vp.to_screen(self.origin + self.size / 2.0);
        let fs = layout.font_size;

        if layout.two_lines {
            vec![
                TextNode::new(dvec2(c.x, c.y - 1.0), self.name.clone(), fs, ink.text)
                    .bold()
                    .into(),
                TextNode::new(dvec2(c.x, c.y + fs), self.area_text(), fs * 0.9, ink.muted).into(),
            ]
        } else {
            let text = format!("{} · {}", self.name, self.area_text());
            vec![TextNode::new(dvec2(c.x, c.y + fs * 0.35), text, fs, ink.text).into()]
        }
    }
}

/// `"w × d"` caption placed under a room's label
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCaption {
    pub origin: DVec2,
    pub size: DVec2,
}

impl RoomCaption {
    pub fn new(room: &RoomRect) -> Self {
        Self {
            origin: dvec2(room.x, room.y),
            size: dvec2(room.width, room.depth),
        }
    }

    pub fn text(&self) -> String {
        format!("{:.2} × {:.2}", self.size.x, self.size.y)
    }
}

impl Symbol for RoomCaption {
    /// Suppressed together with the label it belongs to.
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let vp = &ctx.viewport;
        let Some(layout) = label_layout(vp.len(self.size.x), vp.len(self.size.y), &ctx.labels) else {
            return Vec::new();
        };
        let c = vp.to_screen(self.origin + self.size / 2.0);
        let fs = layout.font_size;
        let y = if layout.two_lines { c.y + 2.0 * fs + 1.0 } else { c.y + 1.35 * fs + 2.0 };
        vec![TextNode::new(dvec2(c.x, y), self.text(), ctx.labels.caption_font, ctx.theme.ink.faint).into()]
    }
}

// ============================================================================
// North arrow, scale bar, grid bubbles
// ============================================================================

/// Circle, triangle and letter; `rotation` in degrees clockwise on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NorthArrow {
    pub center: DVec2,
    pub radius: f64,
    pub rotation: f64,
}

impl NorthArrow {
    /// Screen direction the arrow points to
    pub fn direction(&self) -> DVec2 {
        // screen y points down, so a positive angle turns clockwise
        DVec2::from_angle(self.rotation.to_radians()).rotate(DVec2::NEG_Y)
    }
}

impl Symbol for NorthArrow {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let ink = &ctx.theme.ink;
        let dir = self.direction();
        let perp = dir.perp();
        let r = self.radius;
        let tip = self.center + dir * r * 0.8;
        let base = self.center - dir * r * 0.5;
        let letter = self.center + dir * (r + 9.0) + dvec2(0.0, 3.5);

        vec![
            Node::circle(self.center, r, Style::stroked(ink.muted, 1.0).with_fill(ink.background)),
            Node::polygon(
                vec![tip, base + perp * r * 0.35, base - perp * r * 0.35],
                Style::filled(ink.text),
            ),
            TextNode::new(letter, "N", 10.0, ink.text).bold().into(),
        ]
    }
}

/// A fixed world length with end caps and a centred label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBar {
    /// Screen position of the left end
    pub origin: DVec2,
    pub length: f64,
}

impl Symbol for ScaleBar {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let ink = &ctx.theme.ink;
        let px = ctx.viewport.len(self.length);
        let a = self.origin;
        let b = a + dvec2(px, 0.0);
        let cap = dvec2(0.0, 4.0);
        let mid = (a + b) / 2.0;
        let label = format!("{} m", super::svg::fmt_num(self.length));

        vec![
            Node::line(a, b, Style::stroked(ink.text, 1.5)),
            Node::line(a - cap, a + cap, Style::stroked(ink.text, 1.0)),
            Node::line(b - cap, b + cap, Style::stroked(ink.text, 1.0)),
            Node::line(mid - cap * 0.5, mid + cap * 0.5, Style::stroked(ink.text, 0.6)),
            TextNode::new(mid - dvec2(0.0, 7.0), label, 8.0, ink.text).into(),
        ]
    }
}

/// Labelled circle at the end of a structural grid line
#[derive(Debug, Clone, PartialEq)]
pub struct GridBubble {
    pub center: DVec2,
    pub label: String,
}

impl Symbol for GridBubble {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let ink = &ctx.theme.ink;
        let r = defaults::GRID_BUBBLE_RADIUS_PX;
        vec![
            Node::circle(self.center, r, Style::stroked(ink.faint, 0.8).with_fill(ink.background)),
            TextNode::new(self.center + dvec2(0.0, 3.0), self.label.clone(), 8.0, ink.muted).into(),
        ]
    }
}

/// Spreadsheet-style column name for a zero-based index: A..Z, AA, AB..
pub fn grid_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// ============================================================================
// Title strip
// ============================================================================

/// Ruled strip of `(caption, value)` cells at the bottom of the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStrip {
    /// Top-left corner and size in pixels
    pub origin: DVec2,
    pub size: DVec2,
    pub cells: Vec<(String, String)>,
}

impl Symbol for TitleStrip {
    fn draw(&self, ctx: &DrawContext<'_>) -> Vec<Node> {
        let ink = &ctx.theme.ink;
        let mut nodes = vec![Node::rect(
            self.origin,
            self.size,
            Style::stroked(ink.muted, 1.0).with_fill(ink.background),
        )];
        if self.cells.is_empty() {
            return nodes;
        }
        let cell_w = self.size.x / self.cells.len() as f64;
        for (i, (caption, value)) in self.cells.iter().enumerate() {
            let x = self.origin.x + cell_w * i as f64;
            if i > 0 {
                nodes.push(Node::line(
                    dvec2(x, self.origin.y),
                    dvec2(x, self.origin.y + self.size.y),
                    Style::stroked(ink.rule, 0.8),
                ));
            }
            let pad = dvec2(x + 6.0, self.origin.y);
            nodes.push(
                TextNode::new(pad + dvec2(0.0, 13.0), caption.to_uppercase(), 6.5, ink.faint)
                    .anchored(TextAnchor::Start)
                    .into(),
            );
            nodes.push(
                TextNode::new(pad + dvec2(0.0, 30.0), value.clone(), 9.0, ink.text)
                    .anchored(TextAnchor::Start)
                    .bold()
                    .into(),
            );
        }
        nodes
    }
}
