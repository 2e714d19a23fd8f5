//! SVG serialisation of a [`Scene`].
//!
//! Each draw pass becomes one `<g id="...">` group, emitted in pass order.
//! Attribute numbers are written with six significant figures and trailing
//! zeros trimmed, so identical scenes always serialise to identical bytes.

use svg::Document;
use svg::Node as _;
use svg::node::element::path::Data;
use svg::node::element::{self as el, Element};

use super::path_builder::{PathCommand, PathData};
use super::scene::{FontWeight, Node, Scene, Style, TextAnchor, TextNode};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

impl Scene {
    /// Serialise to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        self.to_document().to_string()
    }

    /// Build the SVG element tree, one group per pass.
    pub fn to_document(&self) -> Document {
        let w = fmt_num(self.width);
        let h = fmt_num(self.height);
        let view_box = format!("0 0 {w} {h}");
        let mut doc = Document::new()
            .set("width", w)
            .set("height", h)
            .set("viewBox", view_box)
            .set("font-family", FONT_FAMILY);
        for pass in &self.passes {
            let group = pass
                .nodes
                .iter()
                .fold(el::Group::new().set("id", pass.kind.id()), |group, node| group.add(element(node)));
            doc = doc.add(group);
        }
        doc
    }
}

fn element(node: &Node) -> Element {
    match node {
        Node::Rect { origin, size, style } => styled(
            el::Rectangle::new()
                .set("x", fmt_num(origin.x))
                .set("y", fmt_num(origin.y))
                .set("width", fmt_num(size.x))
                .set("height", fmt_num(size.y)),
            style,
        )
        .into(),
        Node::Line { from, to, style } => styled(
            el::Line::new()
                .set("x1", fmt_num(from.x))
                .set("y1", fmt_num(from.y))
                .set("x2", fmt_num(to.x))
                .set("y2", fmt_num(to.y)),
            style,
        )
        .into(),
        Node::Polygon { points, style } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                .collect();
            styled(el::Polygon::new().set("points", pts), style).into()
        }
        Node::Circle { center, radius, style } => styled(
            el::Circle::new()
                .set("cx", fmt_num(center.x))
                .set("cy", fmt_num(center.y))
                .set("r", fmt_num(*radius)),
            style,
        )
        .into(),
        Node::Path { data, style } => styled(el::Path::new().set("d", path_data(data)), style).into(),
        Node::Text(text) => text_element(text).into(),
    }
}

fn text_element(text: &TextNode) -> el::Text {
    let anchor = match text.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let x = fmt_num(text.position.x);
    let y = fmt_num(text.position.y);
    let mut out = el::Text::new(text.content.as_str())
        .set("font-size", fmt_num(text.font_size))
        .set("text-anchor", anchor)
        .set("fill", text.fill.to_string());
    if text.weight == FontWeight::Bold {
        out.assign("font-weight", "bold");
    }
    if let Some(deg) = text.rotation {
        out.assign("transform", format!("rotate({} {x} {y})", fmt_num(deg)));
    }
    out.set("x", x).set("y", y)
}

fn styled<T: svg::Node>(mut shape: T, style: &Style) -> T {
    match style.fill {
        Some(c) => shape.assign("fill", c.to_string()),
        None => shape.assign("fill", "none"),
    }
    if let Some(c) = style.stroke {
        shape.assign("stroke", c.to_string());
        shape.assign("stroke-width", fmt_num(style.stroke_width));
    }
    if let Some((dash, gap)) = style.dash {
        shape.assign("stroke-dasharray", format!("{},{}", fmt_num(dash), fmt_num(gap)));
    }
    if let Some(o) = style.opacity {
        shape.assign("opacity", fmt_num(o));
    }
    shape
}

/// Convert a [`PathData`] into `svg` path data.
pub fn path_data(data: &PathData) -> Data {
    data.commands().iter().fold(Data::new(), |d, cmd| match *cmd {
        PathCommand::MoveTo(p) => d.move_to((p.x, p.y)),
        PathCommand::LineTo(p) => d.line_to((p.x, p.y)),
        PathCommand::Horizontal(x) => d.horizontal_line_to(x),
        PathCommand::Vertical(y) => d.vertical_line_to(y),
        PathCommand::Arc { radius, sweep, to } => {
            d.elliptical_arc_to((radius, radius, 0, 0, u8::from(sweep), to.x, to.y))
        }
        PathCommand::Close => d.close(),
    })
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    // avoid "-0" after rounding tiny negatives
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::{Color, PassKind};
    use glam::dvec2;

    #[test]
    fn fmt_num_trims_and_rounds() {
        assert_eq!(fmt_num(3.0), "3");
        assert_eq!(fmt_num(41.666666666), "41.6667");
        assert_eq!(fmt_num(-0.5), "-0.5");
        assert_eq!(fmt_num(1200.0), "1200");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn arc_path_data() {
        let data = PathData::new().m(1.5, 91.0).a(9.0, true, 10.5, 100.0);
        let d: svg::node::Value = path_data(&data).into();
        insta::assert_snapshot!(d.to_string(), @"M1.5,91 A9,9,0,0,1,10.5,100");
    }

    #[test]
    fn rotated_bold_text_keeps_its_pivot() {
        let text = TextNode::new(dvec2(40.0, 12.5), "5.00 m", 8.0, Color::BLACK)
            .bold()
            .rotated(-90.0);
        let out = text_element(&text).to_string();
        assert!(out.contains(r#"font-weight="bold""#), "{out}");
        assert!(out.contains(r#"transform="rotate(-90 40 12.5)""#), "{out}");
    }

    #[test]
    fn passes_become_groups_in_order() {
        let mut scene = Scene::new(200.0, 100.0);
        scene.push_pass(
            PassKind::Background,
            vec![Node::rect(dvec2(0.0, 0.0), dvec2(200.0, 100.0), Style::filled(Color::WHITE))],
        );
        scene.push_pass(PassKind::Doors, vec![]);
        scene.push_pass(
            PassKind::RoomLabels,
            vec![TextNode::new(dvec2(10.0, 20.0), "Hall & Dining", 9.0, Color::BLACK).into()],
        );
        insta::assert_snapshot!(scene.to_svg(), @r##"
        <svg font-family="Helvetica, Arial, sans-serif" height="100" viewBox="0 0 200 100" width="200" xmlns="http://www.w3.org/2000/svg">
        <g id="background">
        <rect fill="#ffffff" height="100" width="200" x="0" y="0"/>
        </g>
        <g id="doors"/>
        <g id="labels">
        <text fill="#000000" font-size="9" text-anchor="middle" x="10" y="20">
        Hall &amp; Dining
        </text>
        </g>
        </svg>
        "##);
    }
}
