//! Parametric architectural drawings for residential layouts.
//!
//! Given a plot and the room rectangles of each floor, this crate composes
//! a floor plan (walls, openings, labels, dimensions, north arrow, scale bar)
//! and a building section (footings, slabs, parapets, staircase, elevation
//! callouts) as an in-memory [`Scene`]. A scene is a list of ordered draw
//! passes and serialises to SVG with [`Scene::to_svg`].
//!
//! Rendering is pure: the same inputs always produce the same scene.

pub mod errors;
pub mod log;
pub mod model;
pub mod render;
pub mod types;

pub use errors::{Axis, DrawingError};
pub use model::{
    ColumnMarker, FloorPlan, Layout, Plot, PlotShape, RoadSide, RoomRect, RoomType, TitleBlock,
};
pub use render::plan::{render_floor_plan, render_layout};
pub use render::section::render_section;
pub use render::{RenderOptions, Scene, SectionOptions};
pub use types::{Metres, NumericError, Px, Scale};

/// Render one floor of `plot` straight to an SVG document.
pub fn floor_plan_svg(
    plot: &Plot,
    floor: &FloorPlan,
    options: &RenderOptions,
) -> Result<String, miette::Report> {
    let scene = render_floor_plan(plot, floor, options)?;
    Ok(scene.to_svg())
}

/// Render the building section for `building_width` metres to SVG.
pub fn section_svg(building_width: f64, options: &SectionOptions) -> Result<String, miette::Report> {
    let scene = render_section(building_width, options)?;
    Ok(scene.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_plan_svg_is_a_document() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let floor = FloorPlan::new(
            0,
            vec![RoomRect::new("r1", "Living", RoomType::Living, 0.0, 0.0, 4.0, 5.0)],
            vec![],
        );
        let svg = floor_plan_svg(&plot, &floor, &RenderOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<g id="walls-exterior">"#));
    }

    #[test]
    fn invalid_input_reports_diagnostic() {
        let plot = Plot::rectangle(0.0, 12.0, RoadSide::South);
        let err = floor_plan_svg(&plot, &FloorPlan::default(), &RenderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("invalid plot width"));
    }

    #[test]
    fn section_svg_has_caption() {
        let svg = section_svg(9.0, &SectionOptions::default()).unwrap();
        assert!(svg.contains("SECTION A-A"));
    }
}
