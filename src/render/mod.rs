//! Drawing pipeline
//!
//! This module is organized into submodules:
//! - `viewport`: uniform world-to-canvas transform and the y flip
//! - `envelope`: building envelope, wall grid, column dedup and inference
//! - `openings`: window and door placement on exterior edges
//! - `annotations`: dimension lines, labels, north arrow, scale bar and other symbols
//! - `path_builder`: path commands and the staircase step walker
//! - `scene`: the in-memory output (nodes grouped into ordered draw passes)
//! - `defaults`: constants and the frozen lookup tables
//! - `context`: state shared by symbols during one render call
//! - `plan`: floor plan composition
//! - `section`: building section composition
//! - `svg`: SVG serialisation of a scene

pub mod annotations;
pub mod context;
pub mod defaults;
pub mod envelope;
pub mod openings;
pub mod path_builder;
pub mod plan;
pub mod scene;
pub mod section;
pub mod svg;
pub mod viewport;

pub use context::{DrawContext, LabelRules};
pub use defaults::{Ink, RoomPalette, Theme};
pub use openings::OpeningRules;
pub use scene::{Color, DrawPass, Node, PassKind, Scene, Style, TextNode};
pub use section::{SectionOptions, SectionProfile};
pub use viewport::{Canvas, ViewportTransform};

use crate::model::{Plot, PlotShape, TitleBlock};

/// Options for plan rendering. Every field has a sensible default.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub padding: f64,
    pub road_strip_height: f64,
    /// Gap between the plot's front edge and the road strip
    pub road_gap: f64,
    /// Strip below the road that holds the scale bar
    pub scale_bar_strip: f64,
    /// Row between the road and the scale bar, reserved for trapezoids only
    pub front_dimension_row: f64,
    pub title_block_height: f64,
    /// Exterior wall thickness, metres
    pub exterior_wall: f64,
    /// Interior wall thickness, metres
    pub interior_wall: f64,
    /// Column marker side, metres
    pub column_size: f64,
    pub openings: OpeningRules,
    pub labels: LabelRules,
    /// Real-world length of the scale bar, metres
    pub scale_bar_length: f64,
    /// Draw a `"w × d"` caption under every visible room label
    pub show_room_dimensions: bool,
    /// Draw grid lines with bubbles through every room-edge position
    pub show_structural_grid: bool,
    /// Place columns at room corners when a floor supplies none
    pub infer_columns: bool,
    pub title: Option<TitleBlock>,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_width: defaults::CANVAS_WIDTH,
            canvas_height: defaults::CANVAS_HEIGHT,
            padding: defaults::PADDING,
            road_strip_height: defaults::ROAD_STRIP_HEIGHT,
            road_gap: defaults::ROAD_GAP,
            scale_bar_strip: defaults::SCALE_BAR_STRIP,
            front_dimension_row: defaults::FRONT_DIMENSION_ROW,
            title_block_height: defaults::TITLE_BLOCK_HEIGHT,
            exterior_wall: defaults::EXTERIOR_WALL,
            interior_wall: defaults::INTERIOR_WALL,
            column_size: defaults::COLUMN_SIZE,
            openings: OpeningRules::default(),
            labels: LabelRules::default(),
            scale_bar_length: defaults::SCALE_BAR_LENGTH,
            show_room_dimensions: false,
            show_structural_grid: false,
            infer_columns: false,
            title: None,
            theme: Theme::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_title(mut self, title: TitleBlock) -> Self {
        self.title = Some(title);
        self
    }

    /// Height of the front dimension row under the road; zero for rectangles
    pub fn front_row(&self, plot: &Plot) -> f64 {
        match plot.shape {
            PlotShape::Rectangle => 0.0,
            PlotShape::Trapezoid { .. } => self.front_dimension_row,
        }
    }

    /// Height kept below the plot for the road, the front dimension row,
    /// the scale bar and the title block
    pub fn reserved_bottom(&self, plot: &Plot) -> f64 {
        let title = if self.title.is_some() { self.title_block_height } else { 0.0 };
        self.road_gap + self.road_strip_height + self.front_row(plot) + self.scale_bar_strip + title
    }

    pub fn canvas(&self, plot: &Plot) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
            .with_padding(self.padding)
            .with_reserved_bottom(self.reserved_bottom(plot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadSide;

    #[test]
    fn title_block_reserves_extra_space() {
        let plot = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let plain = RenderOptions::default();
        let titled = RenderOptions::default().with_title(TitleBlock::default());
        assert_eq!(
            titled.reserved_bottom(&plot) - plain.reserved_bottom(&plot),
            defaults::TITLE_BLOCK_HEIGHT
        );
    }

    #[test]
    fn trapezoid_reserves_front_dimension_row() {
        let options = RenderOptions::default();
        let rect = Plot::rectangle(9.0, 12.0, RoadSide::South);
        let trap = Plot::trapezoid(9.0, 11.0, 12.0, RoadSide::South);
        assert_eq!(options.front_row(&rect), 0.0);
        assert_eq!(
            options.reserved_bottom(&trap) - options.reserved_bottom(&rect),
            defaults::FRONT_DIMENSION_ROW
        );
    }

    #[test]
    fn defaults_match_drafting_conventions() {
        let opts = RenderOptions::default();
        assert_eq!(opts.exterior_wall, 0.23);
        assert_eq!(opts.interior_wall, 0.115);
        assert_eq!(opts.openings.tolerance, 0.05);
        assert_eq!(opts.scale_bar_length, 3.0);
        assert!(!opts.infer_columns);
    }
}
