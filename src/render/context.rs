//! Drawing context shared by every symbol in one render call

use super::defaults::{self, Theme};
use super::viewport::ViewportTransform;

/// Room label visibility floors and font clamp, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelRules {
    pub min_width: f64,
    pub min_height: f64,
    /// Rooms taller than this get name and area on separate lines
    pub two_line_height: f64,
    pub font_min: f64,
    pub font_max: f64,
    pub caption_font: f64,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            min_width: defaults::LABEL_MIN_WIDTH_PX,
            min_height: defaults::LABEL_MIN_HEIGHT_PX,
            two_line_height: defaults::LABEL_TWO_LINE_HEIGHT_PX,
            font_min: defaults::FONT_MIN,
            font_max: defaults::FONT_MAX,
            caption_font: defaults::CAPTION_FONT,
        }
    }
}

/// Immutable state handed to [`Symbol::draw`](super::annotations::Symbol::draw)
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub viewport: ViewportTransform,
    pub theme: &'a Theme,
    pub labels: LabelRules,
    /// Thickness of the wall openings are cut into, metres
    pub wall_thickness: f64,
}

impl<'a> DrawContext<'a> {
    pub fn new(viewport: ViewportTransform, theme: &'a Theme) -> Self {
        Self {
            viewport,
            theme,
            labels: LabelRules::default(),
            wall_thickness: defaults::EXTERIOR_WALL,
        }
    }

    pub fn with_labels(mut self, labels: LabelRules) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_wall_thickness(mut self, thickness: f64) -> Self {
        self.wall_thickness = thickness;
        self
    }

    /// Wall thickness in pixels, never thinner than one pixel
    pub fn wall_px(&self) -> f64 {
        self.viewport.len(self.wall_thickness).max(1.0)
    }
}
