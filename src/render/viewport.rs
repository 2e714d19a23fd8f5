//! World-to-canvas mapping.
//!
//! One uniform scale maps metres to pixels, so room proportions never
//! distort. The drawing is centred inside the padded canvas area above a
//! reserved bottom strip (road, title block).
//!
//! The y axis is flipped: world depth grows away from the road, canvas y
//! grows downward, and the road always sits at the bottom. [`ViewportTransform::to_screen_y`]
//! is the single place that flip happens; the plan and the section both go
//! through it.

use glam::{DVec2, dvec2};

use crate::errors::{Axis, DrawingError};
use crate::types::{Metres, Scale};

/// Canvas area a drawing is fitted into
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Height kept free below the drawing area
    pub reserved_bottom: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: 0.0,
            reserved_bottom: 0.0,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_reserved_bottom(mut self, reserved: f64) -> Self {
        self.reserved_bottom = reserved;
        self
    }

    /// Width and height left for the drawing itself
    pub fn available(&self) -> Result<DVec2, DrawingError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(DrawingError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let w = self.width - 2.0 * self.padding;
        let h = self.height - 2.0 * self.padding - self.reserved_bottom;
        if !valid(w) || !valid(h) {
            return Err(DrawingError::CanvasTooSmall {
                available_width: w,
                available_height: h,
            });
        }
        Ok(dvec2(w, h))
    }
}

/// Uniform scale plus centred offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: Scale,
    origin: DVec2,
    draw_size: DVec2,
}

impl ViewportTransform {
    /// Fit a `world_width` x `world_length` metre area into `canvas`.
    ///
    /// Non-positive or non-finite world extents are rejected instead of
    /// producing a mirrored or collapsed drawing.
    pub fn fit(world_width: f64, world_length: f64, canvas: &Canvas) -> Result<Self, DrawingError> {
        let width = Metres::try_positive(world_width).map_err(|reason| {
            DrawingError::InvalidPlotDimension {
                axis: Axis::Width,
                value: world_width,
                reason,
            }
        })?;
        let length = Metres::try_positive(world_length).map_err(|reason| {
            DrawingError::InvalidPlotDimension {
                axis: Axis::Length,
                value: world_length,
                reason,
            }
        })?;
        let available = canvas.available()?;

        let px_per_m = (available.x / width.raw()).min(available.y / length.raw());
        // both factors are finite and positive at this point
        let scale = Scale::try_new(px_per_m).map_err(|reason| DrawingError::InvalidPlotDimension {
            axis: Axis::Width,
            value: world_width,
            reason,
        })?;

        let draw_size = dvec2(scale.px(width), scale.px(length));
        let origin = DVec2::splat(canvas.padding) + (available - draw_size) / 2.0;

        crate::log::debug!(
            scale = px_per_m,
            origin_x = origin.x,
            origin_y = origin.y,
            draw_w = draw_size.x,
            draw_h = draw_size.y,
            "viewport fitted"
        );

        Ok(Self {
            scale,
            origin,
            draw_size,
        })
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn origin_x(&self) -> f64 {
        self.origin.x
    }

    pub fn origin_y(&self) -> f64 {
        self.origin.y
    }

    pub fn draw_width(&self) -> f64 {
        self.draw_size.x
    }

    pub fn draw_height(&self) -> f64 {
        self.draw_size.y
    }

    /// Canvas y of the world baseline (y = 0)
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.draw_size.y
    }

    pub fn to_screen_x(&self, world_x: f64) -> f64 {
        self.origin.x + world_x * self.scale.raw()
    }

    pub fn to_screen_y(&self, world_y: f64) -> f64 {
        self.origin.y + self.draw_size.y - world_y * self.scale.raw()
    }

    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        dvec2(self.to_screen_x(world.x), self.to_screen_y(world.y))
    }

    /// Length in metres to pixels
    pub fn len(&self, metres: f64) -> f64 {
        self.scale.px(Metres(metres))
    }

    /// Screen rectangle (top-left origin, size) of a world rectangle whose
    /// lower-left corner is `(x, y)`.
    pub fn rect(&self, x: f64, y: f64, width: f64, depth: f64) -> (DVec2, DVec2) {
        let top_left = dvec2(self.to_screen_x(x), self.to_screen_y(y + depth));
        (top_left, dvec2(self.len(width), self.len(depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    fn canvas() -> Canvas {
        Canvas::new(800.0, 600.0).with_padding(50.0)
    }

    #[test]
    fn scale_is_limited_by_tighter_axis() {
        // available 700 x 500; 9 x 12 plot -> min(77.8, 41.67)
        let vp = ViewportTransform::fit(9.0, 12.0, &canvas()).unwrap();
        assert!((vp.scale().raw() - 500.0 / 12.0).abs() < 1e-9);
        assert!((vp.draw_height() - 500.0).abs() < 1e-9);
        assert!((vp.draw_width() - 9.0 * 500.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn drawing_is_centred() {
        let vp = ViewportTransform::fit(9.0, 12.0, &canvas()).unwrap();
        let left = vp.origin_x();
        let right = 800.0 - (vp.origin_x() + vp.draw_width());
        assert!((left - right).abs() < 1e-9);
        assert!((vp.origin_y() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn y_axis_is_flipped() {
        let vp = ViewportTransform::fit(10.0, 10.0, &canvas()).unwrap();
        assert!((vp.to_screen_y(0.0) - vp.bottom()).abs() < 1e-9);
        assert!((vp.to_screen_y(10.0) - vp.origin_y()).abs() < 1e-9);
        assert!(vp.to_screen_y(2.0) > vp.to_screen_y(3.0));
        assert!(vp.to_screen_x(2.0) < vp.to_screen_x(3.0));
    }

    #[test]
    fn reserved_strip_shrinks_available_height() {
        let c = canvas().with_reserved_bottom(100.0);
        let vp = ViewportTransform::fit(10.0, 10.0, &c).unwrap();
        assert!((vp.draw_height() - 400.0).abs() < 1e-9);
        assert!(vp.bottom() <= 600.0 - 50.0 - 100.0 + 1e-9);
    }

    #[test]
    fn rect_maps_lower_left_to_top_left() {
        let vp = ViewportTransform::fit(10.0, 10.0, &Canvas::new(100.0, 100.0)).unwrap();
        let (origin, size) = vp.rect(0.0, 0.0, 4.0, 5.0);
        assert_eq!(origin, dvec2(0.0, 50.0));
        assert_eq!(size, dvec2(40.0, 50.0));
    }

    #[test]
    fn degenerate_world_is_rejected() {
        let err = ViewportTransform::fit(0.0, 12.0, &canvas()).unwrap_err();
        assert_eq!(
            err,
            DrawingError::InvalidPlotDimension {
                axis: Axis::Width,
                value: 0.0,
                reason: NumericError::Zero,
            }
        );
        assert!(matches!(
            ViewportTransform::fit(9.0, -1.0, &canvas()),
            Err(DrawingError::InvalidPlotDimension { axis: Axis::Length, .. })
        ));
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let c = Canvas::new(100.0, 100.0).with_padding(60.0);
        assert!(matches!(
            ViewportTransform::fit(9.0, 12.0, &c),
            Err(DrawingError::CanvasTooSmall { .. })
        ));
        assert!(matches!(
            ViewportTransform::fit(9.0, 12.0, &Canvas::new(0.0, 100.0)),
            Err(DrawingError::InvalidCanvas { .. })
        ));
    }
}
