//! Error types with diagnostics using miette
//!
//! Every error here is an input-contract violation detected before any
//! drawing node is produced. The engine performs no I/O, so there is no
//! recoverable/fatal split.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Which plot axis a dimension error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Plot width (x, along the road)
    Width,
    /// Plot length (y, away from the road)
    Length,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Length => write!(f, "length"),
        }
    }
}

// ============================================================================
// Input Errors
// ============================================================================

/// Errors raised while validating drawing inputs
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DrawingError {
    #[error("invalid plot {axis}: {value} ({reason})")]
    #[diagnostic(
        code(planforge::input::invalid_plot_dimension),
        help("plot width and length must be finite and greater than zero metres")
    )]
    InvalidPlotDimension {
        axis: Axis,
        value: f64,
        reason: NumericError,
    },

    #[error("invalid trapezoid plot: front {front} m, rear {rear} m")]
    #[diagnostic(
        code(planforge::input::invalid_trapezoid),
        help("both the front and rear widths of a trapezoidal plot must be positive")
    )]
    InvalidTrapezoid { front: f64, rear: f64 },

    #[error("invalid building width: {value} ({reason})")]
    #[diagnostic(
        code(planforge::input::invalid_building_width),
        help("the section view needs a finite, positive building width in metres")
    )]
    InvalidBuildingWidth { value: f64, reason: NumericError },

    #[error("invalid section {dimension}: {value} ({reason})")]
    #[diagnostic(
        code(planforge::input::invalid_section_dimension),
        help(
            "storey heights and slab thickness must be greater than zero; \
             foundation depth and parapet height may be zero but not negative"
        )
    )]
    InvalidSectionDimension {
        dimension: &'static str,
        value: f64,
        reason: NumericError,
    },

    #[error("invalid canvas size: {width} x {height}")]
    #[diagnostic(code(planforge::render::invalid_canvas))]
    InvalidCanvas { width: f64, height: f64 },

    #[error("canvas leaves no drawing area: {available_width} x {available_height} px")]
    #[diagnostic(
        code(planforge::render::canvas_too_small),
        help("reduce the padding or reserved strips, or enlarge the canvas")
    )]
    CanvasTooSmall {
        available_width: f64,
        available_height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_dimension_message_names_axis_and_reason() {
        let err = DrawingError::InvalidPlotDimension {
            axis: Axis::Length,
            value: -3.0,
            reason: NumericError::Negative,
        };
        assert_eq!(err.to_string(), "invalid plot length: -3 (value is negative)");
    }

    #[test]
    fn diagnostic_codes_are_namespaced() {
        let err = DrawingError::InvalidTrapezoid { front: 0.0, rear: 9.0 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("planforge::input::invalid_trapezoid"));
    }

    #[test]
    fn section_dimension_error_has_help() {
        let err = DrawingError::InvalidSectionDimension {
            dimension: "parapet height",
            value: -0.2,
            reason: NumericError::Negative,
        };
        assert_eq!(err.to_string(), "invalid section parapet height: -0.2 (value is negative)");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("planforge::input::invalid_section_dimension"));
        assert!(err.help().is_some());
    }
}
