//! Default sizes, architectural constants and the frozen lookup tables.
//!
//! World quantities are metres, screen quantities are logical pixels.

use std::collections::BTreeMap;

use crate::model::{RoadSide, RoomType};

use super::scene::Color;

// Plan canvas
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const PADDING: f64 = 60.0;
pub const ROAD_STRIP_HEIGHT: f64 = 22.0;
pub const ROAD_GAP: f64 = 6.0;
pub const SCALE_BAR_STRIP: f64 = 28.0;
/// Row under the road strip for the front dimension of trapezoidal plots
pub const FRONT_DIMENSION_ROW: f64 = 22.0;
pub const TITLE_BLOCK_HEIGHT: f64 = 46.0;

// Walls and openings
pub const EXTERIOR_WALL: f64 = 0.23;
pub const INTERIOR_WALL: f64 = 0.115;
pub const OPENING_TOLERANCE: f64 = 0.05;
pub const WINDOW_PLOT_FRACTION: f64 = 0.12;
pub const WINDOW_MAX: f64 = 1.2;
pub const WINDOW_EDGE_FRACTION: f64 = 0.6;
pub const DOOR_WIDTH: f64 = 0.9;
pub const DOOR_EDGE_FRACTION: f64 = 0.4;
/// Clearance between a door hinge and the corner it starts from
pub const DOOR_HINGE_INSET: f64 = 0.15;
pub const COLUMN_SIZE: f64 = 0.3;

// Labels
pub const LABEL_MIN_WIDTH_PX: f64 = 30.0;
pub const LABEL_MIN_HEIGHT_PX: f64 = 22.0;
pub const LABEL_TWO_LINE_HEIGHT_PX: f64 = 38.0;
pub const FONT_MIN: f64 = 7.0;
pub const FONT_MAX: f64 = 11.0;
pub const CAPTION_FONT: f64 = 6.5;

// Annotations
pub const DIMENSION_OFFSET_PX: f64 = 18.0;
/// Built-extent dimensions sit this fraction of the plot offset inside the plot lines
pub const ENVELOPE_DIMENSION_RATIO: f64 = 0.7;
pub const TICK_PX: f64 = 8.0;
pub const DIMENSION_FONT: f64 = 9.0;
pub const SCALE_BAR_LENGTH: f64 = 3.0;
pub const NORTH_ARROW_RADIUS_PX: f64 = 14.0;
pub const GRID_BUBBLE_RADIUS_PX: f64 = 7.0;

/// Physical size of one logical pixel (96 dpi)
pub const MM_PER_PX: f64 = 0.2646;

// Section
pub const SECTION_CANVAS_WIDTH: f64 = 800.0;
pub const SECTION_CANVAS_HEIGHT: f64 = 500.0;
pub const SECTION_PADDING: f64 = 60.0;
pub const GROUND_FLOOR_HEIGHT: f64 = 3.0;
pub const FIRST_FLOOR_HEIGHT: f64 = 3.0;
pub const SLAB_THICKNESS: f64 = 0.15;
pub const PARAPET_HEIGHT: f64 = 1.0;
pub const FOUNDATION_DEPTH: f64 = 0.6;
pub const STAIR_STEPS: usize = 21;
pub const STAIR_RISER: f64 = 0.15;
pub const STAIR_TREAD: f64 = 0.25;
pub const STEP_VISIBILITY_PX: f64 = 2.0;

/// Fill and stroke for one room category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomPalette {
    pub fill: Color,
    pub stroke: Color,
}

impl RoomPalette {
    pub const fn new(fill: u32, stroke: u32) -> Self {
        Self {
            fill: Color::hex(fill),
            stroke: Color::hex(stroke),
        }
    }
}

/// Neutral entry used for `utility` and every unknown room type
pub const UTILITY_PALETTE: RoomPalette = RoomPalette::new(0xF8FAFC, 0x94A3B8);

/// Ink colours shared by every drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub faint: Color,
    pub rule: Color,
    pub grid: Color,
    pub wall: Color,
    pub road: Color,
    pub opening: Color,
    pub column: Color,
}

impl Default for Ink {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::hex(0x1E293B),
            muted: Color::hex(0x64748B),
            faint: Color::hex(0x94A3B8),
            rule: Color::hex(0xCBD5E1),
            grid: Color::hex(0xE2E8F0),
            wall: Color::hex(0x334155),
            road: Color::hex(0xF1F5F9),
            opening: Color::hex(0x0284C7),
            column: Color::hex(0x475569),
        }
    }
}

/// Frozen lookup tables handed to the renderers.
///
/// Built once and passed by reference; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    palette: BTreeMap<RoomType, RoomPalette>,
    north_rotation: BTreeMap<RoadSide, f64>,
    pub ink: Ink,
}

impl Default for Theme {
    fn default() -> Self {
        let palette = BTreeMap::from([
            (RoomType::Living, RoomPalette::new(0xFEF9C3, 0xCA8A04)),
            (RoomType::Bedroom, RoomPalette::new(0xEDE9FE, 0x7C3AED)),
            (RoomType::MasterBedroom, RoomPalette::new(0xF3E8FF, 0x9333EA)),
            (RoomType::Kitchen, RoomPalette::new(0xDCFCE7, 0x16A34A)),
            (RoomType::Toilet, RoomPalette::new(0xE0F2FE, 0x0284C7)),
            (RoomType::Staircase, RoomPalette::new(0xF1F5F9, 0x64748B)),
            (RoomType::Parking, RoomPalette::new(0xF8FAFC, 0x94A3B8)),
            (RoomType::Utility, UTILITY_PALETTE),
            (RoomType::Pooja, RoomPalette::new(0xFFEDD5, 0xEA580C)),
            (RoomType::Study, RoomPalette::new(0xE0E7FF, 0x4F46E5)),
            (RoomType::Balcony, RoomPalette::new(0xECFCCB, 0x65A30D)),
            (RoomType::Dining, RoomPalette::new(0xFEF3C7, 0xD97706)),
        ]);
        // "up" on the sheet faces away from the road
        let north_rotation = BTreeMap::from([
            (RoadSide::South, 0.0),
            (RoadSide::East, 90.0),
            (RoadSide::North, 180.0),
            (RoadSide::West, 270.0),
        ]);
        Self {
            palette,
            north_rotation,
            ink: Ink::default(),
        }
    }
}

impl Theme {
    /// Palette entry for a room type, falling back to the utility entry.
    pub fn room(&self, room_type: &RoomType) -> RoomPalette {
        self.palette.get(room_type).copied().unwrap_or(UTILITY_PALETTE)
    }

    /// Clockwise rotation in degrees of the north arrow
    pub fn north_rotation(&self, road_side: RoadSide) -> f64 {
        self.north_rotation.get(&road_side).copied().unwrap_or(0.0)
    }

    /// Copy of this theme with one palette entry replaced
    pub fn with_room(mut self, room_type: RoomType, palette: RoomPalette) -> Self {
        self.palette.insert(room_type, palette);
        self
    }
}
