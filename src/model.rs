//! Input contract: plot metadata, rooms and columns for one or more floors.
//!
//! All coordinates are metres in the plot-local frame. The origin is the
//! plot's front-left corner, x runs along the road and y runs away from it.
//! These types are plain data; the renderer never mutates them.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::errors::{Axis, DrawingError};
use crate::types::Metres;

/// Room category as reported by the layout source.
///
/// Unknown categories are preserved in [`RoomType::Other`] and drawn with the
/// neutral utility palette entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum RoomType {
    Living,
    Bedroom,
    MasterBedroom,
    Kitchen,
    Toilet,
    Staircase,
    Parking,
    Utility,
    Pooja,
    Study,
    Balcony,
    Dining,
    ServantQuarter,
    Gym,
    HomeOffice,
    StoreRoom,
    Garage,
    Passage,
    Other(String),
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::Living => "living",
            RoomType::Bedroom => "bedroom",
            RoomType::MasterBedroom => "master_bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Toilet => "toilet",
            RoomType::Staircase => "staircase",
            RoomType::Parking => "parking",
            RoomType::Utility => "utility",
            RoomType::Pooja => "pooja",
            RoomType::Study => "study",
            RoomType::Balcony => "balcony",
            RoomType::Dining => "dining",
            RoomType::ServantQuarter => "servant_quarter",
            RoomType::Gym => "gym",
            RoomType::HomeOffice => "home_office",
            RoomType::StoreRoom => "store_room",
            RoomType::Garage => "garage",
            RoomType::Passage => "passage",
            RoomType::Other(s) => s,
        }
    }

    /// Rooms that receive windows on exterior-facing edges.
    pub fn is_habitable(&self) -> bool {
        matches!(
            self,
            RoomType::Living
                | RoomType::Bedroom
                | RoomType::MasterBedroom
                | RoomType::Kitchen
                | RoomType::Study
                | RoomType::Dining
        )
    }

    /// Rooms that receive one door on an exterior-facing edge.
    pub fn takes_door(&self) -> bool {
        self.is_habitable() || *self == RoomType::Utility
    }
}

impl From<&str> for RoomType {
    fn from(s: &str) -> Self {
        match s {
            "living" => RoomType::Living,
            "bedroom" => RoomType::Bedroom,
            "master_bedroom" => RoomType::MasterBedroom,
            "kitchen" => RoomType::Kitchen,
            "toilet" => RoomType::Toilet,
            "staircase" => RoomType::Staircase,
            "parking" => RoomType::Parking,
            "utility" => RoomType::Utility,
            "pooja" => RoomType::Pooja,
            "study" => RoomType::Study,
            "balcony" => RoomType::Balcony,
            "dining" => RoomType::Dining,
            "servant_quarter" => RoomType::ServantQuarter,
            "gym" => RoomType::Gym,
            "home_office" => RoomType::HomeOffice,
            "store_room" => RoomType::StoreRoom,
            "garage" => RoomType::Garage,
            "passage" => RoomType::Passage,
            other => RoomType::Other(other.to_string()),
        }
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        RoomType::from(s.as_str())
    }
}

impl From<RoomType> for String {
    fn from(t: RoomType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rectangular room on one floor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomRect {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub room_type: RoomType,
    /// Left edge, metres from the plot's left boundary
    pub x: f64,
    /// Front edge, metres from the road-side boundary
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    /// Precomputed floor area in square metres, used for the label only
    pub area: f64,
}

impl RoomRect {
    /// Build a room with its area computed from the extents.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        room_type: impl Into<RoomType>,
        x: f64,
        y: f64,
        width: f64,
        depth: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            room_type: room_type.into(),
            x,
            y,
            width,
            depth,
            area: (width * depth * 100.0).round() / 100.0,
        }
    }

    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    pub fn y2(&self) -> f64 {
        self.y + self.depth
    }

    pub fn center(&self) -> DVec2 {
        dvec2(self.x + self.width / 2.0, self.y + self.depth / 2.0)
    }

    /// True when every coordinate is finite and both extents are positive.
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.depth].iter().all(|v| v.is_finite())
            && self.width > 0.0
            && self.depth > 0.0
    }
}

/// A structural column position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMarker {
    pub x: f64,
    pub y: f64,
}

impl ColumnMarker {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Millimetre grid key used for deduplication.
    pub(crate) fn key(&self) -> (i64, i64) {
        (mm_key(self.x), mm_key(self.y))
    }
}

/// Snap a metre coordinate to an integer millimetre key.
pub(crate) fn mm_key(v: f64) -> i64 {
    (v * 1000.0).round() as i64
}

/// Rooms and columns for one floor
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlan {
    /// -1 basement, 0 ground/stilt, 1 first, 2 second
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: i32,
    pub rooms: Vec<RoomRect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub columns: Vec<ColumnMarker>,
}

impl FloorPlan {
    pub fn new(level: i32, rooms: Vec<RoomRect>, columns: Vec<ColumnMarker>) -> Self {
        Self { level, rooms, columns }
    }

    /// Display label for the floor level
    pub fn label(&self) -> String {
        match self.level {
            -1 => "Basement".to_string(),
            0 => "Ground Floor".to_string(),
            1 => "First Floor".to_string(),
            2 => "Second Floor".to_string(),
            3 => "Third Floor".to_string(),
            n if n < 0 => format!("Basement {}", -n),
            n => format!("Floor {}", n),
        }
    }
}

/// A candidate layout: the floors of one building design
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub id: String,
    pub name: String,
    pub floors: Vec<FloorPlan>,
}

/// Compass side of the plot that faces the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadSide {
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    North,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    South,
    #[cfg_attr(feature = "serde", serde(rename = "E"))]
    East,
    #[cfg_attr(feature = "serde", serde(rename = "W"))]
    West,
}

impl RoadSide {
    pub fn letter(self) -> char {
        match self {
            RoadSide::North => 'N',
            RoadSide::South => 'S',
            RoadSide::East => 'E',
            RoadSide::West => 'W',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(RoadSide::North),
            'S' => Some(RoadSide::South),
            'E' => Some(RoadSide::East),
            'W' => Some(RoadSide::West),
            _ => None,
        }
    }
}

/// Plot outline shape
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "lowercase"))]
pub enum PlotShape {
    #[default]
    Rectangle,
    /// Front (road-side) and rear widths differ; both edges start at x = 0
    Trapezoid { front_width: f64, rear_width: f64 },
}

/// Plot-level metadata accompanying every floor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plot {
    pub width: f64,
    pub length: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_side: RoadSide,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: PlotShape,
    /// Width of the access road in metres, shown in the road strip label
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_width: Option<f64>,
}

impl Plot {
    pub fn rectangle(width: f64, length: f64, road_side: RoadSide) -> Self {
        Self {
            width,
            length,
            road_side,
            shape: PlotShape::Rectangle,
            road_width: None,
        }
    }

    pub fn trapezoid(front_width: f64, rear_width: f64, length: f64, road_side: RoadSide) -> Self {
        Self {
            width: front_width.max(rear_width),
            length,
            road_side,
            shape: PlotShape::Trapezoid {
                front_width,
                rear_width,
            },
            road_width: None,
        }
    }

    pub fn with_road_width(mut self, road_width: f64) -> Self {
        self.road_width = Some(road_width);
        self
    }

    /// Validate the plot and return its world extents.
    ///
    /// The horizontal extent covers the widest of the nominal, front and
    /// rear widths so a trapezoid never spills out of the viewport.
    pub fn extents(&self) -> Result<(Metres, Metres), DrawingError> {
        let width = Metres::try_positive(self.width).map_err(|reason| {
            DrawingError::InvalidPlotDimension {
                axis: Axis::Width,
                value: self.width,
                reason,
            }
        })?;
        let length = Metres::try_positive(self.length).map_err(|reason| {
            DrawingError::InvalidPlotDimension {
                axis: Axis::Length,
                value: self.length,
                reason,
            }
        })?;

        match self.shape {
            PlotShape::Rectangle => Ok((width, length)),
            PlotShape::Trapezoid {
                front_width,
                rear_width,
            } => {
                let invalid = DrawingError::InvalidTrapezoid {
                    front: front_width,
                    rear: rear_width,
                };
                let front = Metres::try_positive(front_width).map_err(|_| invalid.clone())?;
                let rear = Metres::try_positive(rear_width).map_err(|_| invalid)?;
                Ok((width.max(front).max(rear), length))
            }
        }
    }

    /// Plot boundary polygon in world metres, counter-clockwise from the
    /// front-left corner.
    pub fn outline(&self) -> [DVec2; 4] {
        [
            dvec2(0.0, 0.0),
            dvec2(self.width_at(0.0), 0.0),
            dvec2(self.width_at(self.length), self.length),
            dvec2(0.0, self.length),
        ]
    }

    /// Plot width at depth `y`, interpolated between the front and rear edges.
    pub fn width_at(&self, y: f64) -> f64 {
        match self.shape {
            PlotShape::Rectangle => self.width,
            PlotShape::Trapezoid {
                front_width,
                rear_width,
            } => {
                if y >= self.length {
                    return rear_width;
                }
                let t = if self.length > 0.0 { (y / self.length).max(0.0) } else { 0.0 };
                front_width + (rear_width - front_width) * t
            }
        }
    }
}

/// Caller-supplied title block content.
///
/// The date is plain text from the host; the engine never reads the clock.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleBlock {
    pub project: String,
    pub layout: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
}
