//! Window and door placement.
//!
//! An edge of a room is exterior when it lies on the building envelope
//! within an absolute tolerance. Habitable rooms get a window on every
//! exterior edge. Habitable and utility rooms get at most one door, on the
//! first exterior edge in front, rear, left, right order.

use glam::{DVec2, dvec2};

use crate::model::RoomRect;

use super::defaults;
use super::envelope::Envelope;

/// One side of a room rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge {
    /// `y = room.y`, the road-facing side
    Front,
    /// `y = room.y + depth`
    Rear,
    /// `x = room.x`
    Left,
    /// `x = room.x + width`
    Right,
}

impl Edge {
    /// Door preference order
    pub const ALL: [Edge; 4] = [Edge::Front, Edge::Rear, Edge::Left, Edge::Right];

    /// True for edges that run along x
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Front | Edge::Rear)
    }

    /// Unit normal pointing into the room
    pub fn inward(self) -> DVec2 {
        match self {
            Edge::Front => DVec2::Y,
            Edge::Rear => DVec2::NEG_Y,
            Edge::Left => DVec2::X,
            Edge::Right => DVec2::NEG_X,
        }
    }

    /// Unit direction the edge runs in, from its start corner
    pub fn along(self) -> DVec2 {
        if self.is_horizontal() { DVec2::X } else { DVec2::Y }
    }

    /// Start and end corners of this edge on `room`
    pub fn segment(self, room: &RoomRect) -> (DVec2, DVec2) {
        match self {
            Edge::Front => (dvec2(room.x, room.y), dvec2(room.x2(), room.y)),
            Edge::Rear => (dvec2(room.x, room.y2()), dvec2(room.x2(), room.y2())),
            Edge::Left => (dvec2(room.x, room.y), dvec2(room.x, room.y2())),
            Edge::Right => (dvec2(room.x2(), room.y), dvec2(room.x2(), room.y2())),
        }
    }

    pub fn length(self, room: &RoomRect) -> f64 {
        if self.is_horizontal() { room.width } else { room.depth }
    }

    /// Distance between this edge of `room` and the matching envelope side
    pub fn gap(self, room: &RoomRect, env: &Envelope) -> f64 {
        match self {
            Edge::Front => (room.y - env.min_y).abs(),
            Edge::Rear => (room.y2() - env.max_y).abs(),
            Edge::Left => (room.x - env.min_x).abs(),
            Edge::Right => (room.x2() - env.max_x).abs(),
        }
    }

    /// Coordinate of the envelope side this edge is tested against
    fn envelope_line(self, env: &Envelope) -> f64 {
        match self {
            Edge::Front => env.min_y,
            Edge::Rear => env.max_y,
            Edge::Left => env.min_x,
            Edge::Right => env.max_x,
        }
    }
}

/// Tunable placement rules, all in metres
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningRules {
    /// An edge within this distance of the envelope counts as exterior
    pub tolerance: f64,
    pub window_plot_fraction: f64,
    pub window_max: f64,
    pub window_edge_fraction: f64,
    pub door_width: f64,
    pub door_edge_fraction: f64,
    pub door_hinge_inset: f64,
}

impl Default for OpeningRules {
    fn default() -> Self {
        Self {
            tolerance: defaults::OPENING_TOLERANCE,
            window_plot_fraction: defaults::WINDOW_PLOT_FRACTION,
            window_max: defaults::WINDOW_MAX,
            window_edge_fraction: defaults::WINDOW_EDGE_FRACTION,
            door_width: defaults::DOOR_WIDTH,
            door_edge_fraction: defaults::DOOR_EDGE_FRACTION,
            door_hinge_inset: defaults::DOOR_HINGE_INSET,
        }
    }
}

/// Window centred on an exterior edge, in world metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSymbol {
    /// Mid-edge point, on the envelope line
    pub center: DVec2,
    pub length: f64,
    pub edge: Edge,
}

/// Door on an exterior edge, in world metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSymbol {
    pub hinge: DVec2,
    /// Leaf length, also the swing radius
    pub radius: f64,
    pub edge: Edge,
}

impl DoorSymbol {
    /// Far end of the opening along the wall (the closed leaf tip)
    pub fn closed_tip(&self) -> DVec2 {
        self.hinge + self.edge.along() * self.radius
    }

    /// Leaf tip when swung fully into the room
    pub fn open_tip(&self) -> DVec2 {
        self.hinge + self.edge.inward() * self.radius
    }
}

/// Openings synthesised for one room
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoomOpenings {
    pub windows: Vec<WindowSymbol>,
    pub door: Option<DoorSymbol>,
}

/// Exterior edges of `room`, in door preference order.
///
/// A gap must be strictly below the tolerance; a gap equal to it does not qualify.
pub fn exterior_edges(room: &RoomRect, env: &Envelope, tolerance: f64) -> Vec<Edge> {
    if env.is_empty() {
        return Vec::new();
    }
    Edge::ALL
        .into_iter()
        .filter(|edge| edge.gap(room, env) < tolerance)
        .collect()
}

/// Windows and door for one room.
pub fn place_openings(
    room: &RoomRect,
    env: &Envelope,
    plot_width: f64,
    rules: &OpeningRules,
) -> RoomOpenings {
    if !room.is_drawable() {
        return RoomOpenings::default();
    }
    let habitable = room.room_type.is_habitable();
    if !habitable && !room.room_type.takes_door() {
        return RoomOpenings::default();
    }

    let edges = exterior_edges(room, env, rules.tolerance);
    let windows = if habitable {
        edges
            .iter()
            .map(|&edge| window_on(room, env, edge, plot_width, rules))
            .collect()
    } else {
        Vec::new()
    };
    let door = edges.first().map(|&edge| door_on(room, edge, rules));

    crate::log::trace!(
        id = %room.id,
        exterior = edges.len(),
        windows = windows.len(),
        door = door.is_some(),
        "openings placed"
    );

    RoomOpenings { windows, door }
}

fn window_on(
    room: &RoomRect,
    env: &Envelope,
    edge: Edge,
    plot_width: f64,
    rules: &OpeningRules,
) -> WindowSymbol {
    let length = (plot_width * rules.window_plot_fraction)
        .min(rules.window_max)
        .min(edge.length(room) * rules.window_edge_fraction);
    let mid = room.center();
    let line = edge.envelope_line(env);
    let center = if edge.is_horizontal() {
        dvec2(mid.x, line)
    } else {
        dvec2(line, mid.y)
    };
    WindowSymbol {
        center,
        length,
        edge,
    }
}

fn door_on(room: &RoomRect, edge: Edge, rules: &OpeningRules) -> DoorSymbol {
    let edge_len = edge.length(room);
    let radius = rules.door_width.min(edge_len * rules.door_edge_fraction);
    let (start, _) = edge.segment(room);
    let offset = if edge_len >= radius + 2.0 * rules.door_hinge_inset {
        rules.door_hinge_inset
    } else {
        (edge_len - radius) / 2.0
    };
    DoorSymbol {
        hinge: start + edge.along() * offset,
        radius,
        edge,
    }
}
