//! Building envelope and wall grid extraction.
//!
//! The envelope is the bounding box of a floor's rooms and stands in for the
//! building's outside face. Every distinct room-edge position is collected
//! per axis; the outermost positions are exterior walls, everything strictly
//! between them becomes an interior wall grid line.
//!
//! Positions are keyed on integer millimetres so that two rooms sharing an
//! edge produce exactly one grid line regardless of input order or float
//! noise in the upstream data.

use std::collections::{BTreeMap, BTreeSet};

use glam::{DVec2, dvec2};

use crate::model::{ColumnMarker, RoomRect, mm_key};

/// Rooms that can actually be drawn. Degenerate rooms are dropped with a
/// warning instead of being clamped into the drawing.
pub fn drawable_rooms(rooms: &[RoomRect]) -> Vec<&RoomRect> {
    rooms
        .iter()
        .filter(|room| {
            let ok = room.is_drawable();
            if !ok {
                crate::log::warn!(
                    id = %room.id,
                    width = room.width,
                    depth = room.depth,
                    "skipping degenerate room"
                );
            }
            ok
        })
        .collect()
}

/// Axis-aligned bounding box of a room set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

impl Envelope {
    /// The conventional empty box: min at +inf, max at -inf.
    pub const fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn from_rooms<'a>(rooms: impl IntoIterator<Item = &'a RoomRect>) -> Self {
        let mut env = Self::empty();
        for room in rooms.into_iter().filter(|r| r.is_drawable()) {
            env.include(room);
        }
        env
    }

    pub fn include(&mut self, room: &RoomRect) {
        self.min_x = self.min_x.min(room.x);
        self.max_x = self.max_x.max(room.x2());
        self.min_y = self.min_y.min(room.y);
        self.max_y = self.max_y.max(room.y2());
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn depth(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    /// Grow (or shrink, for negative `d`) on every side
    pub fn offset(&self, d: f64) -> Self {
        Self {
            min_x: self.min_x - d,
            max_x: self.max_x + d,
            min_y: self.min_y - d,
            max_y: self.max_y + d,
        }
    }

    pub fn min(&self) -> DVec2 {
        dvec2(self.min_x, self.min_y)
    }

    pub fn max(&self) -> DVec2 {
        dvec2(self.max_x, self.max_y)
    }
}

/// Orientation of a wall grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallAxis {
    /// Constant x, runs along y
    Vertical,
    /// Constant y, runs along x
    Horizontal,
}

/// An interior wall position with the stretches where room edges lie on it
#[derive(Debug, Clone, PartialEq)]
pub struct WallGridLine {
    pub axis: WallAxis,
    pub position: f64,
    /// Merged `(start, end)` spans along the run direction, sorted
    pub spans: Vec<(f64, f64)>,
}

impl WallGridLine {
    pub fn length(&self) -> f64 {
        self.spans.iter().map(|(a, b)| b - a).sum()
    }
}

/// Envelope plus classified wall positions for one floor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WallGrid {
    pub envelope: Envelope,
    /// Every distinct vertical edge position, ascending
    pub xs: Vec<f64>,
    /// Every distinct horizontal edge position, ascending
    pub ys: Vec<f64>,
    /// Strictly interior grid lines, verticals first then horizontals
    pub interior: Vec<WallGridLine>,
}

impl WallGrid {
    pub fn interior_positions(&self, axis: WallAxis) -> Vec<f64> {
        self.interior
            .iter()
            .filter(|l| l.axis == axis)
            .map(|l| l.position)
            .collect()
    }
}

type EdgeMap = BTreeMap<i64, Vec<(f64, f64)>>;

/// Derive the envelope and the deduplicated interior wall grid of a floor.
pub fn extract_walls(rooms: &[RoomRect]) -> WallGrid {
    let rooms: Vec<&RoomRect> = rooms.iter().filter(|r| r.is_drawable()).collect();
    let envelope = Envelope::from_rooms(rooms.iter().copied());
    if envelope.is_empty() {
        return WallGrid::default();
    }

    let mut vertical: EdgeMap = BTreeMap::new();
    let mut horizontal: EdgeMap = BTreeMap::new();
    for room in &rooms {
        for x in [room.x, room.x2()] {
            vertical.entry(mm_key(x)).or_default().push((room.y, room.y2()));
        }
        for y in [room.y, room.y2()] {
            horizontal.entry(mm_key(y)).or_default().push((room.x, room.x2()));
        }
    }

    let xs: Vec<f64> = vertical.keys().map(|&k| from_mm(k)).collect();
    let ys: Vec<f64> = horizontal.keys().map(|&k| from_mm(k)).collect();

    let mut interior = interior_lines(WallAxis::Vertical, vertical);
    interior.extend(interior_lines(WallAxis::Horizontal, horizontal));

    crate::log::debug!(
        min_x = envelope.min_x,
        max_x = envelope.max_x,
        min_y = envelope.min_y,
        max_y = envelope.max_y,
        interior = interior.len(),
        "wall grid extracted"
    );

    WallGrid {
        envelope,
        xs,
        ys,
        interior,
    }
}

fn interior_lines(axis: WallAxis, edges: EdgeMap) -> Vec<WallGridLine> {
    // first and last keys are the exterior faces
    let (Some(&lo), Some(&hi)) = (edges.keys().next(), edges.keys().next_back()) else {
        return Vec::new();
    };
    edges
        .into_iter()
        .filter(|(key, _)| *key > lo && *key < hi)
        .map(|(key, spans)| WallGridLine {
            axis,
            position: from_mm(key),
            spans: merge_spans(spans),
        })
        .collect()
}

fn from_mm(key: i64) -> f64 {
    key as f64 / 1000.0
}

/// Sort and merge overlapping or touching spans.
pub fn merge_spans(mut spans: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 + 1e-3 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Outer structural face and inner finish face of the exterior wall.
///
/// The envelope line is the wall centre line; the faces sit half a wall
/// thickness either side of it.
pub fn exterior_faces(envelope: &Envelope, thickness: f64) -> (Envelope, Envelope) {
    let half = thickness / 2.0;
    (envelope.offset(half), envelope.offset(-half))
}

/// Deduplicate columns by millimetre coordinate, keeping first occurrences.
pub fn dedup_columns(columns: &[ColumnMarker]) -> Vec<ColumnMarker> {
    let mut seen = BTreeSet::new();
    columns
        .iter()
        .filter(|c| c.x.is_finite() && c.y.is_finite())
        .filter(|c| seen.insert(c.key()))
        .copied()
        .collect()
}

/// Columns at every distinct room corner, in millimetre-key order.
///
/// Only real room corners are used, not every crossing of the wall grid
/// lines: an L-shaped footprint gets no column in its empty notch.
pub fn infer_columns(rooms: &[RoomRect]) -> Vec<ColumnMarker> {
    let corners: BTreeSet<(i64, i64)> = rooms
        .iter()
        .filter(|r| r.is_drawable())
        .flat_map(|r| {
            [
                (r.x, r.y),
                (r.x2(), r.y),
                (r.x2(), r.y2()),
                (r.x, r.y2()),
            ]
        })
        .map(|(x, y)| (mm_key(x), mm_key(y)))
        .collect();
    corners
        .into_iter()
        .map(|(x, y)| ColumnMarker::new(from_mm(x), from_mm(y)))
        .collect()
}
