//! Path construction for iterative geometry.
//!
//! [`PathData`] is the scene's path representation: an ordered list of
//! absolute drawing commands built with chained calls
//! (`PathData::new().m(..).h(..).v(..)`).
//!
//! [`StepPathBuilder`] walks riser/tread pairs to produce a staircase
//! profile. It is a small state machine: each `rise` must be followed by a
//! `run` before the pair counts as a completed step, and a `rise` directly
//! after another `rise` accumulates on the same vertical segment instead of
//! emitting a new one.

use glam::{DVec2, dvec2};

/// A single absolute path command in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Horizontal line to an absolute x
    Horizontal(f64),
    /// Vertical line to an absolute y
    Vertical(f64),
    /// Circular arc of `radius` ending at `to`
    Arc { radius: f64, sweep: bool, to: DVec2 },
    Close,
}

/// Ordered path commands
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(dvec2(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(dvec2(x, y)));
        self
    }

    pub fn h(mut self, x: f64) -> Self {
        self.commands.push(PathCommand::Horizontal(x));
        self
    }

    pub fn v(mut self, y: f64) -> Self {
        self.commands.push(PathCommand::Vertical(y));
        self
    }

    pub fn a(mut self, radius: f64, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radius,
            sweep,
            to: dvec2(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of horizontal and vertical segments, in that order.
    pub fn axis_segment_counts(&self) -> (usize, usize) {
        self.commands.iter().fold((0, 0), |(h, v), cmd| match cmd {
            PathCommand::Horizontal(_) => (h + 1, v),
            PathCommand::Vertical(_) => (h, v + 1),
            _ => (h, v),
        })
    }
}

/// Which kind of segment was emitted last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    None,
    Rise,
    Run,
}

/// One riser/tread pair in world metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Nosing corner at the top of the riser
    pub nosing: DVec2,
    pub riser: f64,
    pub tread: f64,
}

/// A stepped profile: vertices plus the completed steps
#[derive(Debug, Clone, PartialEq)]
pub struct StepProfile {
    /// Every vertex from the start point to the last tread end
    pub vertices: Vec<DVec2>,
    pub steps: Vec<Step>,
}

impl StepProfile {
    pub fn start(&self) -> DVec2 {
        self.vertices[0]
    }

    pub fn end(&self) -> DVec2 {
        self.vertices[self.vertices.len() - 1]
    }

    /// Total horizontal run
    pub fn run(&self) -> f64 {
        self.end().x - self.start().x
    }

    /// Total vertical rise
    pub fn rise(&self) -> f64 {
        self.end().y - self.start().y
    }
}

/// Builder that walks riser/tread pairs in world coordinates (y up).
#[derive(Debug)]
pub struct StepPathBuilder {
    vertices: Vec<DVec2>,
    steps: Vec<Step>,
    last: Segment,
    pending_riser: f64,
}

impl StepPathBuilder {
    pub fn new(start: DVec2) -> Self {
        Self {
            vertices: vec![start],
            steps: Vec::new(),
            last: Segment::None,
            pending_riser: 0.0,
        }
    }

    fn current(&self) -> DVec2 {
        self.vertices[self.vertices.len() - 1]
    }

    /// Climb by `height`. Consecutive rises merge into one vertical segment.
    pub fn rise(&mut self, height: f64) -> &mut Self {
        let next = self.current() + dvec2(0.0, height);
        if self.last == Segment::Rise {
            let n = self.vertices.len() - 1;
            self.vertices[n] = next;
        } else {
            self.vertices.push(next);
        }
        self.pending_riser += height;
        self.last = Segment::Rise;
        self
    }

    /// Advance by `width`. Completes a step when it follows a rise.
    pub fn run(&mut self, width: f64) -> &mut Self {
        let nosing = self.current();
        if self.last == Segment::Rise {
            self.steps.push(Step {
                nosing,
                riser: self.pending_riser,
                tread: width,
            });
            self.pending_riser = 0.0;
        }
        if self.last == Segment::Run {
            let n = self.vertices.len() - 1;
            self.vertices[n] = nosing + dvec2(width, 0.0);
        } else {
            self.vertices.push(nosing + dvec2(width, 0.0));
        }
        self.last = Segment::Run;
        self
    }

    /// Walk `n_steps` identical riser/tread pairs.
    pub fn flight(&mut self, n_steps: usize, riser: f64, tread: f64) -> &mut Self {
        for _ in 0..n_steps {
            self.rise(riser);
            self.run(tread);
        }
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn build(self) -> StepProfile {
        StepProfile {
            vertices: self.vertices,
            steps: self.steps,
        }
    }
}
