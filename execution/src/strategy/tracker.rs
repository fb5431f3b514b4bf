//! Point state tracking.
//!
//! The table owns the point. The tracker only remembers what it saw last so that two
//! consecutive observations can be compared.

use layline_types::Point;

/// Edge between two consecutive observations of the point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// `Off` -> `On(number)`.
    Established(u8),
    /// `On(number)` -> `Off`, by point made or seven-out.
    Resolved(u8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointTracker {
    last: Point,
}

impl PointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed phase (`Off` before the first observation).
    pub fn current(&self) -> Point {
        self.last
    }

    /// Record `point` and report the edge from the previous observation.
    pub fn observe(&mut self, point: Point) -> Transition {
        let previous = std::mem::replace(&mut self.last, point);
        match (previous, point) {
            (Point::Off, Point::On(number)) => Transition::Established(number),
            (Point::On(number), Point::Off) => Transition::Resolved(number),
            _ => Transition::Unchanged,
        }
    }
}
