use glam::DVec2;

/// A point in the simulation domain.
///
/// `x` runs across the soil patch, `y >= 0` is above ground and `y < 0`
/// is below ground (where roots live).
pub type Position = DVec2;

/// An actively growing endpoint, either a shoot tip or a root tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tip {
    pub pos: Position,
    /// Heading in radians.
    pub angle: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    pub pos: Position,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    pub pos: Position,
    pub size: f64,
    pub color: String,
}

impl Tip {
    pub fn new(pos: Position, angle: f64) -> Self {
        Self { pos, angle }
    }
}

impl Segment {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }
}
