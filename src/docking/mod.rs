//! Docking connections onto shape boundaries
//!
//! Every shape kind brings its own [`ShapeSupport`]: where a connection
//! arriving on a given side touches the outline, and whether a point lies
//! inside the shape. The [`ShapeRegistry`] maps kinds to their support and
//! is built once, before any routing happens.

mod registry;
mod shapes;

pub use registry::ShapeRegistry;
pub use shapes::{CircleSupport, RectangleSupport, ShapeSupport};

use crate::layout::directions::Direction;
use crate::layout::orientation::Orientation;
use crate::layout::types::{Point, Side};

/// Where a connection attaches to a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Docking {
    /// Attachment point on the requested side
    pub point: Point,
    /// Alternative attachment on another side the connector may prefer
    pub changed_point: Option<Point>,
    /// Side of `changed_point` if present, otherwise the requested side
    pub side: Side,
}

impl Docking {
    pub fn new(point: Point, side: Side) -> Self {
        Self {
            point,
            changed_point: None,
            side,
        }
    }

    pub fn redirected(point: Point, changed_point: Point, side: Side) -> Self {
        Self {
            point,
            changed_point: Some(changed_point),
            side,
        }
    }
}

/// Concrete side for a docking direction.
///
/// `h` and `v` pick the side facing the other end of the connection, as
/// given by `orientation` (the other end relative to the docked shape).
/// Explicit sides are taken as they are.
pub fn resolve_side(direction: Direction, orientation: Orientation) -> Side {
    match direction {
        Direction::Top => Side::Top,
        Direction::Right => Side::Right,
        Direction::Bottom => Side::Bottom,
        Direction::Left => Side::Left,
        Direction::Horizontal if orientation.is_left() => Side::Left,
        Direction::Horizontal => Side::Right,
        Direction::Vertical if orientation.is_top() => Side::Top,
        Direction::Vertical => Side::Bottom,
    }
}
