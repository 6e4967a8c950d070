//! Cropping connection ends onto shape outlines

use crate::docking::ShapeRegistry;
use crate::error::RoutingError;
use crate::layout::types::{Point, Shape, Side};

/// Side of the shape at `end` a connection towards `next` docks on
fn docking_side(end: Point, next: Point) -> Side {
    if end.y == next.y {
        if end.x > next.x {
            Side::Left
        } else {
            Side::Right
        }
    } else if end.y > next.y {
        Side::Top
    } else {
        Side::Bottom
    }
}

/// Move the first and last waypoint onto the outlines of `source` and
/// `target`.
///
/// The side is inferred from the neighbouring waypoint; the inner
/// waypoints are kept as they are.
pub fn crop_waypoints(
    registry: &ShapeRegistry,
    waypoints: &[Point],
    source: &Shape,
    target: &Shape,
) -> Result<Vec<Point>, RoutingError> {
    let count = waypoints.len();
    if count < 2 {
        return Err(RoutingError::invalid_connection(format!(
            "cannot crop {} waypoint(s), need at least two",
            count
        )));
    }

    let (first, last) = (waypoints[0], waypoints[count - 1]);
    let start = registry.dock(first, source, docking_side(first, waypoints[1]))?;
    let end = registry.dock(last, target, docking_side(last, waypoints[count - 2]))?;

    let mut cropped = Vec::with_capacity(count);
    cropped.push(start.point);
    cropped.extend_from_slice(&waypoints[1..count - 1]);
    cropped.push(end.point);

    Ok(cropped)
}
