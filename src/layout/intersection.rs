//! Hit-testing a point against a connection

use super::geometry::{circle_segment_intersections, point_distance, round_point};
use super::types::Point;

/// Where a reference point meets a connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxIntersection {
    pub point: Point,
    /// The hit snapped onto an existing waypoint
    pub bendpoint: bool,
    /// Index of the waypoint that was hit, or of the end waypoint of the
    /// segment that was hit
    pub index: usize,
}

/// Closest point on the connection towards `reference`.
///
/// A waypoint within `threshold` wins outright. Otherwise a circle of
/// radius `threshold` around the reference is intersected with the path:
/// two hits on different segments resolve to the bendpoint between them,
/// two hits on one segment to their midpoint.
pub fn get_approx_intersection(
    waypoints: &[Point],
    reference: Point,
    threshold: f64,
) -> Option<ApproxIntersection> {
    bendpoint_intersection(waypoints, reference, threshold)
        .or_else(|| path_intersection(waypoints, reference, threshold))
}

fn bendpoint_intersection(
    waypoints: &[Point],
    reference: Point,
    threshold: f64,
) -> Option<ApproxIntersection> {
    waypoints
        .iter()
        .position(|waypoint| point_distance(*waypoint, reference) <= threshold)
        .map(|index| ApproxIntersection {
            point: waypoints[index],
            bendpoint: true,
            index,
        })
}

fn path_intersection(
    waypoints: &[Point],
    reference: Point,
    threshold: f64,
) -> Option<ApproxIntersection> {
    let hits: Vec<(usize, Point)> = (1..waypoints.len())
        .flat_map(|segment| {
            circle_segment_intersections(
                reference,
                threshold,
                waypoints[segment - 1],
                waypoints[segment],
            )
            .into_iter()
            .map(move |point| (segment, point))
        })
        .collect();

    let (first_segment, first) = *hits.first()?;
    let (last_segment, last) = *hits.last()?;

    if hits.len() == 1 {
        return Some(ApproxIntersection {
            point: round_point(first),
            bendpoint: false,
            index: first_segment,
        });
    }

    if first_segment != last_segment {
        let index = first_segment.max(last_segment) - 1;
        return Some(ApproxIntersection {
            point: waypoints[index],
            bendpoint: true,
            index,
        });
    }

    Some(ApproxIntersection {
        point: Point::new(
            (first.x + last.x).round() / 2.0,
            (first.y + last.y).round() / 2.0,
        ),
        bendpoint: false,
        index: first_segment,
    })
}
