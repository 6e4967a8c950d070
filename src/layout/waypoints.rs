//! Waypoint reduction
//!
//! Both reducers drop points that sit on the line between their
//! neighbours and snap the neighbours onto a shared coordinate when they
//! are within `accuracy` of one, so the remaining segments stay exactly
//! orthogonal. The first and last waypoint are never removed.

use super::geometry::{are_points_on_line, point_distance};
use super::types::{Axis, Point};

/// Snap two neighbours of a removed point onto a shared coordinate
fn snap_neighbours(points: &mut [Point], previous: usize, next: usize, accuracy: f64) {
    if (points[previous].x - points[next].x).abs() <= accuracy {
        points[next].x = points[next].x.round();
        points[previous].x = points[next].x;
    } else if (points[previous].y - points[next].y).abs() <= accuracy {
        points[next].y = points[next].y.round();
        points[previous].y = points[next].y;
    }
}

fn coordinate(point: Point, axis: Axis) -> f64 {
    match axis {
        Axis::X => point.x,
        Axis::Y => point.y,
    }
}

fn set_coordinate(point: &mut Point, axis: Axis, value: f64) {
    match axis {
        Axis::X => point.x = value,
        Axis::Y => point.y = value,
    }
}

/// Whether the waypoint at `index` may shift along `axis` without bending
/// its segment towards `outer`
fn can_shift(points: &[Point], index: usize, outer: usize, axis: Axis) -> bool {
    index != 0
        && index != points.len() - 1
        && coordinate(points[index], axis) != coordinate(points[outer], axis)
}

/// Snap the neighbours of the point at `index` onto a shared coordinate,
/// leaving the first and last waypoint where they are.
///
/// Returns false when no neighbour can move, in which case the point has
/// to stay.
fn snap_inner_neighbours(points: &mut [Point], index: usize, accuracy: f64) -> bool {
    let (previous, next) = (index - 1, index + 1);
    let (a, b) = (points[previous], points[next]);

    if a.x == b.x || a.y == b.y {
        return true;
    }

    let axis = if (a.x - b.x).abs() <= accuracy {
        Axis::X
    } else if (a.y - b.y).abs() <= accuracy {
        Axis::Y
    } else {
        return false;
    };

    let shift_previous = previous > 0 && can_shift(points, previous, previous - 1, axis);
    let shift_next = next + 1 < points.len() && can_shift(points, next, next + 1, axis);

    let value = match (shift_previous, shift_next) {
        (true, true) => coordinate(b, axis).round(),
        (true, false) => coordinate(b, axis),
        (false, true) => coordinate(a, axis),
        (false, false) => return false,
    };

    if shift_previous {
        set_coordinate(&mut points[previous], axis, value);
    }
    if shift_next {
        set_coordinate(&mut points[next], axis, value);
    }
    true
}

/// Remove duplicate and collinear waypoints.
///
/// Works progressively: after a removal the same index is examined again
/// against its new neighbours, so runs of collinear points collapse
/// entirely. Snapping only ever moves inner waypoints; a point whose
/// removal would need the first or last waypoint to move is kept.
pub fn reduce_waypoints(waypoints: &[Point], accuracy: f64) -> Vec<Point> {
    let mut points = waypoints.to_vec();
    let mut index = 1;

    while index + 1 < points.len() {
        let previous = points[index - 1];
        let point = points[index];
        let next = points[index + 1];

        let redundant = point_distance(point, next) == 0.0
            || are_points_on_line(previous, next, point, accuracy);

        if redundant && snap_inner_neighbours(&mut points, index, accuracy) {
            points.remove(index);
        } else {
            index += 1;
        }
    }

    points
}

/// Result of reducing waypoints at the end of a segment drag
#[derive(Debug, Clone, PartialEq)]
pub struct DropReduction {
    pub waypoints: Vec<Point>,
    /// Shift of the dragged segment's start index caused by removals
    /// before it (zero or negative)
    pub segment_offset: isize,
}

/// Remove collinear waypoints once a drag ends.
///
/// Unlike [`reduce_waypoints`] every point is tested against its original
/// neighbours in one pass. Each removal at or before
/// `segment_start_index` shifts the dragged segment one place left.
pub fn reduce_dropped_waypoints(
    waypoints: &[Point],
    segment_start_index: usize,
    accuracy: f64,
) -> DropReduction {
    let mut points = waypoints.to_vec();
    let mut keep = vec![true; points.len()];
    let mut segment_offset = 0;

    for index in 1..points.len().saturating_sub(1) {
        if !are_points_on_line(points[index - 1], points[index + 1], points[index], accuracy) {
            continue;
        }

        if index <= segment_start_index {
            segment_offset -= 1;
        }

        snap_neighbours(&mut points, index - 1, index + 1, accuracy);
        keep[index] = false;
    }

    let waypoints = points
        .into_iter()
        .zip(keep)
        .filter_map(|(point, keep)| keep.then_some(point))
        .collect();

    DropReduction {
        waypoints,
        segment_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_removes_duplicates() {
        let points = vec![p(0.0, 0.0), p(0.0, -20.0), p(50.0, -20.0), p(50.0, -20.0), p(50.0, 120.0)];
        assert_eq!(
            reduce_waypoints(&points, 2.0),
            vec![p(0.0, 0.0), p(0.0, -20.0), p(50.0, -20.0), p(50.0, 120.0)]
        );
    }

    #[test]
    fn test_collapses_collinear_runs() {
        let points = vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 25.0), p(300.0, 25.0)];
        assert_eq!(reduce_waypoints(&points, 2.0), vec![p(100.0, 25.0), p(300.0, 25.0)]);
    }

    #[test]
    fn test_snaps_inner_jog() {
        // the 1 unit jog at x = 99 folds into the run along y = 51
        let points = vec![
            p(0.0, 0.0),
            p(0.0, 50.0),
            p(99.0, 50.0),
            p(99.0, 51.0),
            p(200.0, 51.0),
            p(200.0, 100.0),
        ];
        assert_eq!(
            reduce_waypoints(&points, 2.0),
            vec![p(0.0, 0.0), p(0.0, 51.0), p(200.0, 51.0), p(200.0, 100.0)]
        );
    }

    #[test]
    fn test_snapping_moves_inner_point_not_start() {
        let points = vec![p(200.0, 230.0), p(198.0, 230.0), p(198.0, 130.0), p(195.0, 130.0)];
        assert_eq!(
            reduce_waypoints(&points, 2.0),
            vec![p(200.0, 230.0), p(200.0, 130.0), p(195.0, 130.0)]
        );
    }

    #[test]
    fn test_snapping_moves_inner_point_not_end() {
        let points = vec![p(0.0, 0.0), p(0.0, 50.0), p(99.0, 50.0), p(99.0, 51.5)];
        assert_eq!(
            reduce_waypoints(&points, 2.0),
            vec![p(0.0, 0.0), p(0.0, 51.5), p(99.0, 51.5)]
        );
    }

    #[test]
    fn test_keeps_jog_between_fixed_ends() {
        let points = vec![p(200.0, 230.0), p(198.0, 230.0), p(198.0, 130.0)];
        assert_eq!(reduce_waypoints(&points, 2.0), points);

        let points = vec![p(0.0, 0.0), p(50.0, 1.0), p(100.0, 1.4)];
        assert_eq!(reduce_waypoints(&points, 2.0), points);
    }

    #[test]
    fn test_keeps_bends() {
        let points = vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 125.0), p(300.0, 125.0)];
        assert_eq!(reduce_waypoints(&points, 2.0), points);
    }

    #[test]
    fn test_keeps_endpoints() {
        let points = vec![p(0.0, 0.0), p(0.0, 0.0)];
        assert_eq!(reduce_waypoints(&points, 2.0), points);
        assert_eq!(reduce_waypoints(&[p(1.0, 1.0)], 2.0), vec![p(1.0, 1.0)]);
        assert!(reduce_waypoints(&[], 2.0).is_empty());
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let routes = [
            vec![p(0.0, 0.0), p(0.0, -20.0), p(50.0, -20.0), p(50.0, -20.0), p(50.0, 120.0), p(50.0, 120.0), p(100.0, 120.0), p(100.0, 100.0)],
            vec![p(0.0, 0.0), p(-20.0, 0.0), p(-20.0, 20.0), p(15.0, 20.0), p(15.0, 0.0), p(50.0, 0.0), p(75.0, 0.0), p(75.0, 0.0), p(100.0, 0.0)],
            vec![p(0.0, 0.0), p(49.0, 1.0), p(51.0, 0.0), p(51.0, 80.0), p(52.0, 160.0), p(200.0, 161.0)],
        ];

        for route in routes {
            let once = reduce_waypoints(&route, 2.0);
            assert_eq!(reduce_waypoints(&once, 2.0), once);
        }
    }

    #[test]
    fn test_drop_reduction_offsets_segment() {
        // vertical segment 1..2 dragged onto x = 200, next to the bend at index 3
        let points = vec![
            p(100.0, 25.0),
            p(200.0, 25.0),
            p(200.0, 100.0),
            p(200.0, 100.0),
            p(200.0, 225.0),
            p(400.0, 225.0),
        ];
        let reduced = reduce_dropped_waypoints(&points, 1, 5.0);

        assert_eq!(
            reduced.waypoints,
            vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 225.0), p(400.0, 225.0)]
        );
        assert_eq!(reduced.segment_offset, 0);
    }

    #[test]
    fn test_drop_reduction_counts_removals_before_segment() {
        let points = vec![p(0.0, 0.0), p(50.0, 3.0), p(100.0, 0.0), p(100.0, 80.0), p(200.0, 80.0)];
        let reduced = reduce_dropped_waypoints(&points, 2, 5.0);

        assert_eq!(
            reduced.waypoints,
            vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 80.0), p(200.0, 80.0)]
        );
        assert_eq!(reduced.segment_offset, -1);
    }
}
