//! Bendpoint generation between two points
//!
//! Simple `h`/`v` pairs produce at most two bendpoints. As soon as one end
//! names a concrete side (`t`, `r`, `b`, `l`) the route is built from three
//! parts: a start segment walking out of the first point, an end segment
//! walking out of the second point, and a mid segment joining them.
//!
//! ```text
//!  h:h                 h:v                 h:r
//!  [a]----[x]          [a]----[x]          [a]----[x]
//!          |                   |                   |
//!         [x]----[b]          [b]             [b]-[x]
//! ```

use super::config::RoutingConfig;
use super::directions::{Direction, Directions};
use super::orientation::{get_orientation, Orientation};
use super::types::Point;

/// Intermediate points of a Manhattan route from `a` to `b`.
///
/// The endpoints themselves are not included. The result may contain
/// duplicate or collinear points; pass it through the waypoint reducer
/// before handing it out.
pub fn get_bendpoints(
    a: Point,
    b: Point,
    directions: Directions,
    config: &RoutingConfig,
) -> Vec<Point> {
    if directions.is_simple() {
        return simple_bendpoints(a, b, directions);
    }

    let start = start_segment(a, b, directions, config);
    let end = end_segment(a, b, directions, config);
    let mid = mid_segment(&start, &end);

    let mut points = start.waypoints;
    points.extend(mid);
    points.extend(end.waypoints);
    points
}

/// Halfway coordinates, rounded
fn mid_coordinates(a: Point, b: Point) -> (f64, f64) {
    (
        ((b.x - a.x) / 2.0 + a.x).round(),
        ((b.y - a.y) / 2.0 + a.y).round(),
    )
}

/// Bendpoints for `h`/`v` pairs; explicit sides are treated as their axis
fn simple_bendpoints(a: Point, b: Point, directions: Directions) -> Vec<Point> {
    let (x_mid, y_mid) = mid_coordinates(a, b);

    match (directions.start.is_horizontal(), directions.end.is_horizontal()) {
        // one point, right or left of a
        (true, false) => vec![Point::new(b.x, a.y)],
        // one point, above or below a
        (false, true) => vec![Point::new(a.x, b.y)],
        // vertical segment between a and b
        (true, true) => vec![Point::new(x_mid, a.y), Point::new(x_mid, b.y)],
        // horizontal segment between a and b
        (false, false) => vec![Point::new(a.x, y_mid), Point::new(b.x, y_mid)],
    }
}

#[derive(Debug, Clone)]
struct Segment {
    waypoints: Vec<Point>,
    directions: Directions,
    /// The segment had to turn on its own coordinate, so the mid segment
    /// continues on the other axis
    turn_next: bool,
}

impl Segment {
    fn first(&self) -> Point {
        self.waypoints[0]
    }

    fn last(&self) -> Point {
        self.waypoints[self.waypoints.len() - 1]
    }
}

/// Whether the target orientation lets us leave in `direction` without
/// a detour
fn can_layout_straight(direction: Direction, orientation: Orientation) -> bool {
    match direction {
        Direction::Top => orientation.is_top(),
        Direction::Right => orientation.is_right(),
        Direction::Bottom => orientation.is_bottom(),
        Direction::Left => orientation.is_left(),
        Direction::Horizontal => orientation.is_left() || orientation.is_right(),
        Direction::Vertical => orientation.is_top() || orientation.is_bottom(),
    }
}

/// Whether leaving in `direction` walks away from the target first
fn needs_turn(direction: Direction, orientation: Orientation) -> bool {
    match direction {
        Direction::Top => !orientation.is_top(),
        Direction::Right => !orientation.is_right(),
        Direction::Bottom => !orientation.is_bottom(),
        Direction::Left => !orientation.is_left(),
        Direction::Horizontal | Direction::Vertical => false,
    }
}

fn segment_bendpoints(
    source: Point,
    target: Point,
    directions: Directions,
    config: &RoutingConfig,
) -> Segment {
    let orientation = get_orientation(
        target.into(),
        source.into(),
        config.point_orientation_padding,
    );
    let start = directions.start;
    let horizontal = start.is_horizontal();
    let (x_mid, y_mid) = mid_coordinates(source, target);
    let stub = config.min_segment_length;

    let mut turn_next = false;

    let (segment_end, segment_directions) = if can_layout_straight(start, orientation) {
        if horizontal {
            (Point::new(x_mid, source.y), Directions::HORIZONTAL_HORIZONTAL)
        } else {
            (Point::new(source.x, y_mid), Directions::VERTICAL_VERTICAL)
        }
    } else {
        let segment_directions = if horizontal {
            Directions::HORIZONTAL_VERTICAL
        } else {
            Directions::VERTICAL_HORIZONTAL
        };

        let segment_end = if !needs_turn(start, orientation) {
            Point::new(x_mid, y_mid)
        } else if horizontal {
            turn_next = y_mid == source.y;
            let sign = if start == Direction::Left { -1.0 } else { 1.0 };
            Point::new(
                source.x + stub * sign,
                if turn_next { y_mid + stub } else { y_mid },
            )
        } else {
            turn_next = x_mid == source.x;
            let sign = if start == Direction::Top { -1.0 } else { 1.0 };
            Point::new(
                if turn_next { x_mid + stub } else { x_mid },
                source.y + stub * sign,
            )
        };

        (segment_end, segment_directions)
    };

    let mut waypoints = simple_bendpoints(source, segment_end, segment_directions);
    waypoints.push(segment_end);

    Segment {
        waypoints,
        directions: segment_directions,
        turn_next,
    }
}

fn start_segment(a: Point, b: Point, directions: Directions, config: &RoutingConfig) -> Segment {
    segment_bendpoints(a, b, directions, config)
}

fn end_segment(a: Point, b: Point, directions: Directions, config: &RoutingConfig) -> Segment {
    let mut segment = segment_bendpoints(b, a, directions.invert(), config);
    segment.waypoints.reverse();
    segment.directions = segment.directions.invert();
    segment
}

fn mid_segment(start: &Segment, end: &Segment) -> Vec<Point> {
    let flip = |direction: Direction| {
        if direction == Direction::Horizontal {
            Direction::Vertical
        } else {
            Direction::Horizontal
        }
    };

    let mut start_direction = start.directions.end;
    let mut end_direction = end.directions.start;

    if start.turn_next {
        start_direction = flip(start_direction);
    }

    if end.turn_next {
        end_direction = flip(end_direction);
    }

    simple_bendpoints(
        start.last(),
        end.first(),
        Directions::new(start_direction, end_direction),
    )
}
