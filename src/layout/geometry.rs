//! Geometry primitives shared by routing, docking and dragging

use super::types::{Axis, Point, Rectangle};

/// Alignment of points that share a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Same y: the points form a horizontal line
    Horizontal,
    /// Same x: the points form a vertical line
    Vertical,
}

/// Euclidean distance between two points
pub fn point_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `r` lies on the line through `p` and `q`, within `accuracy`
/// canvas units of perpendicular distance.
///
/// Coincident `p` and `q` do not define a line, so the answer is `false`.
pub fn are_points_on_line(p: Point, q: Point, r: Point, accuracy: f64) -> bool {
    let cross = (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
    let distance = point_distance(p, q);

    // 0 / 0 is NaN, which compares false
    (cross / distance).abs() <= accuracy
}

/// Alignment of two points, horizontal winning when they coincide
pub fn points_alignment(a: Point, b: Point) -> Option<Alignment> {
    all_points_alignment(&[a, b])
}

/// Alignment shared by every point in `points`
pub fn all_points_alignment(points: &[Point]) -> Option<Alignment> {
    let first = points.first()?;

    if points.iter().all(|p| p.y == first.y) {
        return Some(Alignment::Horizontal);
    }

    if points.iter().all(|p| p.x == first.x) {
        return Some(Alignment::Vertical);
    }

    None
}

pub fn round_point(point: Point) -> Point {
    Point::new(point.x.round(), point.y.round())
}

/// Whether the coordinate of `point` on `axis` falls within the
/// rectangle's extent on that axis (inclusive)
pub fn is_in_axis_range(axis: Axis, point: Point, rectangle: &Rectangle) -> bool {
    let (start, end) = rectangle.extent(axis);
    let value = point.get(axis);
    value >= start && value <= end
}

/// A line `a * x + b * y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// Vertical line through `x`
    pub fn vertical(x: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: -x,
        }
    }

    /// Horizontal line through `y`
    pub fn horizontal(y: f64) -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            c: -y,
        }
    }
}

/// Intersections of a line with a circle.
///
/// Returns zero, one (tangent) or two points. For a vertical line the
/// first root is the upper one; for a horizontal line the first root is
/// the right one.
pub fn circle_line_intersections(center: Point, radius: f64, line: Line) -> Vec<Point> {
    let Line { a, b, .. } = line;
    // Move the line into circle-centered coordinates
    let c = line.c + a * center.x + b * center.y;
    let norm = a * a + b * b;

    let x0 = -a * c / norm;
    let y0 = -b * c / norm;

    if c * c > radius * radius * norm + f64::EPSILON {
        return Vec::new();
    }

    if (c * c - radius * radius * norm).abs() < f64::EPSILON {
        return vec![Point::new(x0 + center.x, y0 + center.y)];
    }

    let distance = radius * radius - c * c / norm;
    let mult = (distance / norm).sqrt();

    vec![
        Point::new(x0 + b * mult + center.x, y0 - a * mult + center.y),
        Point::new(x0 - b * mult + center.x, y0 + a * mult + center.y),
    ]
}

/// Intersections of a circle with the segment `from`..`to`, ordered along
/// the segment
pub fn circle_segment_intersections(
    center: Point,
    radius: f64,
    from: Point,
    to: Point,
) -> Vec<Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let a = dx * dx + dy * dy;

    if a == 0.0 {
        return Vec::new();
    }

    let fx = from.x - center.x;
    let fy = from.y - center.y;
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return Vec::new();
    }

    let root = discriminant.sqrt();
    let mut params = vec![(-b - root) / (2.0 * a)];
    if root > 0.0 {
        params.push((-b + root) / (2.0 * a));
    }

    params
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| Point::new(from.x + t * dx, from.y + t * dy))
        .collect()
}
