//! Docking behavior of the built-in shape kinds

use std::fmt::Debug;

use super::Docking;
use crate::layout::geometry::{circle_line_intersections, round_point, Line};
use crate::layout::types::{Point, Shape, Side, Trbl};

/// What the router needs to know about one kind of shape
pub trait ShapeSupport: Debug + Send + Sync {
    /// Attachment of a connection approaching `point` from `side`
    fn dock(&self, point: Point, shape: &Shape, side: Side) -> Docking;

    /// Whether `point` lies inside the shape grown by `tolerance`
    fn contains(&self, point: Point, shape: &Shape, tolerance: f64) -> bool {
        shape.bounds.contains(point, tolerance)
    }

    /// Extent used for orientation checks
    fn trbl(&self, shape: &Shape) -> Trbl {
        shape.bounds.trbl()
    }
}

/// Upper bound of the x ratio for redirecting a right docking
const RIGHT_REDIRECT_MAX_RATIO: f64 = 0.9;
/// Lower bound of the x ratio for redirecting a left docking
const LEFT_REDIRECT_MIN_RATIO: f64 = 0.1;
const LOWER_THIRD: f64 = 2.0 / 3.0;
const UPPER_THIRD: f64 = 1.0 / 3.0;

/// Axis-aligned rectangles.
///
/// A side docking approached from well inside the upper or lower third
/// is offered an alternative on the top or bottom edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleSupport;

impl RectangleSupport {
    fn redirect(point: Point, shape: &Shape, docking_point: Point, ratio_y: f64) -> Option<Docking> {
        let bounds = &shape.bounds;

        if ratio_y >= LOWER_THIRD {
            Some(Docking::redirected(
                docking_point,
                Point::new(point.x, bounds.bottom()),
                Side::Bottom,
            ))
        } else if ratio_y <= UPPER_THIRD {
            Some(Docking::redirected(
                docking_point,
                Point::new(point.x, bounds.y),
                Side::Top,
            ))
        } else {
            None
        }
    }
}

impl ShapeSupport for RectangleSupport {
    fn dock(&self, point: Point, shape: &Shape, side: Side) -> Docking {
        let point = round_point(point);
        let bounds = &shape.bounds;

        let ratio_x = (point.x - bounds.x).abs() / bounds.width;
        let ratio_y = (point.y - bounds.y).abs() / bounds.height;

        match side {
            Side::Top => Docking::new(Point::new(point.x, bounds.y), Side::Top),
            Side::Bottom => Docking::new(Point::new(point.x, bounds.bottom()), Side::Bottom),
            Side::Right => {
                let docking_point = Point::new(bounds.right(), point.y);
                (ratio_x <= RIGHT_REDIRECT_MAX_RATIO)
                    .then(|| Self::redirect(point, shape, docking_point, ratio_y))
                    .flatten()
                    .unwrap_or_else(|| Docking::new(docking_point, Side::Right))
            }
            Side::Left => {
                let docking_point = Point::new(bounds.x, point.y);
                (ratio_x >= LEFT_REDIRECT_MIN_RATIO)
                    .then(|| Self::redirect(point, shape, docking_point, ratio_y))
                    .flatten()
                    .unwrap_or_else(|| Docking::new(docking_point, Side::Left))
            }
        }
    }
}

/// Circles inscribed in their bounds; the radius is half the width
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleSupport;

impl ShapeSupport for CircleSupport {
    fn dock(&self, point: Point, shape: &Shape, side: Side) -> Docking {
        let point = round_point(point);
        let bounds = &shape.bounds;
        let center = Point::new(
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height / 2.0,
        );
        let radius = bounds.width / 2.0;

        let (line, edge) = match side {
            Side::Top | Side::Bottom => {
                let x = point.x.clamp(bounds.x, bounds.right());
                let edge_y = if side == Side::Top { bounds.y } else { bounds.bottom() };
                (Line::vertical(x), Point::new(x, edge_y))
            }
            Side::Left | Side::Right => {
                let y = point.y.clamp(bounds.y, bounds.bottom());
                let edge_x = if side == Side::Left { bounds.x } else { bounds.right() };
                (Line::horizontal(y), Point::new(edge_x, y))
            }
        };

        let roots = circle_line_intersections(center, radius, line);

        // the first root is the upper one for vertical lines, the right
        // one for horizontal lines
        let docking_point = match side {
            Side::Top | Side::Right => roots.first(),
            Side::Bottom | Side::Left => roots.get(1).or(roots.first()),
        };

        // only reachable when the bounds are not square
        Docking::new(docking_point.copied().unwrap_or(edge), side)
    }
}
