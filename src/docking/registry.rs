//! Registry mapping shape kinds to their docking behavior

use std::collections::HashMap;

use super::shapes::{CircleSupport, RectangleSupport, ShapeSupport};
use super::{resolve_side, Docking};
use crate::error::RoutingError;
use crate::layout::directions::Direction;
use crate::layout::orientation::Orientation;
use crate::layout::types::{Point, Shape, ShapeKind, Side, Trbl};

/// Registry of shape supports, keyed by shape kind.
///
/// Populate it before routing starts; the router only ever reads it.
#[derive(Debug)]
pub struct ShapeRegistry {
    supports: HashMap<ShapeKind, Box<dyn ShapeSupport>>,
}

impl Default for ShapeRegistry {
    /// A registry knowing rectangles and circles
    fn default() -> Self {
        Self::empty()
            .with(ShapeKind::rectangle(), RectangleSupport)
            .with(ShapeKind::circle(), CircleSupport)
    }
}

impl ShapeRegistry {
    /// Create a registry with the built-in shape kinds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry without any shape kinds
    pub fn empty() -> Self {
        Self {
            supports: HashMap::new(),
        }
    }

    /// Register docking behavior for a kind, replacing any previous one
    pub fn register(&mut self, kind: impl Into<ShapeKind>, support: impl ShapeSupport + 'static) {
        self.supports.insert(kind.into(), Box::new(support));
    }

    /// Builder form of [`ShapeRegistry::register`]
    pub fn with(mut self, kind: impl Into<ShapeKind>, support: impl ShapeSupport + 'static) -> Self {
        self.register(kind, support);
        self
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: &ShapeKind) -> bool {
        self.supports.contains_key(kind)
    }

    /// Look up the support for a kind
    pub fn get(&self, kind: &ShapeKind) -> Result<&dyn ShapeSupport, RoutingError> {
        self.supports
            .get(kind)
            .map(|support| support.as_ref())
            .ok_or_else(|| RoutingError::unknown_shape_kind(kind.as_str()))
    }

    /// Dock `point` onto a concrete side of `shape`
    pub fn dock(&self, point: Point, shape: &Shape, side: Side) -> Result<Docking, RoutingError> {
        Ok(self.get(&shape.kind)?.dock(point, shape, side))
    }

    /// Dock `point` onto `shape` leaving in `direction`, where
    /// `orientation` is the other end of the connection relative to the
    /// shape
    pub fn dock_towards(
        &self,
        point: Point,
        shape: &Shape,
        direction: Direction,
        orientation: Orientation,
    ) -> Result<Docking, RoutingError> {
        self.dock(point, shape, resolve_side(direction, orientation))
    }

    pub fn trbl(&self, shape: &Shape) -> Result<Trbl, RoutingError> {
        Ok(self.get(&shape.kind)?.trbl(shape))
    }

    /// Whether `point` lies inside `shape` grown by `tolerance`
    pub fn contains_point(&self, point: Point, shape: &Shape, tolerance: f64) -> Result<bool, RoutingError> {
        Ok(self.get(&shape.kind)?.contains(point, shape, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Docks onto bounds shrunk by the shape's `inset` value
    #[derive(Debug)]
    struct InsetSupport;

    impl ShapeSupport for InsetSupport {
        fn dock(&self, point: Point, shape: &Shape, side: Side) -> Docking {
            let inset = shape.data("inset").unwrap_or(0.0);
            let bounds = shape.bounds;
            let point = match side {
                Side::Top => Point::new(point.x, bounds.y + inset),
                Side::Bottom => Point::new(point.x, bounds.bottom() - inset),
                Side::Left => Point::new(bounds.x + inset, point.y),
                Side::Right => Point::new(bounds.right() - inset, point.y),
            };
            Docking::new(point, side)
        }
    }

    #[test]
    fn test_default_kinds() {
        let registry = ShapeRegistry::default();
        assert!(registry.contains(&ShapeKind::rectangle()));
        assert!(registry.contains(&ShapeKind::circle()));
        assert!(!ShapeRegistry::empty().contains(&ShapeKind::rectangle()));
    }

    #[test]
    fn test_unknown_kind_fails() {
        let registry = ShapeRegistry::default();
        let shape = Shape::new(shape_bounds(), "hexagon");

        let err = registry.dock(Point::new(0.0, 0.0), &shape, Side::Top).unwrap_err();
        assert_eq!(err, RoutingError::unknown_shape_kind("hexagon"));
        assert!(registry.trbl(&shape).is_err());
        assert!(registry.contains_point(Point::new(0.0, 0.0), &shape, 0.0).is_err());
    }

    #[test]
    fn test_custom_kind_reads_shape_data() {
        let registry = ShapeRegistry::default().with("inset", InsetSupport);
        let shape = Shape::new(shape_bounds(), "inset").with_data("inset", 5.0);

        let docking = registry
            .dock(Point::new(50.0, 25.0), &shape, Side::Left)
            .unwrap();
        assert_eq!(docking.point, Point::new(5.0, 25.0));

        // containment and extent fall back to the bounds
        assert!(registry.contains_point(Point::new(1.0, 1.0), &shape, 0.0).unwrap());
        assert_eq!(registry.trbl(&shape).unwrap(), shape.bounds.trbl());
    }

    #[test]
    fn test_dock_towards_resolves_side() {
        let registry = ShapeRegistry::default();
        let shape = Shape::rectangle(0.0, 0.0, 100.0, 50.0);

        let docking = registry
            .dock_towards(shape.bounds.mid_point(), &shape, Direction::Horizontal, Orientation::Right)
            .unwrap();
        assert_eq!(docking.point, Point::new(100.0, 25.0));
        assert_eq!(docking.side, Side::Right);

        let docking = registry
            .dock_towards(shape.bounds.mid_point(), &shape, Direction::Vertical, Orientation::TopLeft)
            .unwrap();
        assert_eq!(docking.point, Point::new(50.0, 0.0));
    }

    fn shape_bounds() -> crate::layout::types::Rectangle {
        crate::layout::types::Rectangle::new(0.0, 0.0, 100.0, 50.0)
    }
}
