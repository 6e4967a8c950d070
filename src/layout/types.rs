//! Core value types for connection routing

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// A 2D point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Copy of this point with the coordinate on `axis` replaced
    pub fn with(self, axis: Axis, value: f64) -> Point {
        match axis {
            Axis::X => Point::new(value, self.y),
            Axis::Y => Point::new(self.x, value),
        }
    }

    /// Copy of this point moved by `delta` along `axis`
    pub fn offset(self, axis: Axis, delta: f64) -> Point {
        self.with(axis, self.get(axis) + delta)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Canvas axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis
    pub fn flip(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the rectangle, rounded to whole canvas units
    pub fn mid_point(&self) -> Point {
        Point::new(
            (self.x + self.width / 2.0).round(),
            (self.y + self.height / 2.0).round(),
        )
    }

    /// Start and end coordinate of the rectangle on `axis`
    pub fn extent(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.x, self.right()),
            Axis::Y => (self.y, self.bottom()),
        }
    }

    /// Whether `point` lies strictly inside the rectangle grown by `tolerance`
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        point.x > self.x - tolerance
            && point.y > self.y - tolerance
            && point.x < self.right() + tolerance
            && point.y < self.bottom() + tolerance
    }

    pub fn trbl(&self) -> Trbl {
        Trbl {
            top: self.y,
            right: self.right(),
            bottom: self.bottom(),
            left: self.x,
        }
    }
}

/// Top/right/bottom/left boundary of a shape or point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trbl {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Trbl {
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            self.left,
            self.top,
            self.right - self.left,
            self.bottom - self.top,
        )
    }
}

impl From<Point> for Trbl {
    fn from(point: Point) -> Self {
        Trbl {
            top: point.y,
            right: point.x,
            bottom: point.y,
            left: point.x,
        }
    }
}

impl From<Rectangle> for Trbl {
    fn from(rectangle: Rectangle) -> Self {
        rectangle.trbl()
    }
}

/// A side of a shape a connection can dock on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Side::Top => "t",
            Side::Right => "r",
            Side::Bottom => "b",
            Side::Left => "l",
        };
        f.write_str(symbol)
    }
}

/// Tag selecting the docking behavior of a shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ShapeKind(String);

impl ShapeKind {
    pub const RECTANGLE: &'static str = "rectangle";
    pub const CIRCLE: &'static str = "circle";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn rectangle() -> Self {
        Self::new(Self::RECTANGLE)
    }

    pub fn circle() -> Self {
        Self::new(Self::CIRCLE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::rectangle()
    }
}

impl From<&str> for ShapeKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shape on the canvas: its bounds, its kind, and kind-specific data
/// (corner radius and the like) that only the shape's docking code reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub bounds: Rectangle,
    pub kind: ShapeKind,
    pub data: BTreeMap<String, f64>,
}

impl Shape {
    pub fn new(bounds: Rectangle, kind: impl Into<ShapeKind>) -> Self {
        Self {
            bounds,
            kind: kind.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Rectangle::new(x, y, width, height), ShapeKind::rectangle())
    }

    pub fn circle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Rectangle::new(x, y, width, height), ShapeKind::circle())
    }

    /// Attach a kind-specific value
    pub fn with_data(mut self, key: impl Into<String>, value: f64) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn data(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }
}

/// A routed connection between two shapes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub waypoints: Vec<Point>,
    pub source: Shape,
    pub target: Shape,
}

impl Connection {
    pub fn new(waypoints: Vec<Point>, source: Shape, target: Shape) -> Self {
        Self {
            waypoints,
            source,
            target,
        }
    }
}
