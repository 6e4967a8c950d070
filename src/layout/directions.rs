//! Layout direction tokens and their selection

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::orientation::Orientation;
use crate::error::RoutingError;

/// How a connection leaves or enters a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `h`: horizontally, side picked from the orientation
    Horizontal,
    /// `v`: vertically, side picked from the orientation
    Vertical,
    /// `t`
    Top,
    /// `r`
    Right,
    /// `b`
    Bottom,
    /// `l`
    Left,
}

impl Direction {
    pub fn symbol(self) -> char {
        match self {
            Direction::Horizontal => 'h',
            Direction::Vertical => 'v',
            Direction::Top => 't',
            Direction::Right => 'r',
            Direction::Bottom => 'b',
            Direction::Left => 'l',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Direction> {
        match symbol {
            "h" => Some(Direction::Horizontal),
            "v" => Some(Direction::Vertical),
            "t" => Some(Direction::Top),
            "r" => Some(Direction::Right),
            "b" => Some(Direction::Bottom),
            "l" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Whether this direction names a concrete side
    pub fn is_explicit(self) -> bool {
        !matches!(self, Direction::Horizontal | Direction::Vertical)
    }

    /// Whether leaving in this direction moves along the x axis
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Direction::Horizontal | Direction::Left | Direction::Right
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A `start:end` direction pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directions {
    pub start: Direction,
    pub end: Direction,
}

impl Directions {
    pub const HORIZONTAL_HORIZONTAL: Directions = Directions::new(Direction::Horizontal, Direction::Horizontal);
    pub const VERTICAL_VERTICAL: Directions = Directions::new(Direction::Vertical, Direction::Vertical);
    pub const HORIZONTAL_VERTICAL: Directions = Directions::new(Direction::Horizontal, Direction::Vertical);
    pub const VERTICAL_HORIZONTAL: Directions = Directions::new(Direction::Vertical, Direction::Horizontal);
    /// Chosen for overlapping shapes
    pub const INTERSECT: Directions = Directions::new(Direction::Top, Direction::Top);

    pub const fn new(start: Direction, end: Direction) -> Self {
        Self { start, end }
    }

    /// The same pair read from the other end: `t:r` becomes `r:t`
    pub fn invert(self) -> Directions {
        Directions::new(self.end, self.start)
    }

    /// Whether either end names a concrete side
    pub fn is_explicit(self) -> bool {
        self.start.is_explicit() || self.end.is_explicit()
    }

    /// Whether both ends are one of `h` or `v`
    pub fn is_simple(self) -> bool {
        !self.start.is_explicit() && !self.end.is_explicit()
    }
}

impl FromStr for Directions {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| RoutingError::invalid_directions(s))?;

        match (Direction::from_symbol(start), Direction::from_symbol(end)) {
            (Some(start), Some(end)) => Ok(Directions::new(start, end)),
            _ => Err(RoutingError::invalid_directions(s)),
        }
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A layout hint: a direction pair or `straight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PreferredLayout {
    Straight,
    Directions(Directions),
}

impl PreferredLayout {
    pub fn directions(self) -> Option<Directions> {
        match self {
            PreferredLayout::Directions(directions) => Some(directions),
            PreferredLayout::Straight => None,
        }
    }
}

impl From<Directions> for PreferredLayout {
    fn from(directions: Directions) -> Self {
        PreferredLayout::Directions(directions)
    }
}

impl FromStr for PreferredLayout {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "straight" {
            return Ok(PreferredLayout::Straight);
        }
        s.parse().map(PreferredLayout::Directions)
    }
}

impl TryFrom<String> for PreferredLayout {
    type Error = RoutingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PreferredLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredLayout::Straight => f.write_str("straight"),
            PreferredLayout::Directions(directions) => directions.fmt(f),
        }
    }
}

/// Pick the directions for a connection given the orientation of its
/// source relative to its target.
///
/// An explicit preference (any concrete side) is always honored. For
/// overlapping shapes the route goes over the top; for side orientations
/// the axis follows the side; corners fall back to the preference.
pub fn get_directions(orientation: Orientation, preferred: Directions) -> Directions {
    if preferred.is_explicit() {
        return preferred;
    }

    match orientation {
        Orientation::Intersect => Directions::INTERSECT,
        Orientation::Top | Orientation::Bottom => Directions::VERTICAL_VERTICAL,
        Orientation::Left | Orientation::Right => Directions::HORIZONTAL_HORIZONTAL,
        _ => preferred,
    }
}
