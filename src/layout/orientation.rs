//! Relative placement of one shape or point to another

use std::fmt;

use super::types::Trbl;

/// Where a source lies relative to a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Intersect,
}

impl Orientation {
    pub const ALL: [Orientation; 9] = [
        Orientation::Top,
        Orientation::Bottom,
        Orientation::Left,
        Orientation::Right,
        Orientation::TopLeft,
        Orientation::TopRight,
        Orientation::BottomLeft,
        Orientation::BottomRight,
        Orientation::Intersect,
    ];

    /// The orientation seen from the reference's side
    pub fn invert(self) -> Orientation {
        match self {
            Orientation::Top => Orientation::Bottom,
            Orientation::Bottom => Orientation::Top,
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
            Orientation::TopLeft => Orientation::BottomRight,
            Orientation::BottomRight => Orientation::TopLeft,
            Orientation::TopRight => Orientation::BottomLeft,
            Orientation::BottomLeft => Orientation::TopRight,
            Orientation::Intersect => Orientation::Intersect,
        }
    }

    pub fn is_top(self) -> bool {
        matches!(
            self,
            Orientation::Top | Orientation::TopLeft | Orientation::TopRight
        )
    }

    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Orientation::Bottom | Orientation::BottomLeft | Orientation::BottomRight
        )
    }

    pub fn is_left(self) -> bool {
        matches!(
            self,
            Orientation::Left | Orientation::TopLeft | Orientation::BottomLeft
        )
    }

    pub fn is_right(self) -> bool {
        matches!(
            self,
            Orientation::Right | Orientation::TopRight | Orientation::BottomRight
        )
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Top => "top",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::TopLeft => "top-left",
            Orientation::TopRight => "top-right",
            Orientation::BottomLeft => "bottom-left",
            Orientation::BottomRight => "bottom-right",
            Orientation::Intersect => "intersect",
        };
        f.write_str(name)
    }
}

/// Padding applied when classifying orientation.
///
/// Positive padding demands a gap before a side is reported; negative
/// padding lets slightly overlapping operands still count as beside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Padding { x: value, y: value }
    }
}

impl From<(f64, f64)> for Padding {
    fn from((x, y): (f64, f64)) -> Self {
        Padding { x, y }
    }
}

/// Orientation of `source` with respect to `reference`.
///
/// A corner is reported when the source is clear of the reference both
/// vertically and horizontally, a side when only one holds, and
/// [`Orientation::Intersect`] otherwise.
pub fn get_orientation(source: Trbl, reference: Trbl, padding: impl Into<Padding>) -> Orientation {
    let padding = padding.into();

    let top = source.bottom + padding.y <= reference.top;
    let right = source.left - padding.x >= reference.right;
    let bottom = source.top - padding.y >= reference.bottom;
    let left = source.right + padding.x <= reference.left;

    let vertical = if top {
        Some(Orientation::Top)
    } else if bottom {
        Some(Orientation::Bottom)
    } else {
        None
    };

    let horizontal = if left {
        Some(Orientation::Left)
    } else if right {
        Some(Orientation::Right)
    } else {
        None
    };

    match (vertical, horizontal) {
        (Some(Orientation::Top), Some(Orientation::Left)) => Orientation::TopLeft,
        (Some(Orientation::Top), Some(_)) => Orientation::TopRight,
        (Some(_), Some(Orientation::Left)) => Orientation::BottomLeft,
        (Some(_), Some(_)) => Orientation::BottomRight,
        (Some(side), None) | (None, Some(side)) => side,
        (None, None) => Orientation::Intersect,
    }
}
