//! Manhattan connector: routing, point routing and repair
//!
//! All entry points live on [`Router`], which bundles the shape registry
//! with the routing tolerances. A router is built once and only read
//! afterwards.

use serde::{Deserialize, Deserializer};

use super::bendpoints::get_bendpoints;
use super::config::RoutingConfig;
use super::directions::{get_directions, Directions, PreferredLayout};
use super::geometry::{all_points_alignment, is_in_axis_range, point_distance, points_alignment, Alignment};
use super::orientation::{get_orientation, Orientation};
use super::types::{Axis, Point, Rectangle, Shape, Side, Trbl};
use super::waypoints::reduce_waypoints;
use crate::docking::ShapeRegistry;
use crate::error::RoutingError;

/// Which end keeps its docking when laying out a straight connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreserveDocking {
    Source,
    Target,
}

/// Marks a connection end as moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndpointChange {
    /// The end moved; its new docking point is passed separately
    Moved,
    /// The end moved to this docking point
    MovedTo(Point),
}

impl EndpointChange {
    pub fn point(self) -> Option<Point> {
        match self {
            EndpointChange::Moved => None,
            EndpointChange::MovedTo(point) => Some(point),
        }
    }
}

/// Accepts `true`/`false` or a point table
fn deserialize_endpoint_change<'de, D>(deserializer: D) -> Result<Option<EndpointChange>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Point(Point),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Flag(true) => Some(EndpointChange::Moved),
        Raw::Flag(false) => None,
        Raw::Point(point) => Some(EndpointChange::MovedTo(point)),
    })
}

/// Layout hints supplied with a routing request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hints {
    pub preserve_docking: Option<PreserveDocking>,
    /// Layouts in order of preference
    pub preferred_layouts: Vec<PreferredLayout>,
    #[serde(deserialize_with = "deserialize_endpoint_change")]
    pub connection_start: Option<EndpointChange>,
    #[serde(deserialize_with = "deserialize_endpoint_change")]
    pub connection_end: Option<EndpointChange>,
}

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a preferred layout
    pub fn prefer(mut self, layout: impl Into<PreferredLayout>) -> Self {
        self.preferred_layouts.push(layout.into());
        self
    }

    pub fn with_preserve_docking(mut self, preserve: PreserveDocking) -> Self {
        self.preserve_docking = Some(preserve);
        self
    }

    pub fn with_connection_start(mut self, change: EndpointChange) -> Self {
        self.connection_start = Some(change);
        self
    }

    pub fn with_connection_end(mut self, change: EndpointChange) -> Self {
        self.connection_end = Some(change);
        self
    }

    /// First preferred layout other than `straight`, `h:h` if none
    pub fn preferred_directions(&self) -> Directions {
        self.preferred_layouts
            .iter()
            .find_map(|layout| layout.directions())
            .unwrap_or(Directions::HORIZONTAL_HORIZONTAL)
    }

    pub fn is_straight_preferred(&self) -> bool {
        self.preferred_layouts.contains(&PreferredLayout::Straight)
    }
}

/// Outcome of repairing one end of a connection in place
#[derive(Debug, Clone, PartialEq)]
pub enum EndRepair {
    Repaired(Vec<Point>),
    /// The prior route cannot be adjusted locally
    NeedsRelayout,
    /// The repaired route would be a straight line
    Collinear,
}

/// Computes and repairs orthogonal connections
#[derive(Debug, Default)]
pub struct Router {
    registry: ShapeRegistry,
    config: RoutingConfig,
}

impl Router {
    pub fn new(registry: ShapeRegistry, config: RoutingConfig) -> Self {
        Self { registry, config }
    }

    /// Replace the routing tolerances
    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route between two raw points: the points plus their bendpoints,
    /// reduced
    pub fn connect_points(&self, a: Point, b: Point, directions: Directions) -> Vec<Point> {
        let mut points = Vec::with_capacity(4);
        points.push(a);
        points.extend(get_bendpoints(a, b, directions, &self.config));
        points.push(b);

        reduce_waypoints(&points, self.config.reduce_accuracy)
    }

    /// Connect two shapes.
    ///
    /// `start` and `end` are the points to dock from and default to the
    /// shape centers.
    pub fn connect_shapes(
        &self,
        source: &Shape,
        target: &Shape,
        start: Option<Point>,
        end: Option<Point>,
        hints: &Hints,
    ) -> Result<Vec<Point>, RoutingError> {
        let preferred = hints.preferred_directions();
        let orientation = get_orientation(
            self.registry.trbl(source)?,
            self.registry.trbl(target)?,
            0.0,
        );
        let directions = get_directions(orientation, preferred);

        tracing::debug!(%orientation, %directions, "connecting shapes");

        let start = start.unwrap_or_else(|| source.bounds.mid_point());
        let end = end.unwrap_or_else(|| target.bounds.mid_point());

        let start_docking =
            self.registry
                .dock_towards(start, source, directions.start, orientation.invert())?;
        let end_docking = self
            .registry
            .dock_towards(end, target, directions.end, orientation)?;

        if let Some(changed) = end_docking.changed_point {
            let source_y = source.bounds.mid_point().y;
            let threshold = self.config.changed_docking_threshold;

            let prefer_changed = match end_docking.side {
                Side::Bottom => source_y > target.bounds.bottom() + threshold,
                Side::Top => source_y < target.bounds.y - threshold,
                Side::Left | Side::Right => false,
            };

            if prefer_changed {
                tracing::debug!(side = %end_docking.side, "docking onto redirected target side");
                return Ok(self.connect_points(
                    start_docking.point,
                    changed,
                    Directions::HORIZONTAL_VERTICAL,
                ));
            }
        }

        Ok(self.connect_points(start_docking.point, end_docking.point, directions))
    }

    /// Connect a shape to a free point, such as the cursor while a new
    /// connection is being drawn
    pub fn connect_shape_to_point(
        &self,
        source: &Shape,
        target: Point,
        start: Option<Point>,
        hints: &Hints,
    ) -> Result<Vec<Point>, RoutingError> {
        let preferred = hints.preferred_directions();
        let padding = self.config.point_thresholds.padding_for(preferred);
        let orientation = get_orientation(self.registry.trbl(source)?, Trbl::from(target), padding);
        let directions = get_directions(orientation, preferred);

        tracing::debug!(%orientation, %directions, padding, "connecting shape to point");

        let start = start.unwrap_or_else(|| source.bounds.mid_point());
        let start_docking =
            self.registry
                .dock_towards(start, source, directions.start, orientation.invert())?;

        Ok(self.connect_points(start_docking.point, target, directions))
    }

    /// Repair a connection after one of its shapes changed.
    ///
    /// Tries, in order: a straight line if preferred and possible, a local
    /// repair of the moved end(s), the prior waypoints if nothing moved,
    /// and finally a fresh route.
    pub fn repair_connection(
        &self,
        source: &Shape,
        target: &Shape,
        start: Option<Point>,
        end: Option<Point>,
        waypoints: &[Point],
        hints: &Hints,
    ) -> Result<Vec<Point>, RoutingError> {
        let start = start
            .or_else(|| hints.connection_start.and_then(EndpointChange::point))
            .unwrap_or_else(|| source.bounds.mid_point());
        let end = end
            .or_else(|| hints.connection_end.and_then(EndpointChange::point))
            .unwrap_or_else(|| target.bounds.mid_point());

        if hints.is_straight_preferred() {
            if let Some(points) = layout_straight_between(
                &source.bounds,
                &target.bounds,
                start,
                end,
                hints.preserve_docking,
            ) {
                return Ok(points);
            }
        }

        if hints.connection_end.is_some() {
            let reversed: Vec<Point> = waypoints.iter().rev().copied().collect();

            match self.repair_end(target, source, end, &reversed)? {
                EndRepair::Repaired(mut points) => {
                    points.reverse();
                    return Ok(reduce_waypoints(&points, self.config.reduce_accuracy));
                }
                outcome => tracing::debug!(?outcome, "connection end not repaired"),
            }
        }

        if hints.connection_start.is_some() {
            match self.repair_end(source, target, start, waypoints)? {
                EndRepair::Repaired(points) => {
                    return Ok(reduce_waypoints(&points, self.config.reduce_accuracy));
                }
                outcome => tracing::debug!(?outcome, "connection start not repaired"),
            }
        }

        if hints.connection_start.is_none() && hints.connection_end.is_none() && !waypoints.is_empty() {
            return Ok(waypoints.to_vec());
        }

        self.connect_shapes(source, target, Some(start), Some(end), hints)
    }

    /// Repair the first segment of `waypoints` after `moved` changed.
    ///
    /// `waypoints` run from the moved shape to the other one and the first
    /// of them is replaced by `new_docking`. Only short routes with
    /// clearly separated points are repaired.
    pub fn repair_end(
        &self,
        moved: &Shape,
        other: &Shape,
        new_docking: Point,
        waypoints: &[Point],
    ) -> Result<EndRepair, RoutingError> {
        if !(3..=4).contains(&waypoints.len()) {
            return Ok(EndRepair::NeedsRelayout);
        }

        let min_distance = self.config.min_bendpoint_distance;
        if waypoints
            .windows(2)
            .any(|pair| point_distance(pair[0], pair[1]) < min_distance)
        {
            return Ok(EndRepair::NeedsRelayout);
        }

        let old_docking = waypoints[0];
        let mut points = waypoints.to_vec();

        points[0] = new_docking;
        points[1] = repair_bendpoint(points[1], old_docking, new_docking);

        let tolerance = self.config.repair_overlap_tolerance;
        if self.registry.contains_point(points[1], moved, tolerance)?
            || self.registry.contains_point(points[1], other, tolerance)?
        {
            return Ok(EndRepair::NeedsRelayout);
        }

        if all_points_alignment(&points).is_some() {
            return Ok(EndRepair::Collinear);
        }

        Ok(EndRepair::Repaired(points))
    }
}

/// Keep `candidate` aligned with its peer after the peer moved
fn repair_bendpoint(candidate: Point, old_peer: Point, new_peer: Point) -> Point {
    match points_alignment(old_peer, candidate) {
        Some(Alignment::Vertical) => Point::new(new_peer.x, candidate.y),
        Some(Alignment::Horizontal) => Point::new(candidate.x, new_peer.y),
        None => candidate,
    }
}

/// Two-point straight connection between side-by-side rectangles.
///
/// Only possible when one rectangle lies squarely beside, above or below
/// the other and the kept end falls within the other rectangle's extent.
pub fn layout_straight_between(
    source: &Rectangle,
    target: &Rectangle,
    start: Point,
    end: Point,
    preserve: Option<PreserveDocking>,
) -> Option<Vec<Point>> {
    let orientation = get_orientation(source.trbl(), target.trbl(), 0.0);

    let axis = match orientation {
        Orientation::Top | Orientation::Bottom => Axis::X,
        Orientation::Left | Orientation::Right => Axis::Y,
        _ => return None,
    };

    if preserve == Some(PreserveDocking::Target) {
        if !is_in_axis_range(axis, end, source) {
            return None;
        }
        return Some(vec![start.with(axis, end.get(axis)), end]);
    }

    if !is_in_axis_range(axis, start, target) {
        return None;
    }

    Some(vec![start, end.with(axis, start.get(axis))])
}
