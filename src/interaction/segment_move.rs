//! Dragging a single segment of a routed connection
//!
//! A drag gesture is a sequence of [`DragEvent`]s folded through
//! [`SegmentDrag::handle`]. Each step returns the next state and, when the
//! connection changed, the waypoints to render:
//!
//! ```text
//!   Idle --Start (near an axis-aligned segment)--> Active
//!   Active --Move--> Active      (waypoints follow the pointer)
//!   Active --End--> Idle         (waypoints reduced and cropped)
//! ```
//!
//! Every move is computed from the waypoints captured at activation and
//! the accumulated delta, so no step depends on rounding done by an
//! earlier one.

use super::cropping::crop_waypoints;
use crate::error::RoutingError;
use crate::layout::geometry::{points_alignment, Alignment};
use crate::layout::intersection::get_approx_intersection;
use crate::layout::orientation::{get_orientation, Orientation};
use crate::layout::routing::Router;
use crate::layout::types::{Axis, Connection, Point};
use crate::layout::waypoints::{reduce_dropped_waypoints, DropReduction};

/// State of one segment drag, handed from step to step
#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    pub connection: Connection,
    /// Index of the dragged segment's first waypoint at activation
    pub segment_start_index: usize,
    /// Index of the dragged segment's first waypoint in `new_waypoints`
    pub new_segment_start_index: usize,
    pub segment_end_index: usize,
    /// Segment start at activation, pulled onto the source center line
    /// when it is the connection's first waypoint
    pub segment_start: Point,
    /// Segment end at activation, pulled onto the target center line
    /// when it is the connection's last waypoint
    pub segment_end: Point,
    /// Axis the segment moves along
    pub axis: Axis,
    /// Where the pointer grabbed the connection
    pub drag_position: Point,
    /// Accumulated movement along `axis`, in canvas units
    pub delta: f64,
    pub original_waypoints: Vec<Point>,
    pub new_waypoints: Vec<Point>,
}

/// Segment drag gesture state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SegmentDrag {
    #[default]
    Idle,
    Active(DragContext),
}

/// Pointer input driving a segment drag
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// Pointer pressed at `pointer` (canvas coordinates) on `connection`
    Start { connection: Connection, pointer: Point },
    /// Pointer moved by `movement` screen pixels at zoom `scale`
    Move { movement: Point, scale: f64 },
    /// Pointer released
    End,
}

impl SegmentDrag {
    pub fn is_active(&self) -> bool {
        matches!(self, SegmentDrag::Active(_))
    }

    pub fn context(&self) -> Option<&DragContext> {
        match self {
            SegmentDrag::Active(context) => Some(context),
            SegmentDrag::Idle => None,
        }
    }

    /// Apply one event.
    ///
    /// Returns the next state together with the connection's waypoints
    /// whenever the event changed them.
    pub fn handle(
        self,
        router: &Router,
        event: DragEvent,
    ) -> Result<(SegmentDrag, Option<Vec<Point>>), RoutingError> {
        match (self, event) {
            (_, DragEvent::Start { connection, pointer }) => {
                let next = router
                    .activate_segment_move(connection, pointer)
                    .map_or(SegmentDrag::Idle, SegmentDrag::Active);
                Ok((next, None))
            }
            (SegmentDrag::Active(context), DragEvent::Move { movement, scale }) => {
                let delta = context.delta + (movement.get(context.axis) / scale).round();
                let context = router.move_segment(&context, delta)?;
                let waypoints = context.new_waypoints.clone();
                Ok((SegmentDrag::Active(context), Some(waypoints)))
            }
            (SegmentDrag::Active(context), DragEvent::End) => {
                let context = router.finish_segment_move(&context)?;
                Ok((SegmentDrag::Idle, Some(context.new_waypoints)))
            }
            (SegmentDrag::Idle, DragEvent::Move { .. } | DragEvent::End) => Ok((SegmentDrag::Idle, None)),
        }
    }
}

impl Router {
    /// Start dragging the segment of `connection` closest to `pointer`.
    ///
    /// Returns `None` if the pointer is not near the connection or the
    /// segment found is not axis-aligned.
    pub fn activate_segment_move(&self, connection: Connection, pointer: Point) -> Option<DragContext> {
        let Some(intersection) =
            get_approx_intersection(&connection.waypoints, pointer, self.config().hit_threshold)
        else {
            tracing::debug!(%pointer, "no connection segment near pointer");
            return None;
        };

        let waypoints = &connection.waypoints;
        let segment_end_index = intersection.index;
        if segment_end_index == 0 || segment_end_index >= waypoints.len() {
            tracing::debug!(index = segment_end_index, "hit the connection start, not dragging");
            return None;
        }
        let segment_start_index = segment_end_index - 1;

        let mut segment_start = waypoints[segment_start_index];
        let mut segment_end = waypoints[segment_end_index];

        let axis = match points_alignment(segment_start, segment_end) {
            Some(Alignment::Vertical) => Axis::X,
            Some(Alignment::Horizontal) => Axis::Y,
            None => {
                tracing::debug!(
                    index = segment_start_index,
                    "segment is not axis-aligned, not dragging"
                );
                return None;
            }
        };

        let across = axis.flip();
        if segment_start_index == 0 {
            let center = connection.source.bounds.mid_point();
            segment_start = segment_start.with(across, center.get(across));
        }
        if segment_end_index == waypoints.len() - 1 {
            let center = connection.target.bounds.mid_point();
            segment_end = segment_end.with(across, center.get(across));
        }

        tracing::debug!(
            start = segment_start_index,
            end = segment_end_index,
            ?axis,
            "segment drag activated"
        );

        Some(DragContext {
            segment_start_index,
            new_segment_start_index: segment_start_index,
            segment_end_index,
            segment_start,
            segment_end,
            axis,
            drag_position: intersection.point,
            delta: 0.0,
            original_waypoints: waypoints.clone(),
            new_waypoints: waypoints.clone(),
            connection,
        })
    }

    /// Move the dragged segment by `delta` from where it was at
    /// activation.
    ///
    /// A segment touching a connection end grows a new stub when it
    /// leaves its shape and loses one when it moves back inside.
    pub fn move_segment(&self, context: &DragContext, delta: f64) -> Result<DragContext, RoutingError> {
        let DragContext {
            connection,
            segment_start_index: start_index,
            segment_end_index: end_index,
            axis,
            ..
        } = context;
        let (start_index, end_index) = (*start_index, *end_index);
        let count = context.original_waypoints.len();

        let new_start = context.segment_start.offset(*axis, delta);
        let new_end = context.segment_end.offset(*axis, delta);

        let mut points = context.original_waypoints.clone();
        points[start_index] = new_start;
        points[end_index] = new_end;

        let mut offset: isize = 0;

        if start_index < 2 {
            let orientation = get_orientation(self.registry().trbl(&connection.source)?, new_start.into(), 0.0);

            if start_index == 1 {
                if orientation == Orientation::Intersect {
                    tracing::debug!("segment start entered source, removing first waypoint");
                    points.remove(0);
                    points[0] = new_start;
                    offset -= 1;
                }
            } else if orientation != Orientation::Intersect {
                tracing::debug!("segment start left source, inserting waypoint");
                points.insert(0, context.segment_start);
                offset += 1;
            }
        }

        if end_index + 3 > count {
            let orientation = get_orientation(self.registry().trbl(&connection.target)?, new_end.into(), 0.0);

            if end_index + 2 == count {
                if orientation == Orientation::Intersect {
                    tracing::debug!("segment end entered target, removing last waypoint");
                    points.pop();
                    if let Some(last) = points.last_mut() {
                        *last = new_end;
                    }
                }
            } else if orientation != Orientation::Intersect {
                tracing::debug!("segment end left target, inserting waypoint");
                points.push(context.segment_end);
            }
        }

        let new_waypoints = crop_waypoints(self.registry(), &points, &connection.source, &connection.target)?;

        Ok(DragContext {
            new_segment_start_index: start_index.saturating_add_signed(offset),
            delta,
            new_waypoints,
            ..context.clone()
        })
    }

    /// Finish the drag: snap and collapse near-collinear waypoints, then
    /// re-crop both ends
    pub fn finish_segment_move(&self, context: &DragContext) -> Result<DragContext, RoutingError> {
        let DropReduction {
            waypoints,
            segment_offset,
        } = reduce_dropped_waypoints(
            &context.new_waypoints,
            context.new_segment_start_index,
            self.config().drop_accuracy,
        );

        let connection = &context.connection;
        let new_waypoints = crop_waypoints(self.registry(), &waypoints, &connection.source, &connection.target)?;

        Ok(DragContext {
            new_segment_start_index: context
                .new_segment_start_index
                .saturating_add_signed(segment_offset),
            new_waypoints,
            ..context.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Shape;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn stepped_connection() -> Connection {
        Connection::new(
            vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 125.0), p(300.0, 125.0)],
            Shape::rectangle(0.0, 0.0, 100.0, 50.0),
            Shape::rectangle(300.0, 100.0, 100.0, 50.0),
        )
    }

    fn straight_connection() -> Connection {
        Connection::new(
            vec![p(100.0, 25.0), p(300.0, 25.0)],
            Shape::rectangle(0.0, 0.0, 100.0, 50.0),
            Shape::rectangle(300.0, 0.0, 100.0, 50.0),
        )
    }

    #[test]
    fn test_activate_vertical_segment() {
        let router = Router::default();
        let context = router
            .activate_segment_move(stepped_connection(), p(200.0, 75.0))
            .unwrap();

        assert_eq!(context.segment_start_index, 1);
        assert_eq!(context.segment_end_index, 2);
        assert_eq!(context.axis, Axis::X);
        assert_eq!(context.segment_start, p(200.0, 25.0));
        assert_eq!(context.segment_end, p(200.0, 125.0));
        assert_eq!(context.drag_position, p(200.0, 75.0));
    }

    #[test]
    fn test_activate_misses_connection() {
        let router = Router::default();
        assert!(router
            .activate_segment_move(stepped_connection(), p(250.0, 75.0))
            .is_none());
    }

    #[test]
    fn test_activate_rejects_diagonal_segment() {
        let router = Router::default();
        let mut connection = stepped_connection();
        connection.waypoints = vec![p(100.0, 25.0), p(300.0, 125.0)];

        assert!(router.activate_segment_move(connection, p(200.0, 75.0)).is_none());
    }

    #[test]
    fn test_activate_end_segment_pulls_onto_centers() {
        let router = Router::default();
        let context = router
            .activate_segment_move(straight_connection(), p(200.0, 30.0))
            .unwrap();

        assert_eq!(context.axis, Axis::Y);
        assert_eq!(context.segment_start, p(50.0, 25.0));
        assert_eq!(context.segment_end, p(350.0, 25.0));
    }

    #[test]
    fn test_move_shifts_only_the_segment() {
        let router = Router::default();
        let context = router
            .activate_segment_move(stepped_connection(), p(200.0, 75.0))
            .unwrap();

        let moved = router.move_segment(&context, 30.0).unwrap();
        assert_eq!(
            moved.new_waypoints,
            vec![p(100.0, 25.0), p(230.0, 25.0), p(230.0, 125.0), p(300.0, 125.0)]
        );
        assert_eq!(moved.new_segment_start_index, 1);
        assert_eq!(moved.delta, 30.0);
    }

    #[test]
    fn test_move_into_source_drops_first_waypoint() {
        let router = Router::default();
        let context = router
            .activate_segment_move(stepped_connection(), p(200.0, 75.0))
            .unwrap();

        let moved = router.move_segment(&context, -150.0).unwrap();
        assert_eq!(
            moved.new_waypoints,
            vec![p(50.0, 50.0), p(50.0, 125.0), p(300.0, 125.0)]
        );
        assert_eq!(moved.new_segment_start_index, 0);
    }

    #[test]
    fn test_move_out_of_shapes_inserts_stubs() {
        let router = Router::default();
        let context = router
            .activate_segment_move(straight_connection(), p(200.0, 30.0))
            .unwrap();

        let moved = router.move_segment(&context, 60.0).unwrap();
        assert_eq!(
            moved.new_waypoints,
            vec![p(50.0, 50.0), p(50.0, 85.0), p(350.0, 85.0), p(350.0, 50.0)]
        );
        assert_eq!(moved.new_segment_start_index, 1);
    }

    #[test]
    fn test_gesture_accumulates_scaled_movement() {
        let router = Router::default();
        let state = SegmentDrag::default();

        let (state, output) = state
            .handle(
                &router,
                DragEvent::Start {
                    connection: straight_connection(),
                    pointer: p(200.0, 30.0),
                },
            )
            .unwrap();
        assert!(state.is_active());
        assert_eq!(output, None);

        let (state, output) = state
            .handle(
                &router,
                DragEvent::Move {
                    movement: p(3.0, 30.0),
                    scale: 0.5,
                },
            )
            .unwrap();
        assert_eq!(
            output,
            Some(vec![p(50.0, 50.0), p(50.0, 85.0), p(350.0, 85.0), p(350.0, 50.0)])
        );

        let (state, _) = state
            .handle(
                &router,
                DragEvent::Move {
                    movement: p(0.0, -10.0),
                    scale: 0.5,
                },
            )
            .unwrap();
        assert_eq!(state.context().map(|c| c.delta), Some(40.0));

        let (state, output) = state.handle(&router, DragEvent::End).unwrap();
        assert_eq!(state, SegmentDrag::Idle);
        assert_eq!(
            output,
            Some(vec![p(50.0, 50.0), p(50.0, 65.0), p(350.0, 65.0), p(350.0, 50.0)])
        );
    }

    #[test]
    fn test_idle_ignores_move_and_end() {
        let router = Router::default();

        let (state, output) = SegmentDrag::Idle
            .handle(
                &router,
                DragEvent::Move {
                    movement: p(10.0, 10.0),
                    scale: 1.0,
                },
            )
            .unwrap();
        assert_eq!((state.clone(), output), (SegmentDrag::Idle, None));

        let (state, output) = state.handle(&router, DragEvent::End).unwrap();
        assert_eq!((state, output), (SegmentDrag::Idle, None));
    }

    #[test]
    fn test_start_off_connection_stays_idle() {
        let router = Router::default();
        let (state, output) = SegmentDrag::Idle
            .handle(
                &router,
                DragEvent::Start {
                    connection: stepped_connection(),
                    pointer: p(0.0, 300.0),
                },
            )
            .unwrap();

        assert!(!state.is_active());
        assert_eq!(output, None);
    }
}
