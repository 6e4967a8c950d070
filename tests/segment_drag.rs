//! Dragging connection segments through whole gestures

use manhattan_router::{Connection, DragEvent, Hints, Point, Router, SegmentDrag, Shape};
use pretty_assertions::assert_eq;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn drag(
    router: &Router,
    connection: Connection,
    pointer: Point,
    moves: &[(Point, f64)],
) -> (Vec<Vec<Point>>, Option<Vec<Point>>) {
    let (mut state, _) = SegmentDrag::Idle
        .handle(router, DragEvent::Start { connection, pointer })
        .unwrap();
    assert!(state.is_active(), "drag did not start at {}", pointer);

    let mut frames = Vec::new();
    for (movement, scale) in moves {
        let (next, output) = state
            .handle(
                router,
                DragEvent::Move {
                    movement: *movement,
                    scale: *scale,
                },
            )
            .unwrap();
        frames.extend(output);
        state = next;
    }

    let (state, dropped) = state.handle(router, DragEvent::End).unwrap();
    assert!(!state.is_active());
    (frames, dropped)
}

#[test]
fn test_dragging_vertical_segment_collapses_on_drop() {
    let router = Router::default();
    let connection = Connection::new(
        vec![
            p(100.0, 25.0),
            p(170.0, 25.0),
            p(170.0, 100.0),
            p(200.0, 100.0),
            p(200.0, 225.0),
            p(400.0, 225.0),
        ],
        Shape::rectangle(0.0, 0.0, 100.0, 50.0),
        Shape::rectangle(400.0, 200.0, 100.0, 50.0),
    );

    let (frames, dropped) = drag(&router, connection, p(170.0, 60.0), &[(p(30.0, 4.0), 1.0)]);

    // only the dragged segment moves while dragging
    assert_eq!(
        frames,
        vec![vec![
            p(100.0, 25.0),
            p(200.0, 25.0),
            p(200.0, 100.0),
            p(200.0, 100.0),
            p(200.0, 225.0),
            p(400.0, 225.0),
        ]]
    );

    // the now collinear points collapse once dropped
    assert_eq!(
        dropped,
        Some(vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 225.0), p(400.0, 225.0)])
    );
}

#[test]
fn test_drag_routed_connection() {
    let router = Router::default();
    let source = Shape::rectangle(0.0, 0.0, 100.0, 50.0);
    let target = Shape::rectangle(300.0, 100.0, 100.0, 50.0);

    let waypoints = router
        .connect_shapes(&source, &target, None, None, &Hints::new())
        .unwrap();
    let connection = Connection::new(waypoints, source, target);

    // two half steps at zoom 2 add up to one canvas step each
    let (frames, dropped) = drag(
        &router,
        connection,
        p(200.0, 75.0),
        &[(p(40.0, 0.0), 2.0), (p(40.0, 0.0), 2.0)],
    );

    assert_eq!(
        frames.last(),
        Some(&vec![p(100.0, 25.0), p(240.0, 25.0), p(240.0, 125.0), p(300.0, 125.0)])
    );
    assert_eq!(dropped.as_ref(), frames.last());
}

#[test]
fn test_drag_back_into_source_and_out_again() {
    let router = Router::default();
    let connection = Connection::new(
        vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 125.0), p(300.0, 125.0)],
        Shape::rectangle(0.0, 0.0, 100.0, 50.0),
        Shape::rectangle(300.0, 100.0, 100.0, 50.0),
    );

    let (frames, dropped) = drag(
        &router,
        connection,
        p(200.0, 75.0),
        &[(p(-150.0, 0.0), 1.0), (p(150.0, 0.0), 1.0)],
    );

    assert_eq!(
        frames,
        vec![
            vec![p(50.0, 50.0), p(50.0, 125.0), p(300.0, 125.0)],
            vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 125.0), p(300.0, 125.0)],
        ]
    );
    assert_eq!(
        dropped,
        Some(vec![p(100.0, 25.0), p(200.0, 25.0), p(200.0, 125.0), p(300.0, 125.0)])
    );
}

#[test]
fn test_pointer_away_from_connection_does_not_drag() {
    let router = Router::default();
    let connection = Connection::new(
        vec![p(100.0, 25.0), p(300.0, 25.0)],
        Shape::rectangle(0.0, 0.0, 100.0, 50.0),
        Shape::rectangle(300.0, 0.0, 100.0, 50.0),
    );

    let (state, output) = SegmentDrag::Idle
        .handle(
            &router,
            DragEvent::Start {
                connection,
                pointer: p(200.0, 36.0),
            },
        )
        .unwrap();
    assert_eq!(state, SegmentDrag::Idle);
    assert_eq!(output, None);
}
