//! Manhattan Router - orthogonal connection routing between shapes
//!
//! This library routes connections made only of horizontal and vertical
//! segments, repairs them when shapes move and lets users drag single
//! segments around.
//!
//! # Example
//!
//! ```rust
//! use manhattan_router::{Hints, Point, Router, Shape};
//!
//! let router = Router::default();
//! let client = Shape::rectangle(0.0, 0.0, 100.0, 50.0);
//! let server = Shape::rectangle(300.0, 100.0, 100.0, 50.0);
//!
//! let waypoints = router.connect_shapes(&client, &server, None, None, &Hints::default())?;
//! assert_eq!(
//!     waypoints,
//!     vec![
//!         Point::new(100.0, 25.0),
//!         Point::new(200.0, 25.0),
//!         Point::new(200.0, 125.0),
//!         Point::new(300.0, 125.0),
//!     ]
//! );
//! # Ok::<(), manhattan_router::RoutingError>(())
//! ```

pub mod docking;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod scene;

pub use docking::{Docking, ShapeRegistry, ShapeSupport};
pub use error::RoutingError;
pub use interaction::{crop_waypoints, DragContext, DragEvent, SegmentDrag};
pub use layout::{
    Connection, Directions, EndRepair, EndpointChange, Hints, Orientation, Point, PreferredLayout, PreserveDocking,
    Rectangle, Router, RoutingConfig, Shape, ShapeKind, Side,
};
pub use scene::{RoutedConnection, Scene, SceneError};

/// Route every connection of a TOML scene with the scene's own tolerances
pub fn route_scene(content: &str) -> Result<Vec<RoutedConnection>, SceneError> {
    let scene = Scene::from_str(content)?;
    scene.route(&scene.router())
}
