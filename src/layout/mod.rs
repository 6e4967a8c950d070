//! Orthogonal connection layout
//!
//! Classifies how two shapes sit relative to each other, picks the
//! directions a connection leaves and enters them, generates bendpoints
//! and reduces the resulting waypoints. [`Router`] ties it together with
//! the shape registry.

pub mod bendpoints;
pub mod config;
pub mod directions;
pub mod geometry;
pub mod intersection;
pub mod orientation;
pub mod routing;
pub mod types;
pub mod waypoints;

pub use bendpoints::get_bendpoints;
pub use config::{PointThresholds, RoutingConfig};
pub use directions::{get_directions, Direction, Directions, PreferredLayout};
pub use intersection::{get_approx_intersection, ApproxIntersection};
pub use orientation::{get_orientation, Orientation, Padding};
pub use routing::{layout_straight_between, EndRepair, EndpointChange, Hints, PreserveDocking, Router};
pub use types::*;
pub use waypoints::{reduce_dropped_waypoints, reduce_waypoints, DropReduction};
