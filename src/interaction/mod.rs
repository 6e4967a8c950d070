//! Interactive editing of routed connections

mod cropping;
mod segment_move;

pub use cropping::crop_waypoints;
pub use segment_move::{DragContext, DragEvent, SegmentDrag};
