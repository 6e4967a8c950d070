//! Configuration for the routing engine

use serde::Deserialize;

use super::directions::{Direction, Directions};

/// Tunable tolerances used by routing, repair and dragging.
///
/// All values are in canvas units. The defaults are empirical and the
/// routing behavior is tuned around them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Length of the stub a connection walks out of a shape before turning
    pub min_segment_length: f64,

    /// Vertical separation required before a redirected target docking
    /// replaces the normal layout
    pub changed_docking_threshold: f64,

    /// Tolerance around both shapes within which a locally repaired
    /// bendpoint counts as overlapping them
    pub repair_overlap_tolerance: f64,

    /// Adjacent waypoints closer than this make local repair bail out
    pub min_bendpoint_distance: f64,

    /// Collinearity tolerance when reducing freshly routed waypoints
    pub reduce_accuracy: f64,

    /// Collinearity tolerance when reducing waypoints after a drag
    pub drop_accuracy: f64,

    /// Radius for hit-testing a point against a connection
    pub hit_threshold: f64,

    /// Padding when classifying bendpoint segment orientation
    pub point_orientation_padding: f64,

    /// Orientation padding when routing towards a free point
    pub point_thresholds: PointThresholds,
}

/// Orientation padding per preferred layout when the target is a point
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointThresholds {
    /// `h:h` and `v:v`
    pub parallel: f64,
    /// `h:v` and `v:h`
    pub crossed: f64,
    /// Any other layout
    pub other: f64,
}

impl Default for PointThresholds {
    fn default() -> Self {
        Self {
            parallel: 20.0,
            crossed: -10.0,
            other: 0.0,
        }
    }
}

impl PointThresholds {
    pub fn padding_for(&self, layout: Directions) -> f64 {
        use Direction::{Horizontal, Vertical};

        match (layout.start, layout.end) {
            (Horizontal, Horizontal) | (Vertical, Vertical) => self.parallel,
            (Horizontal, Vertical) | (Vertical, Horizontal) => self.crossed,
            _ => self.other,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            min_segment_length: 20.0,
            changed_docking_threshold: 16.0,
            repair_overlap_tolerance: 20.0,
            min_bendpoint_distance: 3.0,
            reduce_accuracy: 2.0,
            drop_accuracy: 5.0,
            hit_threshold: 10.0,
            point_orientation_padding: 5.0,
            point_thresholds: PointThresholds::default(),
        }
    }
}

impl RoutingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stub length used before turning
    pub fn with_min_segment_length(mut self, length: f64) -> Self {
        self.min_segment_length = length;
        self
    }

    /// Set the redirected docking threshold
    pub fn with_changed_docking_threshold(mut self, threshold: f64) -> Self {
        self.changed_docking_threshold = threshold;
        self
    }

    /// Set the local repair overlap tolerance
    pub fn with_repair_overlap_tolerance(mut self, tolerance: f64) -> Self {
        self.repair_overlap_tolerance = tolerance;
        self
    }

    /// Set both reducer accuracies
    pub fn with_accuracy(mut self, reduce: f64, drop: f64) -> Self {
        self.reduce_accuracy = reduce;
        self.drop_accuracy = drop;
        self
    }

    /// Set the hit-test radius
    pub fn with_hit_threshold(mut self, threshold: f64) -> Self {
        self.hit_threshold = threshold;
        self
    }

    /// Set the point target orientation paddings
    pub fn with_point_thresholds(mut self, thresholds: PointThresholds) -> Self {
        self.point_thresholds = thresholds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.min_segment_length, 20.0);
        assert_eq!(config.changed_docking_threshold, 16.0);
        assert_eq!(config.repair_overlap_tolerance, 20.0);
        assert_eq!(config.min_bendpoint_distance, 3.0);
        assert_eq!(config.reduce_accuracy, 2.0);
        assert_eq!(config.drop_accuracy, 5.0);
        assert_eq!(config.hit_threshold, 10.0);
        assert_eq!(config.point_orientation_padding, 5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RoutingConfig::new()
            .with_min_segment_length(30.0)
            .with_accuracy(1.0, 4.0);

        assert_eq!(config.min_segment_length, 30.0);
        assert_eq!(config.reduce_accuracy, 1.0);
        assert_eq!(config.drop_accuracy, 4.0);
        assert_eq!(config.hit_threshold, 10.0);
    }

    #[test]
    fn test_point_padding_per_layout() {
        let thresholds = PointThresholds::default();
        assert_eq!(thresholds.padding_for(Directions::HORIZONTAL_HORIZONTAL), 20.0);
        assert_eq!(thresholds.padding_for(Directions::VERTICAL_VERTICAL), 20.0);
        assert_eq!(thresholds.padding_for(Directions::HORIZONTAL_VERTICAL), -10.0);
        assert_eq!(thresholds.padding_for(Directions::VERTICAL_HORIZONTAL), -10.0);
        assert_eq!(thresholds.padding_for("t:b".parse().unwrap()), 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RoutingConfig = toml::from_str(
            r#"
            hit_threshold = 12.0

            [point_thresholds]
            crossed = -5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.hit_threshold, 12.0);
        assert_eq!(config.point_thresholds.crossed, -5.0);
        assert_eq!(config.point_thresholds.parallel, 20.0);
        assert_eq!(config.min_segment_length, 20.0);
    }
}
