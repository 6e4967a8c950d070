//! Scene files: shapes and the connections to route between them
//!
//! A scene is a TOML document:
//!
//! ```toml
//! [config]                # optional routing tolerances
//! min_segment_length = 20
//!
//! [shapes.a]
//! x = 0
//! y = 0
//! width = 100
//! height = 50
//!
//! [shapes.b]
//! x = 300
//! y = 0
//! width = 100
//! height = 50
//! kind = "circle"         # defaults to "rectangle"
//!
//! [[connections]]
//! source = "a"
//! target = "b"            # or target_point = { x = 400, y = 20 }
//! waypoints = []          # prior route, repaired instead of re-routed
//! hints = { preferred_layouts = ["v:h"] }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::RoutingError;
use crate::layout::config::RoutingConfig;
use crate::layout::routing::{Hints, Router};
use crate::layout::types::{Point, Rectangle, Shape, ShapeKind};

/// Errors that can occur when loading or routing a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("connection {index} refers to unknown shape '{id}'")]
    UnknownShape { index: usize, id: String },
    #[error("connection {index} needs either a target or a target_point")]
    MissingTarget { index: usize },
    #[error("connection {index}: {source}")]
    Routing {
        index: usize,
        #[source]
        source: RoutingError,
    },
}

/// Where a connection ends
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionTarget {
    Shape(String),
    /// A free point, as while a new connection is still being drawn
    Point(Point),
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::Shape(id) => f.write_str(id),
            ConnectionTarget::Point(point) => write!(f, "{}", point),
        }
    }
}

/// One connection to route
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConnection {
    pub source: String,
    pub target: ConnectionTarget,
    /// Point to dock from on the source, the source center if unset
    pub start: Option<Point>,
    /// Point to dock to on the target, the target center if unset
    pub end: Option<Point>,
    /// Prior route; when present the connection is repaired
    pub waypoints: Vec<Point>,
    pub hints: Hints,
}

/// Shapes, connections and routing tolerances
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: RoutingConfig,
    pub shapes: BTreeMap<String, Shape>,
    pub connections: Vec<SceneConnection>,
}

/// A connection after routing
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConnection {
    pub source: String,
    pub target: ConnectionTarget,
    pub waypoints: Vec<Point>,
}

impl fmt::Display for RoutedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}:", self.source, self.target)?;
        for point in &self.waypoints {
            write!(f, " {}", point)?;
        }
        Ok(())
    }
}

/// TOML structure for deserializing scenes
#[derive(Deserialize)]
struct TomlScene {
    #[serde(default)]
    config: RoutingConfig,
    #[serde(default)]
    shapes: BTreeMap<String, TomlShape>,
    #[serde(default)]
    connections: Vec<TomlConnection>,
}

#[derive(Deserialize)]
struct TomlShape {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    kind: ShapeKind,
    #[serde(default)]
    data: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct TomlConnection {
    source: String,
    target: Option<String>,
    target_point: Option<Point>,
    start: Option<Point>,
    end: Option<Point>,
    #[serde(default)]
    waypoints: Vec<Point>,
    #[serde(default)]
    hints: Hints,
}

impl Scene {
    /// Load scene from TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load scene from TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let shapes = parsed
            .shapes
            .into_iter()
            .map(|(id, shape)| {
                let mut converted = Shape::new(
                    Rectangle::new(shape.x, shape.y, shape.width, shape.height),
                    shape.kind,
                );
                converted.data = shape.data;
                (id, converted)
            })
            .collect();

        let connections = parsed
            .connections
            .into_iter()
            .enumerate()
            .map(|(index, connection)| {
                let target = match (connection.target, connection.target_point) {
                    (Some(id), _) => ConnectionTarget::Shape(id),
                    (None, Some(point)) => ConnectionTarget::Point(point),
                    (None, None) => return Err(SceneError::MissingTarget { index }),
                };

                Ok(SceneConnection {
                    source: connection.source,
                    target,
                    start: connection.start,
                    end: connection.end,
                    waypoints: connection.waypoints,
                    hints: connection.hints,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene {
            config: parsed.config,
            shapes,
            connections,
        })
    }

    /// Router with the default shape kinds and this scene's tolerances
    pub fn router(&self) -> Router {
        Router::default().with_config(self.config.clone())
    }

    fn shape(&self, index: usize, id: &str) -> Result<&Shape, SceneError> {
        self.shapes.get(id).ok_or_else(|| SceneError::UnknownShape {
            index,
            id: id.to_string(),
        })
    }

    /// Route every connection, in file order.
    ///
    /// Connections with prior waypoints are repaired; all others are
    /// routed from scratch.
    pub fn route(&self, router: &Router) -> Result<Vec<RoutedConnection>, SceneError> {
        self.connections
            .iter()
            .enumerate()
            .map(|(index, connection)| {
                let source = self.shape(index, &connection.source)?;

                let waypoints = match &connection.target {
                    ConnectionTarget::Point(point) => {
                        router.connect_shape_to_point(source, *point, connection.start, &connection.hints)
                    }
                    ConnectionTarget::Shape(id) => {
                        let target = self.shape(index, id)?;
                        if connection.waypoints.is_empty() {
                            router.connect_shapes(source, target, connection.start, connection.end, &connection.hints)
                        } else {
                            router.repair_connection(
                                source,
                                target,
                                connection.start,
                                connection.end,
                                &connection.waypoints,
                                &connection.hints,
                            )
                        }
                    }
                }
                .map_err(|source| SceneError::Routing { index, source })?;

                tracing::debug!(index, points = waypoints.len(), "routed connection");

                Ok(RoutedConnection {
                    source: connection.source.clone(),
                    target: connection.target.clone(),
                    waypoints,
                })
            })
            .collect()
    }
}
