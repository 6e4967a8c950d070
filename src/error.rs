//! Error types for the routing engine

use thiserror::Error;

/// Contract violations detected by the routing engine.
///
/// These are setup or caller bugs (a bad token, a shape kind nobody
/// registered). Expected outcomes such as "this end cannot be repaired
/// locally" are not errors and never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    /// Malformed directions or layout token
    #[error("unknown directions '{token}': must be <start>:<end> with start/end in {{h, v, t, r, b, l}}")]
    InvalidDirections { token: String },

    /// Shape kind without registered docking behavior
    #[error("no docking behavior registered for shape kind '{kind}'")]
    UnknownShapeKind { kind: String },

    /// Waypoint list that cannot describe a connection
    #[error("invalid connection: {reason}")]
    InvalidConnection { reason: String },
}

impl RoutingError {
    /// Create an invalid directions error
    pub fn invalid_directions(token: impl Into<String>) -> Self {
        Self::InvalidDirections {
            token: token.into(),
        }
    }

    /// Create an unknown shape kind error
    pub fn unknown_shape_kind(kind: impl Into<String>) -> Self {
        Self::UnknownShapeKind { kind: kind.into() }
    }

    /// Create an invalid connection error
    pub fn invalid_connection(reason: impl Into<String>) -> Self {
        Self::InvalidConnection {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directions_display() {
        let err = RoutingError::invalid_directions("x:y");
        assert!(err.to_string().contains("'x:y'"));
        assert!(err.to_string().contains("{h, v, t, r, b, l}"));
    }

    #[test]
    fn test_unknown_shape_kind_display() {
        let err = RoutingError::unknown_shape_kind("hexagon");
        assert_eq!(
            err.to_string(),
            "no docking behavior registered for shape kind 'hexagon'"
        );
    }

    #[test]
    fn test_invalid_connection_display() {
        let err = RoutingError::invalid_connection("need at least two waypoints");
        assert!(err.to_string().starts_with("invalid connection"));
    }
}
