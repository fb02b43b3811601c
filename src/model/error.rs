//! Validation errors for shapes and coordinates.

use thiserror::Error;

use super::shape::ShapeId;

/// Reasons a shape or coordinate is rejected before any mutation happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Latitude or longitude out of range, or not finite
    #[error("Invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate {
        /// Offending latitude
        lat: f64,
        /// Offending longitude
        lon: f64,
    },

    /// Not enough positions for the geometry kind
    #[error("{kind} needs at least {required} positions, got {found}")]
    TooFewPositions {
        /// Geometry kind name
        kind: &'static str,
        /// Minimum count
        required: usize,
        /// Actual count
        found: usize,
    },

    /// Circle radius must be finite and strictly positive
    #[error("Circle radius must be positive, got {0} m")]
    NonPositiveRadius(f64),

    /// Rectangle corners share a latitude or longitude
    #[error("Rectangle corners must differ in both latitude and longitude")]
    DegenerateRectangle,

    /// Replacement targets an id that is not in the store
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// Text could not be read as a coordinate
    #[error("Cannot parse coordinate from '{0}'")]
    Unparsable(String),
}
