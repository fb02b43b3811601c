//! Shape geometry and annotated shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coordinate::Coordinate;
use super::error::ValidationError;
use super::zone::{ZoneData, ZoneType};
use crate::constants::{MIN_LINE_POSITIONS, MIN_POLYGON_POSITIONS};
use crate::geometry;

/// Unique identifier for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Geometry of a drawn zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Single position marker.
    Point { position: Coordinate },
    /// Open path of two or more positions.
    Line { positions: Vec<Coordinate> },
    /// Implicitly closed ring of three or more positions.
    Polygon { positions: Vec<Coordinate> },
    /// Axis-aligned rectangle, treated as a four-corner polygon.
    Rectangle {
        south_west: Coordinate,
        north_east: Coordinate,
    },
    /// Circle with a radius in metres.
    Circle { center: Coordinate, radius_m: f64 },
}

impl Geometry {
    /// Create a normalized rectangle from two opposite corners.
    pub fn rectangle_from_corners(a: Coordinate, b: Coordinate) -> Self {
        Geometry::Rectangle {
            south_west: Coordinate::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            north_east: Coordinate::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Get the geometry kind as a string (for messages and exports).
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "point",
            Geometry::Line { .. } => "line",
            Geometry::Polygon { .. } => "polygon",
            Geometry::Rectangle { .. } => "rectangle",
            Geometry::Circle { .. } => "circle",
        }
    }

    /// Check the structural invariants of this geometry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Geometry::Point { position } => position.validate(),
            Geometry::Line { positions } => {
                check_count("Line", positions, MIN_LINE_POSITIONS)?;
                positions.iter().try_for_each(Coordinate::validate)
            }
            Geometry::Polygon { positions } => {
                check_count("Polygon", positions, MIN_POLYGON_POSITIONS)?;
                positions.iter().try_for_each(Coordinate::validate)
            }
            Geometry::Rectangle {
                south_west,
                north_east,
            } => {
                south_west.validate()?;
                north_east.validate()?;
                if south_west.lat == north_east.lat || south_west.lon == north_east.lon {
                    Err(ValidationError::DegenerateRectangle)
                } else {
                    Ok(())
                }
            }
            Geometry::Circle { center, radius_m } => {
                center.validate()?;
                if radius_m.is_finite() && *radius_m > 0.0 {
                    Ok(())
                } else {
                    Err(ValidationError::NonPositiveRadius(*radius_m))
                }
            }
        }
    }

    /// Vertices of the geometry. Rectangles yield SW, NW, NE, SE; circles
    /// yield only the center.
    pub fn positions(&self) -> Vec<Coordinate> {
        match self {
            Geometry::Point { position } => vec![*position],
            Geometry::Line { positions } | Geometry::Polygon { positions } => positions.clone(),
            Geometry::Rectangle {
                south_west,
                north_east,
            } => vec![
                *south_west,
                Coordinate::new(north_east.lat, south_west.lon),
                *north_east,
                Coordinate::new(south_west.lat, north_east.lon),
            ],
            Geometry::Circle { center, .. } => vec![*center],
        }
    }

    /// Whether this geometry encloses an area.
    pub fn is_areal(&self) -> bool {
        matches!(
            self,
            Geometry::Polygon { .. } | Geometry::Rectangle { .. } | Geometry::Circle { .. }
        )
    }

    /// Enclosed area in km², only for polygons, rectangles and circles.
    pub fn area_km2(&self) -> Option<f64> {
        match self {
            Geometry::Polygon { .. } | Geometry::Rectangle { .. } => {
                let ring = self.positions();
                (ring.len() >= MIN_POLYGON_POSITIONS).then(|| geometry::polygon_area_km2(&ring))
            }
            Geometry::Circle { radius_m, .. } => Some(geometry::circle_area_km2(*radius_m)),
            Geometry::Point { .. } | Geometry::Line { .. } => None,
        }
    }

    /// Boundary length in km for areal geometries.
    pub fn perimeter_km(&self) -> Option<f64> {
        match self {
            Geometry::Polygon { .. } | Geometry::Rectangle { .. } => {
                Some(geometry::ring_perimeter_km(&self.positions()))
            }
            Geometry::Circle { radius_m, .. } => Some(geometry::circle_perimeter_km(*radius_m)),
            Geometry::Point { .. } | Geometry::Line { .. } => None,
        }
    }

    /// Path length in km for lines.
    pub fn length_km(&self) -> Option<f64> {
        match self {
            Geometry::Line { positions } => Some(geometry::path_length_km(positions)),
            _ => None,
        }
    }

    /// Representative position: the point, the circle center, or the vertex mean.
    pub fn centroid(&self) -> Option<Coordinate> {
        match self {
            Geometry::Point { position } => Some(*position),
            Geometry::Circle { center, .. } => Some(*center),
            _ => geometry::centroid(&self.positions()),
        }
    }
}

fn check_count(
    kind: &'static str,
    positions: &[Coordinate],
    required: usize,
) -> Result<(), ValidationError> {
    if positions.len() < required {
        return Err(ValidationError::TooFewPositions {
            kind,
            required,
            found: positions.len(),
        });
    }
    Ok(())
}

/// A drawn zone with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Unique identifier, immutable once assigned.
    pub id: ShapeId,
    /// Zone classification.
    pub zone: ZoneType,
    /// Optional human label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The geometry.
    pub geometry: Geometry,
    /// Zone-specific data payload.
    #[serde(default, skip_serializing_if = "ZoneData::is_none")]
    pub data: ZoneData,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Shape {
    /// Create a new shape with a fresh id and the current time.
    pub fn new(zone: ZoneType, geometry: Geometry) -> Self {
        Self {
            id: ShapeId::new(),
            zone,
            label: None,
            geometry,
            data: ZoneData::None,
            created_at: Utc::now(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the data payload.
    pub fn with_data(mut self, data: ZoneData) -> Self {
        self.data = data;
        self
    }

    /// Label if set, otherwise the zone type name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.zone.name())
    }

    /// Validate the geometry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.geometry.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_validate_counts() {
        let two = Geometry::Polygon {
            positions: vec![c(0.0, 0.0), c(1.0, 1.0)],
        };
        assert_eq!(
            two.validate(),
            Err(ValidationError::TooFewPositions {
                kind: "Polygon",
                required: 3,
                found: 2
            })
        );

        let line = Geometry::Line {
            positions: vec![c(0.0, 0.0)],
        };
        assert!(line.validate().is_err());

        let ok = Geometry::Line {
            positions: vec![c(0.0, 0.0), c(1.0, 1.0)],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_validate_circle_radius() {
        let zero = Geometry::Circle {
            center: c(0.0, 0.0),
            radius_m: 0.0,
        };
        assert_eq!(zero.validate(), Err(ValidationError::NonPositiveRadius(0.0)));

        let negative = Geometry::Circle {
            center: c(0.0, 0.0),
            radius_m: -5.0,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_validate_out_of_range_vertex() {
        let polygon = Geometry::Polygon {
            positions: vec![c(0.0, 0.0), c(1.0, 1.0), c(91.0, 0.0)],
        };
        assert!(matches!(
            polygon.validate(),
            Err(ValidationError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_rectangle_from_corners_normalizes() {
        let rect = Geometry::rectangle_from_corners(c(2.0, 5.0), c(1.0, 3.0));
        assert_eq!(
            rect,
            Geometry::Rectangle {
                south_west: c(1.0, 3.0),
                north_east: c(2.0, 5.0),
            }
        );
        assert_eq!(rect.positions().len(), 4);
        assert!(rect.validate().is_ok());

        let flat = Geometry::rectangle_from_corners(c(1.0, 3.0), c(1.0, 5.0));
        assert_eq!(flat.validate(), Err(ValidationError::DegenerateRectangle));
    }

    #[test]
    fn test_rectangle_area_matches_polygon() {
        let rect = Geometry::rectangle_from_corners(c(0.0, 0.0), c(1.0, 1.0));
        let polygon = Geometry::Polygon {
            positions: rect.positions(),
        };
        assert_eq!(rect.area_km2(), polygon.area_km2());
    }

    #[test]
    fn test_area_only_for_areal_shapes() {
        assert!(Geometry::Point { position: c(0.0, 0.0) }.area_km2().is_none());
        assert!(
            Geometry::Line {
                positions: vec![c(0.0, 0.0), c(1.0, 1.0)]
            }
            .area_km2()
            .is_none()
        );
        let circle = Geometry::Circle {
            center: c(0.0, 0.0),
            radius_m: 1000.0,
        };
        assert!((circle.area_km2().unwrap() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_shape_serde_tagging() {
        let shape = Shape::new(
            ZoneType::ProtectedArea,
            Geometry::Circle {
                center: c(6.0, 80.0),
                radius_m: 250.0,
            },
        )
        .with_label("Reef");
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["geometry"]["type"], "circle");
        assert_eq!(value["zone"], "protected_area");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("data").is_none());

        let back: Shape = serde_json::from_value(value).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_display_name_falls_back_to_zone() {
        let shape = Shape::new(ZoneType::FishingZone, Geometry::Point { position: c(0.0, 0.0) });
        assert_eq!(shape.display_name(), "Fishing Zone");
        assert_eq!(shape.with_label("Bay").display_name(), "Bay");
    }
}
