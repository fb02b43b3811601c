//! GeoJSON format implementation.
//!
//! Exports a `FeatureCollection` with one feature per shape:
//!
//! | Shape              | GeoJSON geometry                          |
//! |--------------------|-------------------------------------------|
//! | Point              | `Point`                                   |
//! | Line               | `LineString`                              |
//! | Polygon, Rectangle | `Polygon`, ring closed on its first vertex |
//! | Circle             | `Point` at the center, radius dropped     |
//!
//! Positions are `[lon, lat]`. Each feature carries
//! `{ name, type, color, data, createdAt }` as properties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::error::FormatError;
use crate::format::traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportResult, ZoneFormat,
    circle_dropped,
};
use crate::model::{Coordinate, Geometry, Project, Shape, ZoneData, ZoneType};

#[derive(Debug, Serialize, Deserialize)]
struct FeatureCollection<F> {
    #[serde(rename = "type")]
    ty: String,
    features: Vec<F>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    ty: String,
    geometry: Option<FeatureGeometry>,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeatureGeometry {
    #[serde(rename = "type")]
    ty: String,
    coordinates: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureProperties {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    zone: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// GeoJSON `FeatureCollection` format.
///
/// Lossy for circles: they are written as their center point and one
/// warning per circle is reported in the [`ExportResult`].
pub struct GeoJsonFormat;

impl ZoneFormat for GeoJsonFormat {
    fn id(&self) -> &'static str {
        "geojson"
    }

    fn display_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn extensions(&self) -> &[&'static str] {
        &["geojson"]
    }

    fn export(
        &self,
        project: &Project,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let shapes = options.select(project);
        let features: Vec<Feature> = shapes.iter().map(|shape| to_feature(shape)).collect();

        let collection = FeatureCollection {
            ty: "FeatureCollection".to_string(),
            features,
        };
        let bytes = if options.compact {
            serde_json::to_vec(&collection)?
        } else {
            serde_json::to_vec_pretty(&collection)?
        };

        let mut result = ExportResult::new(bytes, shapes.len());
        for shape in shapes.iter().filter(|s| matches!(s.geometry, Geometry::Circle { .. })) {
            let warning = circle_dropped(shape, self.display_name());
            log::warn!("{}", warning.message);
            result.add_warning(warning);
        }
        log::info!(
            "Exported {} features as GeoJSON ({} warnings)",
            shapes.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportResult, FormatError> {
        let root: Value = serde_json::from_slice(bytes)?;
        let features = match root.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => {
                serde_json::from_value::<FeatureCollection<Value>>(root)?.features
            }
            Some("Feature") => vec![root],
            Some(other) => {
                return Err(FormatError::invalid_format(format!(
                    "expected a FeatureCollection, found '{}'",
                    other
                )));
            }
            None => return Err(FormatError::missing_field("type")),
        };

        let mut result = ImportResult::default();
        for (index, value) in features.into_iter().enumerate() {
            let parsed = serde_json::from_value::<Feature>(value)
                .map_err(|e| e.to_string())
                .and_then(|feature| from_feature(feature, options));
            match parsed {
                Ok(shape) => result.shapes.push(shape),
                Err(message) => result.warnings.push(FormatWarning::new(format!(
                    "Skipped feature {}: {}",
                    index, message
                ))),
            }
        }

        log::info!(
            "Read {} shapes from GeoJSON ({} features skipped)",
            result.shapes.len(),
            result.warnings.len()
        );
        Ok(result)
    }
}

fn lon_lat(c: &Coordinate) -> Value {
    Value::from(c.to_lon_lat().to_vec())
}

fn to_feature(shape: &Shape) -> Feature {
    let (ty, coordinates) = match &shape.geometry {
        Geometry::Point { position } | Geometry::Circle { center: position, .. } => {
            ("Point", lon_lat(position))
        }
        Geometry::Line { positions } => (
            "LineString",
            Value::Array(positions.iter().map(lon_lat).collect()),
        ),
        Geometry::Polygon { .. } | Geometry::Rectangle { .. } => {
            let mut ring = shape.geometry.positions();
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
            (
                "Polygon",
                Value::Array(vec![Value::Array(ring.iter().map(lon_lat).collect())]),
            )
        }
    };

    Feature {
        ty: "Feature".to_string(),
        geometry: Some(FeatureGeometry {
            ty: ty.to_string(),
            coordinates,
        }),
        properties: FeatureProperties {
            name: Some(shape.display_name().to_string()),
            zone: Some(shape.zone.key().to_string()),
            color: Some(shape.zone.color_hex()),
            data: shape.data.to_json_value(),
            created_at: Some(shape.created_at),
        },
    }
}

fn position(value: &Value) -> Result<Coordinate, String> {
    let pair = value
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| format!("invalid position {}", value))?;
    let lon = pair[0].as_f64().ok_or("non-numeric longitude")?;
    let lat = pair[1].as_f64().ok_or("non-numeric latitude")?;
    Coordinate::try_new(lat, lon).map_err(|e| e.to_string())
}

fn positions(value: &Value) -> Result<Vec<Coordinate>, String> {
    value
        .as_array()
        .ok_or_else(|| "coordinates are not an array".to_string())?
        .iter()
        .map(position)
        .collect()
}

fn from_feature(feature: Feature, options: &ImportOptions) -> Result<Shape, String> {
    let geometry = feature.geometry.ok_or("feature has no geometry")?;
    let geometry = match geometry.ty.as_str() {
        "Point" => Geometry::Point {
            position: position(&geometry.coordinates)?,
        },
        "LineString" => Geometry::Line {
            positions: positions(&geometry.coordinates)?,
        },
        "Polygon" => {
            let outer = geometry
                .coordinates
                .get(0)
                .ok_or("polygon has no rings")?;
            let mut ring = positions(outer)?;
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            Geometry::Polygon { positions: ring }
        }
        other => return Err(format!("unsupported geometry type '{}'", other)),
    };

    let props = feature.properties;
    let zone = props
        .zone
        .as_deref()
        .and_then(ZoneType::parse)
        .unwrap_or(options.default_zone);

    let mut shape = Shape::new(zone, geometry).with_data(ZoneData::from_json_value(props.data));
    shape.label = props.name.filter(|n| !n.is_empty() && n != zone.name());
    if let Some(created_at) = props.created_at {
        shape.created_at = created_at;
    }
    shape.validate().map_err(|e| e.to_string())?;
    Ok(shape)
}
