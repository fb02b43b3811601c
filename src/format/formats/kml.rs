//! KML format implementation.
//!
//! Read-only: placemarks from any `Document` or `Folder` become shapes.
//! Zone type, data payload and creation time are picked up from
//! `ExtendedData` when present.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::format::error::FormatError;
use crate::format::traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportResult, ZoneFormat,
};
use crate::model::{Coordinate, Geometry, Project, Shape, ZoneData, ZoneType};

/// KML 2.2 format.
pub struct KmlFormat;

impl ZoneFormat for KmlFormat {
    fn id(&self) -> &'static str {
        "kml"
    }

    fn display_name(&self) -> &'static str {
        "KML"
    }

    fn extensions(&self) -> &[&'static str] {
        &["kml"]
    }

    fn export(
        &self,
        _project: &Project,
        _options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        Err(FormatError::UnsupportedFormat(format!(
            "{} export",
            self.display_name()
        )))
    }

    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportResult, FormatError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| FormatError::invalid_format("KML file is not valid UTF-8"))?;
        let placemarks = parse_placemarks(text)?;

        let mut result = ImportResult::default();
        for (index, placemark) in placemarks.into_iter().enumerate() {
            match placemark.into_shape(options) {
                Ok(shape) => result.shapes.push(shape),
                Err(message) => result.warnings.push(FormatWarning::new(format!(
                    "Skipped placemark {}: {}",
                    index, message
                ))),
            }
        }

        log::info!(
            "Read {} shapes from KML ({} placemarks skipped)",
            result.shapes.len(),
            result.warnings.len()
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryTag {
    Point,
    LineString,
    Polygon,
}

/// Fields collected from one `Placemark` element.
#[derive(Debug, Default)]
struct Placemark {
    name: Option<String>,
    zone: Option<String>,
    data: Option<String>,
    created_at: Option<String>,
    geometry: Option<(GeometryTag, String)>,
}

impl Placemark {
    fn into_shape(self, options: &ImportOptions) -> Result<Shape, String> {
        let (tag, text) = self.geometry.ok_or("placemark has no supported geometry")?;
        let mut positions = parse_coordinates(&text)?;
        let geometry = match tag {
            GeometryTag::Point => Geometry::Point {
                position: positions.first().copied().ok_or("point has no coordinates")?,
            },
            GeometryTag::LineString => Geometry::Line { positions },
            GeometryTag::Polygon => {
                if positions.len() > 1 && positions.first() == positions.last() {
                    positions.pop();
                }
                Geometry::Polygon { positions }
            }
        };

        let zone = self
            .zone
            .as_deref()
            .and_then(ZoneType::parse)
            .unwrap_or(options.default_zone);
        let data = match self.data {
            Some(json) => ZoneData::from_json_value(
                serde_json::from_str(&json).map_err(|e| format!("invalid data payload: {}", e))?,
            ),
            None => ZoneData::None,
        };

        let mut shape = Shape::new(zone, geometry).with_data(data);
        shape.label = self.name.filter(|n| !n.is_empty() && n != zone.name());
        if let Some(created_at) = self
            .created_at
            .and_then(|t| chrono::DateTime::parse_from_rfc3339(&t).ok())
        {
            shape.created_at = created_at.with_timezone(&chrono::Utc);
        }
        shape.validate().map_err(|e| e.to_string())?;
        Ok(shape)
    }
}

/// Parse whitespace-separated `lon,lat[,alt]` tuples.
fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>, String> {
    text.split_whitespace()
        .map(|tuple| {
            let mut parts = tuple.split(',');
            let lon = parts.next().and_then(|v| v.parse::<f64>().ok());
            let lat = parts.next().and_then(|v| v.parse::<f64>().ok());
            match (lat, lon) {
                (Some(lat), Some(lon)) => Coordinate::try_new(lat, lon).map_err(|e| e.to_string()),
                _ => Err(format!("invalid coordinate tuple '{}'", tuple)),
            }
        })
        .collect()
}

/// Walk the document and collect every placemark.
fn parse_placemarks(text: &str) -> Result<Vec<Placemark>, FormatError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut placemarks = Vec::new();
    let mut current: Option<Placemark> = None;
    // Element path from the root, local names only
    let mut path: Vec<String> = Vec::new();
    let mut data_key: Option<String> = None;
    let mut saw_kml = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "kml" => saw_kml = true,
                    "Placemark" => current = Some(Placemark::default()),
                    "Data" => {
                        data_key = e
                            .attributes()
                            .flatten()
                            .find(|a| a.key.local_name().as_ref() == b"name")
                            .map(|a| String::from_utf8_lossy(&a.value).to_string());
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "Placemark" => placemarks.extend(current.take()),
                    "Data" => data_key = None,
                    _ => {}
                }
                path.pop();
            }
            Event::Text(ref e) => {
                let Some(placemark) = current.as_mut() else {
                    continue;
                };
                let value = e.unescape()?.to_string();
                let parent = path.len().checked_sub(2).and_then(|i| path.get(i));
                match (path.last().map(String::as_str), parent.map(String::as_str)) {
                    (Some("name"), Some("Placemark")) => placemark.name = Some(value),
                    (Some("value"), Some("Data")) => match data_key.as_deref() {
                        Some("type") => placemark.zone = Some(value),
                        Some("data") => placemark.data = Some(value),
                        Some("createdAt") => placemark.created_at = Some(value),
                        _ => {}
                    },
                    (Some("coordinates"), _) if placemark.geometry.is_none() => {
                        let tag = if path.iter().any(|p| p == "Polygon") {
                            // inner rings are holes
                            path.iter()
                                .any(|p| p == "outerBoundaryIs")
                                .then_some(GeometryTag::Polygon)
                        } else if path.iter().any(|p| p == "LineString") {
                            Some(GeometryTag::LineString)
                        } else if path.iter().any(|p| p == "Point") {
                            Some(GeometryTag::Point)
                        } else {
                            None
                        };
                        placemark.geometry = tag.map(|t| (t, value));
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_kml {
        return Err(FormatError::invalid_format("missing <kml> root element"));
    }
    Ok(placemarks)
}
