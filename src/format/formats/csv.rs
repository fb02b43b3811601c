//! Tabular CSV format.
//!
//! Export writes one summary row per shape:
//!
//! ```text
//! Zone Name,Type,Area (km²),Perimeter (km),Color,Created Date,Data
//! ```
//!
//! Every field is quoted and embedded quotes are doubled. Area is filled for
//! polygons, rectangles and circles. Perimeter is the boundary length for
//! those, the path length for lines, and empty for points. `Data` holds the
//! zone payload as compact JSON.
//!
//! Import reads point rows from any CSV with `latitude`/`longitude` columns
//! (`lat`/`lon`/`lng` also accepted) and optional `name` and `type` columns.

use chrono::{DateTime, Utc};

use crate::format::error::FormatError;
use crate::format::traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportResult, ZoneFormat,
};
use crate::model::{Coordinate, Geometry, Project, Shape, ZoneData, ZoneType};

/// Header row of the tabular export.
pub const CSV_HEADER: [&str; 7] = [
    "Zone Name",
    "Type",
    "Area (km²)",
    "Perimeter (km)",
    "Color",
    "Created Date",
    "Data",
];

/// Tabular summary format.
pub struct CsvFormat;

impl ZoneFormat for CsvFormat {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn display_name(&self) -> &'static str {
        "Zone summary (CSV)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn export(
        &self,
        project: &Project,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let shapes = options.select(project);

        let mut out = String::new();
        out.push_str(&record(CSV_HEADER));
        for shape in &shapes {
            out.push_str(&record(summary_row(shape)));
        }

        log::info!("Exported {} rows as CSV", shapes.len());
        Ok(ExportResult::new(out.into_bytes(), shapes.len()))
    }

    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportResult, FormatError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| FormatError::invalid_format("CSV file is not valid UTF-8"))?;
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header: Vec<String> = lines
            .next()
            .map(split_record)
            .ok_or_else(|| FormatError::invalid_format("CSV file is empty"))?
            .into_iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let column = |names: &[&str]| header.iter().position(|h| names.contains(&h.as_str()));

        let lat_col =
            column(&["latitude", "lat"]).ok_or_else(|| FormatError::missing_field("latitude"))?;
        let lon_col = column(&["longitude", "lon", "lng"])
            .ok_or_else(|| FormatError::missing_field("longitude"))?;
        let name_col = column(&["name", "label", "zone name"]);
        let type_col = column(&["type", "zone", "zone type"]);

        let mut result = ImportResult::default();
        for (row, line) in lines.enumerate() {
            let fields = split_record(line);
            let field = |col: usize| fields.get(col).map(|f| f.trim()).unwrap_or("");

            let position = field(lat_col)
                .parse::<f64>()
                .ok()
                .zip(field(lon_col).parse::<f64>().ok())
                .and_then(|(lat, lon)| Coordinate::try_new(lat, lon).ok());
            let Some(position) = position else {
                result.warnings.push(FormatWarning::new(format!(
                    "Skipped row {}: invalid coordinates",
                    row + 2
                )));
                continue;
            };

            let zone = type_col
                .and_then(|c| ZoneType::parse(field(c)))
                .unwrap_or(options.default_zone);
            let mut shape = Shape::new(zone, Geometry::Point { position });
            if let Some(name) = name_col.map(field).filter(|n| !n.is_empty()) {
                shape.label = Some(name.to_string());
            }
            result.shapes.push(shape);
        }

        log::info!(
            "Read {} points from CSV ({} rows skipped)",
            result.shapes.len(),
            result.warnings.len()
        );
        Ok(result)
    }
}

fn summary_row(shape: &Shape) -> [String; 7] {
    let geometry = &shape.geometry;
    let area = geometry.area_km2().map(km).unwrap_or_default();
    let perimeter = geometry
        .perimeter_km()
        .or_else(|| geometry.length_km())
        .map(km)
        .unwrap_or_default();

    [
        shape.display_name().to_string(),
        shape.zone.name().to_string(),
        area,
        perimeter,
        shape.zone.color_hex(),
        created_date(&shape.created_at),
        data_json(&shape.data),
    ]
}

fn km(value: f64) -> String {
    format!("{:.4}", value)
}

fn created_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn data_json(data: &ZoneData) -> String {
    data.to_json_value().to_string()
}

/// Quote every field, doubling embedded quotes, and end the line.
fn record<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> String {
    let mut line = fields
        .into_iter()
        .map(|f| format!("\"{}\"", f.as_ref().replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Split one CSV line, honouring quoted fields and doubled quotes.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
