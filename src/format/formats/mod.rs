//! Zone format implementations.

mod csv;
mod geojson;
mod json;
mod kml;

#[cfg(test)]
mod tests;

pub use csv::{CSV_HEADER, CsvFormat};
pub use geojson::GeoJsonFormat;
pub use json::StructuredJsonFormat;
pub use kml::KmlFormat;
