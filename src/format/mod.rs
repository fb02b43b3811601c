//! Zone import/export.
//!
//! Formats implement [`ZoneFormat`] and are looked up through the
//! [`FormatRegistry`]. The [`ImportExportGateway`] ties them to the shape
//! store: exports read a project snapshot, imports go through a
//! [`ShapeParser`] and land in the store as one undoable step.
//!
//! ## Supported Formats
//!
//! - **Structured JSON**: project metadata, shapes, research data and
//!   comments; lossless
//! - **GeoJSON**: `FeatureCollection`; circles become center points
//! - **CSV**: one summary row per zone with area and perimeter; imports
//!   point rows with latitude/longitude columns
//! - **KML**: import of placemarks only
//!
//! ## Usage
//!
//! ```rust,ignore
//! use msp_zones::format::{ExportOptions, ImportExportGateway};
//!
//! let gateway = ImportExportGateway::new();
//! let result = gateway.export(&project, "geojson", &ExportOptions::default())?;
//! for warning in &result.warnings {
//!     eprintln!("{}", warning.message);
//! }
//! ```

mod document;
mod error;
pub mod formats;
mod gateway;
mod import;
mod registry;
mod report;
mod traits;

pub use document::{ExportDocument, ProjectMetadata};
pub use error::FormatError;
pub use gateway::{ImportExportGateway, ImportSummary, read_project};
pub use import::{DefaultShapeParser, ImportFile, ParsedShapes, ShapeParser};
pub use registry::{FormatRegistry, NATIVE_FORMAT_ID};
pub use report::{ReportInput, ReportRenderer, ReportStatistics, TextReportRenderer, ZoneDetail};
pub use traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportResult, ZoneFormat,
};
