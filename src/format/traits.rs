//! Trait definitions for zone format implementations.

use std::path::PathBuf;

use crate::format::error::FormatError;
use crate::model::{Project, Shape, ShapeId, ZoneType};

/// Trait for zone interchange format implementations.
///
/// Each format (structured JSON, GeoJSON, CSV, KML) converts between a
/// [`Project`] snapshot and the external representation. Export produces
/// bytes so the caller decides where they go.
pub trait ZoneFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "json", "geojson", "csv").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses (e.g., `["geojson"]`).
    fn extensions(&self) -> &[&'static str];

    /// Export the project's shapes. Read-only formats return
    /// [`FormatError::UnsupportedFormat`].
    fn export(&self, project: &Project, options: &ExportOptions)
    -> Result<ExportResult, FormatError>;

    /// Read shapes from raw file contents.
    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportResult, FormatError>;
}

/// Options for export operations.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Write without indentation where the format has any.
    pub compact: bool,

    /// Only export shapes on visible layers.
    pub visible_only: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compact output.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Restrict the export to visible layers.
    pub fn visible_only(mut self, visible_only: bool) -> Self {
        self.visible_only = visible_only;
        self
    }

    /// Shapes of `project` selected by these options, in store order.
    pub fn select<'a>(&self, project: &'a Project) -> Vec<&'a Shape> {
        project
            .shapes
            .iter()
            .filter(|s| !self.visible_only || project.active_layers.contains(&s.zone))
            .collect()
    }
}

/// Options for import operations.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Zone type for features that do not name one.
    pub default_zone: ZoneType,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback zone type.
    pub fn default_zone(mut self, zone: ZoneType) -> Self {
        self.default_zone = zone;
        self
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Encoded file contents.
    pub bytes: Vec<u8>,

    /// Number of shapes exported.
    pub shapes_exported: usize,

    /// Warnings generated during export (e.g., lossy circles).
    pub warnings: Vec<FormatWarning>,

    /// Files written, when exported to disk.
    pub files_created: Vec<PathBuf>,
}

impl ExportResult {
    /// Create an export result around encoded bytes.
    pub fn new(bytes: Vec<u8>, shapes_exported: usize) -> Self {
        Self {
            bytes,
            shapes_exported,
            ..Self::default()
        }
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }
}

/// Result of reading shapes from a file.
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Shapes read, not yet validated against the store.
    pub shapes: Vec<Shape>,

    /// Features that were skipped or altered.
    pub warnings: Vec<FormatWarning>,
}

/// Warning generated during format conversion.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Shape this warning relates to (if applicable).
    pub shape_id: Option<ShapeId>,

    /// Human-readable warning message.
    pub message: String,
}

impl FormatWarning {
    /// Create a warning not tied to a shape.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            shape_id: None,
            message: message.into(),
        }
    }

    /// Set the shape this warning relates to.
    pub fn with_shape(mut self, id: ShapeId) -> Self {
        self.shape_id = Some(id);
        self
    }
}

/// Warning for a circle exported as its center point.
pub(crate) fn circle_dropped(shape: &Shape, format: &str) -> FormatWarning {
    FormatWarning::new(format!(
        "Circle '{}' exported to {} as its center point; radius dropped",
        shape.display_name(),
        format
    ))
    .with_shape(shape.id)
}
