//! Structured JSON format.
//!
//! Writes an [`ExportDocument`]: project metadata, every shape verbatim,
//! research data and comments. Reading it back yields shapes equal field
//! for field to the ones written, circles included.

use crate::format::document::ExportDocument;
use crate::format::error::FormatError;
use crate::format::traits::{ExportOptions, ExportResult, ImportOptions, ImportResult, ZoneFormat};
use crate::model::Project;

/// Lossless structured JSON format.
pub struct StructuredJsonFormat;

impl StructuredJsonFormat {
    /// Decode a whole document, for callers that need more than the shapes.
    pub fn read_document(bytes: &[u8]) -> Result<ExportDocument, FormatError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl ZoneFormat for StructuredJsonFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "Project (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn export(
        &self,
        project: &Project,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let shapes: Vec<_> = options.select(project).into_iter().cloned().collect();
        let count = shapes.len();
        let document = ExportDocument::new(project, shapes);

        let bytes = if options.compact {
            serde_json::to_vec(&document)?
        } else {
            serde_json::to_vec_pretty(&document)?
        };

        log::info!("Exported {} shapes as structured JSON", count);
        Ok(ExportResult::new(bytes, count))
    }

    fn import(&self, bytes: &[u8], _options: &ImportOptions) -> Result<ImportResult, FormatError> {
        let document = Self::read_document(bytes)?;
        log::info!(
            "Read {} shapes from structured JSON export of '{}'",
            document.shapes.len(),
            document.project.name
        );
        Ok(ImportResult {
            shapes: document.shapes,
            warnings: Vec::new(),
        })
    }
}
