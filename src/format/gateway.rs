//! Bridge between the shape store and external files.

use std::path::Path;

use crate::format::document::ExportDocument;
use crate::format::error::FormatError;
use crate::format::import::{DefaultShapeParser, ImportFile, ShapeParser};
use crate::format::registry::FormatRegistry;
use crate::format::report::{ReportInput, ReportRenderer};
use crate::format::traits::{ExportOptions, ExportResult};
use crate::model::{Project, ShapeId};
use crate::store::ShapeStore;

/// Outcome of a successful import.
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Ids of the merged shapes, in file order
    pub ids: Vec<ShapeId>,
    /// Parser note, if any
    pub message: Option<String>,
}

/// Exports project snapshots and merges parsed imports into a [`ShapeStore`].
#[derive(Debug)]
pub struct ImportExportGateway<P: ShapeParser = DefaultShapeParser> {
    registry: FormatRegistry,
    parser: P,
}

impl ImportExportGateway {
    /// Gateway with the built-in formats and parser.
    pub fn new() -> Self {
        Self::with_parser(DefaultShapeParser::new())
    }
}

impl Default for ImportExportGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ShapeParser> ImportExportGateway<P> {
    /// Gateway with a custom parsing collaborator.
    pub fn with_parser(parser: P) -> Self {
        Self {
            registry: FormatRegistry::new(),
            parser,
        }
    }

    /// Registered export formats.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Mutable access to the export formats, for registering extra ones.
    pub fn registry_mut(&mut self) -> &mut FormatRegistry {
        &mut self.registry
    }

    /// Export a project snapshot in the format registered as `format_id`.
    pub fn export(
        &self,
        project: &Project,
        format_id: &str,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let format = self
            .registry
            .get(format_id)
            .ok_or_else(|| FormatError::UnsupportedFormat(format_id.to_string()))?;
        format.export(project, options)
    }

    /// Build report input from a snapshot and hand it to `renderer`.
    pub fn export_report<R: ReportRenderer + ?Sized>(
        &self,
        project: &Project,
        renderer: &R,
    ) -> Result<Vec<u8>, FormatError> {
        let input = ReportInput::from_project(project);
        let bytes = renderer.render(&input)?;
        log::info!(
            "Rendered {} report for '{}' ({} zones)",
            renderer.extension(),
            project.name,
            input.zones.len()
        );
        Ok(bytes)
    }

    /// Parse `file` and merge its shapes into `store` as one undoable step.
    ///
    /// On any failure the store is left untouched and the parser's error is
    /// returned.
    pub fn import(
        &self,
        file: &ImportFile,
        store: &mut ShapeStore,
    ) -> Result<ImportSummary, FormatError> {
        let parsed = match self.parser.parse(file) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!("Import of {} failed: {}", file.name, e);
                return Err(e);
            }
        };

        let ids = store.merge(parsed.shapes)?;
        log::info!("Imported {} shapes from {}", ids.len(), file.name);
        if let Some(message) = &parsed.message {
            log::warn!("{}: {}", file.name, message);
        }

        Ok(ImportSummary {
            ids,
            message: parsed.message,
        })
    }

    /// Export to a file on disk.
    pub fn export_to_path(
        &self,
        project: &Project,
        format_id: &str,
        path: &Path,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let mut result = self.export(project, format_id, options)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &result.bytes)?;
        result.files_created.push(path.to_path_buf());
        log::info!("Wrote {} export to {:?}", format_id, path);
        Ok(result)
    }

    /// Import a file from disk into `store`.
    pub fn import_path(
        &self,
        path: &Path,
        store: &mut ShapeStore,
    ) -> Result<ImportSummary, FormatError> {
        let file = ImportFile::read(path)?;
        self.import(&file, store)
    }
}

/// Read a project from a structured export or a bare project JSON file.
pub fn read_project(bytes: &[u8]) -> Result<Project, FormatError> {
    match serde_json::from_slice::<ExportDocument>(bytes) {
        Ok(document) => Ok(document.into_project()),
        Err(document_err) => serde_json::from_slice::<Project>(bytes)
            .map_err(|_| FormatError::Json(document_err)),
    }
}
