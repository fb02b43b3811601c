//! Import parsing collaborator.
//!
//! The gateway hands an [`ImportFile`] to a [`ShapeParser`] and only merges
//! the result into the store when parsing succeeds. [`DefaultShapeParser`]
//! picks one of the registered formats by extension and, for ambiguous or
//! missing extensions, by sniffing the content.

use std::path::Path;

use crate::format::error::FormatError;
use crate::format::registry::FormatRegistry;
use crate::format::traits::{FormatWarning, ImportOptions, ZoneFormat};
use crate::model::Shape;

/// A file offered for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// File name, used to pick a parser
    pub name: String,
    /// Raw contents
    pub bytes: Vec<u8>,
}

impl ImportFile {
    /// Create an import file from a name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> Result<Self, FormatError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// Lowercase extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Successfully parsed shapes.
#[derive(Debug, Clone, Default)]
pub struct ParsedShapes {
    /// Normalized shapes ready to merge
    pub shapes: Vec<Shape>,
    /// Optional human-readable note (e.g. skipped features)
    pub message: Option<String>,
}

/// Turns raw files into shapes.
pub trait ShapeParser {
    /// Parse a file. Errors carry the parser's own message.
    fn parse(&self, file: &ImportFile) -> Result<ParsedShapes, FormatError>;
}

/// Parser backed by the built-in formats.
#[derive(Debug, Default)]
pub struct DefaultShapeParser {
    registry: FormatRegistry,
    options: ImportOptions,
}

impl DefaultShapeParser {
    /// Create a parser with default import options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given import options.
    pub fn with_options(options: ImportOptions) -> Self {
        Self {
            registry: FormatRegistry::new(),
            options,
        }
    }

    /// Pick the format for a file: by registered extension first, then by content.
    pub fn detect(&self, file: &ImportFile) -> Option<&dyn ZoneFormat> {
        let by_extension = match file.extension() {
            Some(ext) if ext == "json" && looks_like_geojson(&file.bytes) => {
                self.registry.get("geojson")
            }
            Some(ext) => self.registry.by_extension(&ext).into_iter().next(),
            None => None,
        };
        by_extension.or_else(|| self.registry.get(sniff(&file.bytes)?))
    }
}

impl ShapeParser for DefaultShapeParser {
    fn parse(&self, file: &ImportFile) -> Result<ParsedShapes, FormatError> {
        let format = self
            .detect(file)
            .ok_or_else(|| FormatError::UnsupportedFormat(file.name.clone()))?;
        log::debug!("Parsing {} as {}", file.name, format.display_name());

        let result = format
            .import(&file.bytes, &self.options)
            .map_err(|e| FormatError::parse(&file.name, e))?;
        if result.shapes.is_empty() {
            return Err(FormatError::parse(&file.name, "no shapes found"));
        }

        Ok(ParsedShapes {
            message: summarize(&result.warnings),
            shapes: result.shapes,
        })
    }
}

fn summarize(warnings: &[FormatWarning]) -> Option<String> {
    match warnings {
        [] => None,
        [only] => Some(only.message.clone()),
        [first, rest @ ..] => Some(format!("{} (and {} more)", first.message, rest.len())),
    }
}

fn first_non_space(bytes: &[u8]) -> Option<u8> {
    bytes.iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn looks_like_geojson(bytes: &[u8]) -> bool {
    // A FeatureCollection or Feature has a top-level "type"; the structured export never does.
    serde_json::from_slice::<serde_json::Value>(bytes).is_ok_and(|v| {
        matches!(
            v.get("type").and_then(|t| t.as_str()),
            Some("FeatureCollection" | "Feature")
        )
    })
}

fn sniff(bytes: &[u8]) -> Option<&'static str> {
    match first_non_space(bytes)? {
        b'<' => Some("kml"),
        b'{' if looks_like_geojson(bytes) => Some("geojson"),
        b'{' => Some("json"),
        _ => Some("csv"),
    }
}
