//! Format registry for discovering and accessing zone formats.

use std::collections::HashMap;

use crate::format::formats::{CsvFormat, GeoJsonFormat, KmlFormat, StructuredJsonFormat};
use crate::format::traits::ZoneFormat;

/// Id of the lossless structured JSON format.
pub const NATIVE_FORMAT_ID: &str = "json";

/// Registry of available zone formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn ZoneFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(StructuredJsonFormat));
        registry.register(Box::new(GeoJsonFormat));
        registry.register(Box::new(CsvFormat));
        registry.register(Box::new(KmlFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn ZoneFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn ZoneFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find formats by file extension.
    pub fn by_extension(&self, ext: &str) -> Vec<&dyn ZoneFormat> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.formats
            .values()
            .filter(|f| f.extensions().contains(&ext.as_str()))
            .map(|f| f.as_ref())
            .collect()
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.ids(), vec!["csv", "geojson", "json", "kml"]);
    }

    #[test]
    fn test_native_format() {
        let registry = FormatRegistry::new();
        let native = registry.get(NATIVE_FORMAT_ID).unwrap();
        assert_eq!(native.extensions(), &["json"]);
    }

    #[test]
    fn test_by_extension() {
        let registry = FormatRegistry::new();
        let found = registry.by_extension(".GeoJSON");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "geojson");
        assert!(registry.by_extension("shp").is_empty());
    }
}
