//! Error types for import/export operations.

use thiserror::Error;

use crate::model::ValidationError;

/// Errors that can occur during import and export.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid format structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Required field or column is missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// No format registered under this id or extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Parser failure, with the parser's own message
    #[error("Could not parse {file}: {message}")]
    Parse {
        /// Name of the file being parsed
        file: String,
        /// Parser error text
        message: String,
    },

    /// Parsed shapes failed validation
    #[error("Invalid shape: {0}")]
    Validation(#[from] ValidationError),
}

impl FormatError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a parse error for a named file.
    pub fn parse(file: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.to_string(),
        }
    }
}
