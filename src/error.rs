use std::path::PathBuf;
use thiserror::Error;

use crate::model::CableId;

/// Main error type for the cablelabels application
#[derive(Error, Debug)]
pub enum LabelError {
    /// Malformed label template, rejected at compile time
    #[error("Invalid label template: {detail}")]
    TemplateSyntax { detail: String },

    /// Template evaluation failed against actual cable data
    #[error("Template rendering failed: {detail}")]
    TemplateRender { detail: String },

    /// Batch label generation failed for a specific cable
    #[error("Error while generating label for cable {cable}: {source}")]
    Generate {
        cable: String,
        #[source]
        source: Box<LabelError>,
    },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Cable not found in the store
    #[error("Cable not found: {id}")]
    CableNotFound { id: CableId },

    /// Operation requires a persisted cable identifier
    #[error("Cable has no identifier yet")]
    MissingIdentifier,

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool and other storage-level errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for cablelabels operations
pub type Result<T> = std::result::Result<T, LabelError>;
