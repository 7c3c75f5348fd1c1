//! Error types for the organizer.

use thiserror::Error;

/// Main error type for the organizer binary and library.
#[derive(Debug, Error)]
pub enum OrganizerError {
    /// Engine-level failure (configuration, structural).
    #[error(transparent)]
    Engine(#[from] coursemap_engine::EngineError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Extraction or catalog JSON could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The extraction file is structurally invalid.
    #[error("Invalid extraction: {0}")]
    InvalidInput(String),
}

/// Result type alias for organizer operations.
pub type Result<T> = std::result::Result<T, OrganizerError>;
