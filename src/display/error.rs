use thiserror::Error;

/// Errors raised while decorating geometry or building visualization sets
#[derive(Debug, Error)]
pub enum DisplayError {
    /// A display value outside its declared domain (negative width, unknown line type, ...)
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// An analytical object lacks data required for one of its elements
    #[error("Translation error: {0}")]
    Translation(String),

    /// Two groups of a visualization set share a name
    #[error("Duplicate group: {0}")]
    DuplicateGroup(String),

    /// Group or set identifier that cannot be used
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Data sets that do not line up with the geometry they color
    #[error("Data mismatch: {0}")]
    DataMismatch(String),

    /// Malformed geometry (bad mesh faces, non-positive text height, ...)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration error (malformed registry, unusable property values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Type alias for Results using DisplayError
pub type Result<T> = std::result::Result<T, DisplayError>;
