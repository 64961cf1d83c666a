//! Error types for the chromasom colour-clustering engine.

use thiserror::Error;

/// The main error type for chromasom operations.
///
/// The training loop itself never fails; these variants cover the
/// boundary (configuration, sample colours) and the CLI's I/O.
#[derive(Error, Debug)]
pub enum ChromaError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input where at least one element is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A colour string that is neither a preset name nor a hex triplet.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Image encoding error.
    #[error("Image error: {0}")]
    Image(String),
}

/// Result type alias for chromasom operations.
pub type Result<T> = std::result::Result<T, ChromaError>;

impl From<serde_json::Error> for ChromaError {
    fn from(err: serde_json::Error) -> Self {
        ChromaError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for ChromaError {
    fn from(err: image::ImageError) -> Self {
        ChromaError::Image(err.to_string())
    }
}
