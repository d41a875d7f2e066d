use thiserror::Error;

use crate::element::ElementId;

/// Errors that can occur while editing the canvas
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Uploaded bytes are not a readable image
    #[error("Failed to decode image `{name}`: {reason}")]
    DecodeFailure { name: String, reason: String },

    /// The decode job went away before reporting a result
    #[error("Image decode was cancelled")]
    DecodeCancelled,

    /// An operation referenced a position outside the element list
    #[error("Element index {index} out of range (len: {len})")]
    InvalidIndex { index: usize, len: usize },

    /// An operation referenced an element that no longer exists
    #[error("No element with id {0}")]
    ElementNotFound(ElementId),

    #[error("Failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
