use thiserror::Error;

use crate::boxes::BoxFormat;

/// The main error type for bounding box operations.
#[derive(Debug, Error)]
pub enum BBoxError {
    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid {format} coordinates: {message}")]
    InvalidCoordinates { format: BoxFormat, message: String },

    #[error("{format} box is out of bounds: {message}")]
    OutOfBounds { format: BoxFormat, message: String },

    #[error("{format} {operation} requires `image_size`, but none was given")]
    MissingContext {
        format: BoxFormat,
        operation: &'static str,
    },

    #[error("Shape mismatch: {message}")]
    Shape { message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BBoxError {
    pub(crate) fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}
