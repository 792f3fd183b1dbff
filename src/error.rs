//! Error types for antml.

use thiserror::Error;

/// antml error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Filter element could not be built
    #[error("Filter error: {0}")]
    Filter(#[from] crate::pipeline::filter::FilterError),

    /// Encoded shape could not be parsed
    #[error("Shape error: {0}")]
    Shape(#[from] crate::pipeline::shape::ShapeError),

    /// Unknown tensor element type
    #[error("Tensor type error: {0}")]
    TensorType(#[from] crate::pipeline::tensor_type::TensorTypeError),

    /// Buffer reduction error
    #[error("Buffer error: {0}")]
    Buffer(#[from] crate::pipeline::buffer::BufferError),

    /// Download or extraction error
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    /// Model resolution error
    #[error("Model resolution error: {0}")]
    ModelResolution(#[from] crate::model::resolver::ModelResolutionError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for antml operations.
pub type Result<T> = std::result::Result<T, Error>;
