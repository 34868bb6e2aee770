//! Error types for layout generation and dataset persistence

use std::path::PathBuf;

/// Main error type for all collage operations
#[derive(Debug, thiserror::Error)]
pub enum CollageError {
    /// Failed to read the pixel dimensions of a source image
    #[error("Failed to probe image '{}': {source}", path.display())]
    ImageProbe {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Configuration validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No candidate images were available when a run started
    ///
    /// Distinct from a pool that empties during a run, which is a normal stop.
    #[error("No candidate images: {reason}")]
    EmptyPool {
        /// Description of where the candidates were expected
        reason: String,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing the dataset failed; the previous file is left untouched
    #[error("Failed to write dataset '{}': {source}", path.display())]
    DatasetWrite {
        /// Destination of the dataset
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The dataset payload could not be parsed or serialized
    #[error("Malformed dataset payload: {reason}")]
    DatasetFormat {
        /// Description of the problem
        reason: String,
    },
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
