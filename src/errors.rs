use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the outline segmentation application.
///
/// # Why structured errors
///
/// Each variant captures context specific to its error domain (parameters, image
/// interpretation, filesystem, encoding), providing detailed diagnostic information
/// without requiring callers to parse error strings. The thiserror crate generates
/// Display implementations automatically from format strings, reducing boilerplate
/// while maintaining type safety.
///
/// An empty dataset is deliberately NOT an error: the batch driver reports it as a
/// skip and moves on to the next dataset.
#[derive(Error, Debug)]
pub enum OutlineSegError {
    #[error("Invalid parameter: {field} {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Invalid image: {path}: {reason}")]
    InvalidImage { path: String, reason: String },

    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing error: {operation} failed (file: {path})")]
    ImageProcessing {
        path: String,
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, OutlineSegError>;

/// Convert I/O errors to filesystem errors.
///
/// # Why default values for context
///
/// Some I/O errors occur without specific path/operation context. Rather than
/// requiring all callsites to wrap errors manually, this conversion provides
/// a fallback. Code that has context should construct OutlineSegError::FileSystem
/// directly with the specific path and operation.
impl From<std::io::Error> for OutlineSegError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("unknown"),
            operation: "unknown".to_string(),
            source: err,
        }
    }
}

/// Convert image crate errors to image processing errors.
impl From<image::ImageError> for OutlineSegError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageProcessing {
            path: "unknown".to_string(),
            operation: "image processing".to_string(),
            source: Box::new(err),
        }
    }
}
