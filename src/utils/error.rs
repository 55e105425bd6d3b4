//! Error types for the metadata remover.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Variants fall into two groups: batch-fatal errors abort a run before any file
//! is touched, everything else is isolated to the file that produced it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the metadata remover.
///
/// All errors in the crate are converted to this type before being handed to
/// the caller or recorded in a [`crate::core::FileOutcome`].
#[derive(Error, Debug)]
pub enum RemoverError {
    /// Input or output folder was left blank
    #[error("Please select input and output folders: {0}")]
    MissingFolder(String),

    /// Input folder does not exist on disk
    #[error("Input folder does not exist: {0}")]
    InputFolderNotFound(PathBuf),

    /// Directory handed to the file selector does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Source bytes could not be parsed as a supported raster format
    #[error("Unreadable image: {0}")]
    UnreadableImage(String),

    /// Output extension maps to no known encoder
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Encode parameter outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Encoder rejected an otherwise valid pixel buffer
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Encoded output still carries a metadata container
    #[error("Residual metadata: {0}")]
    ResidualMetadata(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Worker task panicked or could not be scheduled
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for remover operations.
pub type RemoverResult<T> = Result<T, RemoverError>;

impl RemoverError {
    pub fn missing_folder<T: Into<String>>(msg: T) -> Self {
        Self::MissingFolder(msg.into())
    }

    pub fn unreadable<T: Into<String>>(msg: T) -> Self {
        Self::UnreadableImage(msg.into())
    }

    pub fn unsupported<T: Into<String>>(msg: T) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn invalid_parameter<T: Into<String>>(msg: T) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn encoding<T: Into<String>>(msg: T) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn residual<T: Into<String>>(msg: T) -> Self {
        Self::ResidualMetadata(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    /// Returns `true` for errors that abort the whole batch rather than a single file.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingFolder(_) | Self::InputFolderNotFound(_) | Self::DirectoryNotFound(_)
        )
    }
}

// Convert std::io::Error to RemoverError
impl From<io::Error> for RemoverError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert image::ImageError to RemoverError
impl From<image::ImageError> for RemoverError {
    fn from(err: image::ImageError) -> Self {
        use image::ImageError;

        match err {
            ImageError::IoError(e) => Self::IO(e.to_string()),
            ImageError::Decoding(e) => Self::UnreadableImage(e.to_string()),
            ImageError::Limits(e) => Self::UnreadableImage(e.to_string()),
            ImageError::Unsupported(e) => Self::UnsupportedFormat(e.to_string()),
            ImageError::Parameter(e) => Self::InvalidParameter(e.to_string()),
            ImageError::Encoding(e) => Self::Encoding(e.to_string()),
        }
    }
}
