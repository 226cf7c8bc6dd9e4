use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while moving the drawing to or from disk
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to open {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    /// A file dialog was dismissed. Callers treat this as a no-op.
    #[error("Cancelled by user")]
    UserCancelled,
}

impl FileError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;
