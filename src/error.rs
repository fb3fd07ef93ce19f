//! Error types shared by the classifier, mover and deduplicator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while sorting a directory.
///
/// Every filesystem failure carries the path(s) involved so the caller can
/// tell which entry stopped the run. Nothing is retried.
#[derive(Debug, Error)]
pub enum SortError {
    /// The target path is missing or is not a directory.
    #[error("Invalid target directory {}: {reason}", path.display())]
    InvalidTarget { path: PathBuf, reason: String },

    /// Listing the target directory (or an extension folder) failed.
    #[error("Failed to read directory {}: {error}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// Creating an extension folder or the aggregation folder failed.
    #[error("Failed to create directory {}: {error}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// Renaming an entry into its destination folder failed.
    #[error("Failed to move {} to {}: {error}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: io::Error,
    },

    /// The entry has no final path component to carry over.
    #[error("Path has no file name component: {}", path.display())]
    InvalidFileName { path: PathBuf },

    /// Reading a file for its content hash failed.
    #[error("Failed to hash {}: {error}", path.display())]
    HashFailed {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// Unlinking a duplicate failed.
    #[error("Failed to delete {}: {error}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// The confirmation prompt could not read an answer.
    #[error("Failed to read confirmation response: {error}")]
    PromptFailed {
        #[source]
        error: io::Error,
    },
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;
