//! Run configuration.
//!
//! Everything a sort run needs is taken from the command line. The folder
//! naming scheme is fixed:
//!
//! ```text
//! <target>/
//!   Folders/        every loose subfolder
//!   TXT Files/      every loose *.txt file
//!   MD Files/       every loose *.md file
//!    Files/         loose files without an extension
//! ```

use std::path::{Path, PathBuf};

/// Name of the folder that collects every loose subfolder.
pub const AGGREGATION_FOLDER_NAME: &str = "Folders";

/// Suffix appended to the uppercased extension to name an extension folder.
pub const EXTENSION_FOLDER_SUFFIX: &str = " Files";

/// Bytes read per chunk when hashing a file.
pub const DEFAULT_HASH_CHUNK_SIZE: usize = 4096;

/// Settings for a single sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// The directory whose immediate entries are organized.
    pub target: PathBuf,
    /// Run the duplicate scan after moving.
    pub remove_duplicates: bool,
    /// Chunk size used by the content hasher.
    pub hash_chunk_size: usize,
}

impl SortConfig {
    /// Creates a configuration for `target` with duplicate removal disabled.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            remove_duplicates: false,
            hash_chunk_size: DEFAULT_HASH_CHUNK_SIZE,
        }
    }

    /// Enables or disables the duplicate scan.
    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.remove_duplicates = remove_duplicates;
        self
    }
}

/// Path of the aggregation folder inside `target`.
pub fn aggregation_folder_in(target: &Path) -> PathBuf {
    target.join(AGGREGATION_FOLDER_NAME)
}
