//! Read-only scan of the target directory.
//!
//! The classifier lists the target's immediate entries once and splits them
//! into loose files, loose folders and entries that are already organized.
//! The result is a [`Classification`] record handed to the mover; nothing on
//! disk is touched here.

use crate::config::aggregation_folder_in;
use crate::error::{SortError, SortResult};
use crate::extension::{ExtensionKey, is_extension_folder_name};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file directly inside the target directory, waiting to be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseFile {
    /// Current location of the file.
    pub path: PathBuf,
    /// Key of the extension folder the file belongs in.
    pub key: ExtensionKey,
}

/// Why an entry of the target directory is left where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The `Folders` aggregation folder itself.
    AggregationFolder,
    /// A `"<EXT> Files"` folder from an earlier run.
    ExtensionFolder,
    /// A symlink, socket or other entry that is neither a file nor a directory.
    NotRegular,
}

/// An entry the classifier decided not to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of scanning a target directory.
///
/// The extension mapping is fixed here and is not recomputed while moving.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The directory that was scanned.
    pub target: PathBuf,
    /// Where loose folders will be collected.
    pub aggregation_folder: PathBuf,
    /// Loose files, ordered by file name.
    pub loose_files: Vec<LooseFile>,
    /// Loose folders, ordered by folder name.
    pub loose_folders: Vec<PathBuf>,
    /// Destination folder for every extension key seen among loose files.
    pub extension_folders: BTreeMap<ExtensionKey, PathBuf>,
    /// Entries left in place.
    pub skipped: Vec<SkippedEntry>,
}

impl Classification {
    /// Number of moves the mover will perform.
    pub fn pending_moves(&self) -> usize {
        self.loose_files.len() + self.loose_folders.len()
    }

    /// Returns true if there is nothing to move.
    pub fn is_empty(&self) -> bool {
        self.pending_moves() == 0
    }

    /// Destination folder for a key, if any loose file had that key.
    pub fn extension_folder(&self, key: &ExtensionKey) -> Option<&Path> {
        self.extension_folders.get(key).map(PathBuf::as_path)
    }
}

/// Scans target directories.
pub struct Classifier;

impl Classifier {
    /// Lists the immediate entries of `target` and classifies them.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::InvalidTarget`] if `target` does not exist or is
    /// not a directory, and [`SortError::ReadDirFailed`] if it cannot be listed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::classifier::Classifier;
    /// use std::path::Path;
    ///
    /// let classification = Classifier::scan(Path::new("/home/user/Downloads"))?;
    /// println!("{} entries to move", classification.pending_moves());
    /// # Ok::<(), dirsort::SortError>(())
    /// ```
    pub fn scan(target: &Path) -> SortResult<Classification> {
        validate_target(target)?;

        let aggregation_folder = aggregation_folder_in(target);
        let entries = fs::read_dir(target).map_err(|error| SortError::ReadDirFailed {
            path: target.to_path_buf(),
            error,
        })?;

        let mut loose_files = Vec::new();
        let mut loose_folders = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|error| SortError::ReadDirFailed {
                path: target.to_path_buf(),
                error,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|error| SortError::ReadDirFailed {
                path: path.clone(),
                error,
            })?;

            if file_type.is_file() {
                let key = ExtensionKey::from_path(&path);
                debug!(path = %path.display(), key = %key, "loose file");
                loose_files.push(LooseFile { path, key });
            } else if file_type.is_dir() {
                if path == aggregation_folder {
                    skipped.push(SkippedEntry {
                        path,
                        reason: SkipReason::AggregationFolder,
                    });
                } else if is_extension_folder_name(&entry.file_name().to_string_lossy()) {
                    debug!(path = %path.display(), "already organized");
                    skipped.push(SkippedEntry {
                        path,
                        reason: SkipReason::ExtensionFolder,
                    });
                } else {
                    debug!(path = %path.display(), "loose folder");
                    loose_folders.push(path);
                }
            } else {
                warn!(path = %path.display(), "skipping entry that is not a regular file or directory");
                skipped.push(SkippedEntry {
                    path,
                    reason: SkipReason::NotRegular,
                });
            }
        }

        loose_files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        loose_folders.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let extension_folders: BTreeMap<ExtensionKey, PathBuf> = loose_files
            .iter()
            .map(|file| (file.key.clone(), target.join(file.key.folder_name())))
            .collect();

        info!(
            dir = %target.display(),
            files = loose_files.len(),
            folders = loose_folders.len(),
            skipped = skipped.len(),
            "classified target directory"
        );

        Ok(Classification {
            target: target.to_path_buf(),
            aggregation_folder,
            loose_files,
            loose_folders,
            extension_folders,
            skipped,
        })
    }
}

/// Checks that `target` exists and is a directory.
pub fn validate_target(target: &Path) -> SortResult<()> {
    let metadata = fs::metadata(target).map_err(|e| SortError::InvalidTarget {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(SortError::InvalidTarget {
            path: target.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}
