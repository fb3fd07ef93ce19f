//! Duplicate detection by content hash.
//!
//! After the move pass, the files of each extension folder are hashed with
//! MD5. The first file seen with a given digest is kept; every later file
//! with the same digest is queued as a duplicate. Which copy counts as first
//! depends on enumeration order, which is fixed: extension folders in key
//! order, files within a folder in file-name order.
//!
//! Only extension folders are scanned. Whatever was moved into `Folders/` is
//! never inspected.

use crate::classifier::Classification;
use crate::error::{SortError, SortResult};
use crate::output::OutputFormatter;
use crate::prompt::{Prompt, PromptResponse};
use md5::{Digest, Md5};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file whose content matches a file seen earlier in the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFile {
    /// The duplicate, queued for deletion.
    pub path: PathBuf,
    /// Hex MD5 digest shared with the retained file.
    pub digest: String,
    /// The earlier file that is kept.
    pub original: PathBuf,
}

/// Result of hashing the extension folders.
#[derive(Debug, Clone, Default)]
pub struct DuplicateScan {
    /// Number of files hashed.
    pub files_hashed: usize,
    /// Retained representative per digest.
    pub retained: HashMap<String, PathBuf>,
    /// Duplicates in the order they were found.
    pub duplicates: Vec<DuplicateFile>,
}

impl DuplicateScan {
    /// Returns true if no duplicates were found.
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Number of queued duplicates.
    pub fn len(&self) -> usize {
        self.duplicates.len()
    }
}

/// What happened to the duplicates after asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    /// The scan found nothing to delete; no question was asked.
    NoDuplicates,
    /// The user confirmed; this many files were deleted.
    Deleted(usize),
    /// The user declined; this many duplicates were left in place.
    Kept(usize),
}

/// Finds and removes duplicate files.
pub struct Deduplicator;

impl Deduplicator {
    /// Hashes the extension folders of a classification.
    pub fn scan_classification(
        classification: &Classification,
        chunk_size: usize,
    ) -> SortResult<DuplicateScan> {
        let folders: Vec<&Path> = classification
            .extension_folders
            .values()
            .map(PathBuf::as_path)
            .collect();
        Self::scan(&folders, chunk_size)
    }

    /// Hashes the regular files directly inside each of `folders`, in the
    /// order given, and groups them by digest.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::ReadDirFailed`] if a folder cannot be listed and
    /// [`SortError::HashFailed`] if a file cannot be read.
    pub fn scan(folders: &[&Path], chunk_size: usize) -> SortResult<DuplicateScan> {
        let mut files = Vec::new();
        for folder in folders {
            files.extend(list_files(folder)?);
        }

        let progress = OutputFormatter::create_progress_bar(files.len() as u64);
        progress.set_message("hashing");

        let mut scan = DuplicateScan::default();
        for file in files {
            let digest = hash_file(&file, chunk_size)?;
            scan.files_hashed += 1;
            progress.inc(1);

            match scan.retained.get(&digest) {
                Some(original) => {
                    debug!(path = %file.display(), original = %original.display(), "duplicate");
                    scan.duplicates.push(DuplicateFile {
                        path: file,
                        digest,
                        original: original.clone(),
                    });
                }
                None => {
                    scan.retained.insert(digest, file);
                }
            }
        }
        progress.finish_and_clear();

        info!(
            hashed = scan.files_hashed,
            duplicates = scan.duplicates.len(),
            "duplicate scan complete"
        );

        Ok(scan)
    }

    /// Asks whether to delete the queued duplicates and acts on the answer.
    ///
    /// `show` lists every queued path and asks again; anything unrecognized
    /// prints a reminder and asks again. When there are no duplicates
    /// nothing is asked.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::PromptFailed`] if the prompt cannot produce an
    /// answer and [`SortError::DeleteFailed`] if a deletion fails.
    pub fn confirm_and_delete(
        scan: &DuplicateScan,
        prompt: &mut dyn Prompt,
    ) -> SortResult<DedupOutcome> {
        if scan.is_empty() {
            return Ok(DedupOutcome::NoDuplicates);
        }

        let question = format!(
            "Do you want to delete {} files? (yes/no/show): ",
            scan.len()
        );

        loop {
            let answer = prompt
                .ask(&question)
                .map_err(|error| SortError::PromptFailed { error })?;

            match answer.parse::<PromptResponse>() {
                Ok(PromptResponse::Yes) => {
                    let deleted = Self::delete(scan)?;
                    return Ok(DedupOutcome::Deleted(deleted));
                }
                Ok(PromptResponse::No) => return Ok(DedupOutcome::Kept(scan.len())),
                Ok(PromptResponse::Show) => {
                    for duplicate in &scan.duplicates {
                        prompt.show(&duplicate.path.display().to_string());
                    }
                }
                Err(_) => prompt.show("Invalid option. Please enter 'yes', 'no', or 'show'."),
            }
        }
    }

    /// Deletes every queued duplicate. Retained files and the folders
    /// themselves are left alone.
    pub fn delete(scan: &DuplicateScan) -> SortResult<usize> {
        for duplicate in &scan.duplicates {
            fs::remove_file(&duplicate.path).map_err(|error| SortError::DeleteFailed {
                path: duplicate.path.clone(),
                error,
            })?;
            debug!(path = %duplicate.path.display(), "deleted duplicate");
        }
        Ok(scan.duplicates.len())
    }
}

/// Computes the hex MD5 digest of a file, reading `chunk_size` bytes at a
/// time.
///
/// # Examples
///
/// ```no_run
/// use dirsort::dedup::hash_file;
/// use std::path::Path;
///
/// let digest = hash_file(Path::new("TXT Files/a.txt"), 4096)?;
/// println!("{digest}");
/// # Ok::<(), dirsort::SortError>(())
/// ```
pub fn hash_file(path: &Path, chunk_size: usize) -> SortResult<String> {
    let to_error = |error| SortError::HashFailed {
        path: path.to_path_buf(),
        error,
    };

    let mut file = File::open(path).map_err(to_error)?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    loop {
        let n = file.read(&mut buffer).map_err(to_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Regular files directly inside `folder`, ordered by file name.
fn list_files(folder: &Path) -> SortResult<Vec<PathBuf>> {
    let to_error = |error| SortError::ReadDirFailed {
        path: folder.to_path_buf(),
        error,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(folder).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        if entry.file_type().map_err(to_error)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
