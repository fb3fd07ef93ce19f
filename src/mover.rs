/// Relocation of loose entries into their destination folders.
///
/// Files go into their extension folder, folders go into the aggregation
/// folder. Destination folders are created on first use and existing entries
/// are never overwritten: a clashing name gets a numeric suffix instead.
use crate::classifier::{Classification, LooseFile};
use crate::error::{SortError, SortResult};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What kind of entry a move relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    File,
    Folder,
}

/// Record of a single completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Where the entry was before the move.
    pub original_path: PathBuf,
    /// Where the entry is now. Differs in name from the original when a
    /// collision had to be resolved.
    pub new_path: PathBuf,
    /// Name of the destination folder, e.g. `"TXT Files"` or `"Folders"`.
    pub destination_folder: String,
    pub kind: MoveKind,
}

impl MoveRecord {
    /// Returns true if the entry had to be renamed to avoid an overwrite.
    pub fn was_renamed(&self) -> bool {
        self.original_path.file_name() != self.new_path.file_name()
    }
}

/// Every move performed by one run, in order.
#[derive(Debug, Clone, Default)]
pub struct SortReport {
    pub moves: Vec<MoveRecord>,
}

impl SortReport {
    /// Total number of entries moved.
    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }

    /// Number of moved entries of one kind.
    pub fn count(&self, kind: MoveKind) -> usize {
        self.moves.iter().filter(|m| m.kind == kind).count()
    }

    /// Moves per destination folder name.
    pub fn counts_by_folder(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for record in &self.moves {
            *counts.entry(record.destination_folder.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Moves whose destination name differs from the original name.
    pub fn renamed(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter().filter(|m| m.was_renamed())
    }
}

/// Moves classified entries into place.
pub struct Mover;

impl Mover {
    /// Moves every loose file, then every loose folder, of a classification.
    ///
    /// The first failure stops the run; moves already performed stay in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::DirectoryCreationFailed`] if a destination folder
    /// cannot be created and [`SortError::MoveFailed`] if a rename fails.
    pub fn apply(classification: &Classification) -> SortResult<SortReport> {
        let mut report = SortReport::default();

        // A loose file can carry the name of a folder that is about to be
        // created. Those files move first so the name is free in time, and a
        // file blocking its own destination steps aside before moving.
        let mut files: Vec<(&LooseFile, PathBuf)> = classification
            .loose_files
            .iter()
            .map(|file| {
                // The mapping always covers every loose file's key.
                let folder = classification
                    .extension_folder(&file.key)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| classification.target.join(file.key.folder_name()));
                (file, folder)
            })
            .collect();
        files.sort_by_key(|(file, folder)| {
            if file.path == *folder {
                0
            } else if classification
                .extension_folders
                .values()
                .any(|f| *f == file.path)
            {
                1
            } else {
                2
            }
        });

        for (file, folder) in files {
            let record = if file.path == folder {
                Self::move_into_own_folder(&file.path, MoveKind::File)?
            } else {
                Self::move_into_folder(&file.path, &folder, MoveKind::File)?
            };
            report.moves.push(record);
        }

        for folder in &classification.loose_folders {
            if *folder == classification.aggregation_folder {
                continue;
            }
            let record = Self::move_into_folder(
                folder,
                &classification.aggregation_folder,
                MoveKind::Folder,
            )?;
            report.moves.push(record);
        }

        info!(
            files = report.count(MoveKind::File),
            folders = report.count(MoveKind::Folder),
            "moves complete"
        );

        Ok(report)
    }

    /// Moves `entry` into `destination_folder`, creating the folder if needed
    /// and resolving name collisions.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::mover::{MoveKind, Mover};
    /// use std::path::Path;
    ///
    /// let record = Mover::move_into_folder(
    ///     Path::new("/inbox/report.txt"),
    ///     Path::new("/inbox/TXT Files"),
    ///     MoveKind::File,
    /// )?;
    /// println!("moved to {}", record.new_path.display());
    /// # Ok::<(), dirsort::SortError>(())
    /// ```
    pub fn move_into_folder(
        entry: &Path,
        destination_folder: &Path,
        kind: MoveKind,
    ) -> SortResult<MoveRecord> {
        let file_name = entry
            .file_name()
            .ok_or_else(|| SortError::InvalidFileName {
                path: entry.to_path_buf(),
            })?;
        Self::move_named(entry, entry, file_name, destination_folder, kind)
    }

    /// Moves an entry whose path is exactly its destination folder, such as
    /// a file named `" Files"` without an extension. The entry is renamed to
    /// a free sibling first, then moved into the new folder under its
    /// original name.
    fn move_into_own_folder(entry: &Path, kind: MoveKind) -> SortResult<MoveRecord> {
        let file_name = entry
            .file_name()
            .ok_or_else(|| SortError::InvalidFileName {
                path: entry.to_path_buf(),
            })?;

        let staged = resolve_collision(entry);
        fs::rename(entry, &staged).map_err(|error| SortError::MoveFailed {
            from: entry.to_path_buf(),
            to: staged.clone(),
            error,
        })?;
        debug!(from = %entry.display(), to = %staged.display(), "stepped aside");

        Self::move_named(&staged, entry, file_name, entry, kind)
    }

    /// Renames `current` to `destination_folder/file_name`, resolving
    /// collisions. `original` is what the record reports as the source.
    fn move_named(
        current: &Path,
        original: &Path,
        file_name: &OsStr,
        destination_folder: &Path,
        kind: MoveKind,
    ) -> SortResult<MoveRecord> {
        fs::create_dir_all(destination_folder).map_err(|error| {
            SortError::DirectoryCreationFailed {
                path: destination_folder.to_path_buf(),
                error,
            }
        })?;

        let destination = resolve_collision(&destination_folder.join(file_name));

        fs::rename(current, &destination).map_err(|error| SortError::MoveFailed {
            from: current.to_path_buf(),
            to: destination.clone(),
            error,
        })?;

        debug!(from = %original.display(), to = %destination.display(), "moved");

        Ok(MoveRecord {
            original_path: original.to_path_buf(),
            new_path: destination,
            destination_folder: destination_folder
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            kind,
        })
    }
}

/// Returns `candidate` if nothing exists there, otherwise the first free
/// `stem_N.ext` sibling with N counting up from 1.
///
/// Names without an extension get the suffix on the whole name, so `drafts`
/// becomes `drafts_1` and `.bashrc` becomes `.bashrc_1`.
///
/// # Examples
///
/// ```no_run
/// use dirsort::mover::resolve_collision;
/// use std::path::Path;
///
/// // With "TXT Files/report.txt" already present:
/// let free = resolve_collision(Path::new("TXT Files/report.txt"));
/// assert_eq!(free, Path::new("TXT Files/report_1.txt"));
/// ```
pub fn resolve_collision(candidate: &Path) -> PathBuf {
    if !exists(candidate) {
        return candidate.to_path_buf();
    }

    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
    let (stem, extension) = split_name(candidate);

    let mut counter: u64 = 1;
    loop {
        let mut name = stem.clone();
        name.push(format!("_{counter}"));
        if let Some(ext) = &extension {
            name.push(".");
            name.push(ext);
        }
        let path = parent.join(name);
        if !exists(&path) {
            return path;
        }
        counter += 1;
    }
}

/// Splits a path's file name into the part the counter goes after and the
/// extension that is kept at the end.
fn split_name(path: &Path) -> (OsString, Option<OsString>) {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) if !ext.is_empty() => {
            (stem.to_os_string(), Some(ext.to_os_string()))
        }
        _ => (
            path.file_name().map(|n| n.to_os_string()).unwrap_or_default(),
            None,
        ),
    }
}

/// Existence check that also sees dangling symlinks.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_collision_free_path_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let candidate = temp_dir.path().join("report.txt");

        assert_eq!(resolve_collision(&candidate), candidate);
    }

    #[test]
    fn test_resolve_collision_appends_counter_before_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("report.txt"), "old").expect("Failed to write file");

        assert_eq!(
            resolve_collision(&base.join("report.txt")),
            base.join("report_1.txt")
        );
    }

    #[test]
    fn test_resolve_collision_skips_taken_counters() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["report.txt", "report_1.txt", "report_2.txt"] {
            fs::write(base.join(name), name).expect("Failed to write file");
        }

        let resolved = resolve_collision(&base.join("report.txt"));

        assert_eq!(resolved, base.join("report_3.txt"));
        assert!(!resolved.exists());
    }

    #[test]
    fn test_resolve_collision_names_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("drafts")).expect("Failed to create dir");
        fs::write(base.join(".bashrc"), "rc").expect("Failed to write file");
        fs::write(base.join("trailing."), "dot").expect("Failed to write file");

        assert_eq!(resolve_collision(&base.join("drafts")), base.join("drafts_1"));
        assert_eq!(resolve_collision(&base.join(".bashrc")), base.join(".bashrc_1"));
        assert_eq!(
            resolve_collision(&base.join("trailing.")),
            base.join("trailing._1")
        );
    }

    #[test]
    fn test_resolve_collision_keeps_only_last_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("backup.tar.gz"), "gz").expect("Failed to write file");

        assert_eq!(
            resolve_collision(&base.join("backup.tar.gz")),
            base.join("backup.tar_1.gz")
        );
    }

    #[test]
    fn test_move_into_folder_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let file_path = base.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let record = Mover::move_into_folder(&file_path, &base.join("TXT Files"), MoveKind::File)
            .expect("Failed to move file");

        assert!(base.join("TXT Files").is_dir());
        assert!(!file_path.exists());
        assert_eq!(record.new_path, base.join("TXT Files").join("test.txt"));
        assert_eq!(record.destination_folder, "TXT Files");
        assert!(!record.was_renamed());
    }

    #[test]
    fn test_move_into_folder_never_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let folder = base.join("TXT Files");
        fs::create_dir(&folder).expect("Failed to create dir");
        fs::write(folder.join("report.txt"), "original").expect("Failed to write file");
        let loose = base.join("report.txt");
        fs::write(&loose, "newer").expect("Failed to write file");

        let record =
            Mover::move_into_folder(&loose, &folder, MoveKind::File).expect("Failed to move file");

        assert!(record.was_renamed());
        assert_eq!(
            fs::read_to_string(folder.join("report.txt")).expect("Failed to read"),
            "original"
        );
        assert_eq!(
            fs::read_to_string(folder.join("report_1.txt")).expect("Failed to read"),
            "newer"
        );
    }

    #[test]
    fn test_move_into_folder_missing_source_reports_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let missing = base.join("gone.txt");

        let result = Mover::move_into_folder(&missing, &base.join("TXT Files"), MoveKind::File);

        match result {
            Err(SortError::MoveFailed { from, to, .. }) => {
                assert_eq!(from, missing);
                assert_eq!(to, base.join("TXT Files").join("gone.txt"));
            }
            other => panic!("expected MoveFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_move_into_folder_destination_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let blocker = base.join("TXT Files");
        fs::write(&blocker, "not a folder").expect("Failed to write file");
        let loose = base.join("a.txt");
        fs::write(&loose, "a").expect("Failed to write file");

        let result = Mover::move_into_folder(&loose, &blocker, MoveKind::File);

        match result {
            Err(SortError::DirectoryCreationFailed { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected DirectoryCreationFailed, got {other:?}"),
        }
        assert!(loose.is_file());
    }

    #[test]
    fn test_apply_moves_file_named_like_extension_folder_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("README.TXT"), "readme").expect("Failed to write file");
        fs::write(base.join("TXT Files"), "plain file").expect("Failed to write file");

        let classification = Classifier::scan(base).expect("Scan failed");
        let report = Mover::apply(&classification).expect("Apply failed");

        assert_eq!(report.moves[0].original_path, base.join("TXT Files"));
        assert!(base.join(" Files").join("TXT Files").is_file());
        assert!(base.join("TXT Files").join("README.TXT").is_file());
    }

    #[test]
    fn test_apply_file_blocking_its_own_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join(" Files"), "no extension").expect("Failed to write file");
        fs::write(base.join("Makefile"), "all:").expect("Failed to write file");

        let classification = Classifier::scan(base).expect("Scan failed");
        let report = Mover::apply(&classification).expect("Apply failed");

        assert_eq!(report.total_moves(), 2);
        assert_eq!(report.renamed().count(), 0);
        assert_eq!(
            fs::read_to_string(base.join(" Files").join(" Files")).expect("Failed to read"),
            "no extension"
        );
        assert!(base.join(" Files").join("Makefile").is_file());
        assert!(!base.join(" Files_1").exists());
    }

    #[test]
    fn test_apply_moves_files_and_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.txt"), "a").expect("Failed to write file");
        fs::write(base.join("notes.md"), "md").expect("Failed to write file");
        fs::create_dir(base.join("drafts")).expect("Failed to create dir");
        fs::write(base.join("drafts").join("d.txt"), "d").expect("Failed to write file");

        let classification = Classifier::scan(base).expect("Scan failed");
        let report = Mover::apply(&classification).expect("Apply failed");

        assert_eq!(report.total_moves(), 3);
        assert_eq!(report.count(MoveKind::File), 2);
        assert_eq!(report.count(MoveKind::Folder), 1);
        assert!(base.join("TXT Files").join("a.txt").is_file());
        assert!(base.join("MD Files").join("notes.md").is_file());
        assert!(base.join("Folders").join("drafts").join("d.txt").is_file());

        let counts = report.counts_by_folder();
        assert_eq!(counts.get("TXT Files"), Some(&1));
        assert_eq!(counts.get("Folders"), Some(&1));
    }

    #[test]
    fn test_apply_empty_classification_moves_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let classification = Classifier::scan(temp_dir.path()).expect("Scan failed");
        let report = Mover::apply(&classification).expect("Apply failed");

        assert_eq!(report.total_moves(), 0);
        assert!(!temp_dir.path().join("Folders").exists());
    }
}
