//! Extension keys and extension folder naming.
//!
//! A loose file is routed by its extension key: the final suffix of its name
//! without the leading dot, uppercased. The key names the folder the file is
//! moved into.
//!
//! # Examples
//!
//! ```
//! use dirsort::extension::ExtensionKey;
//! use std::path::Path;
//!
//! let key = ExtensionKey::from_path(Path::new("notes.md"));
//! assert_eq!(key.as_str(), "MD");
//! assert_eq!(key.folder_name(), "MD Files");
//! ```

use crate::config::EXTENSION_FOLDER_SUFFIX;
use std::fmt;
use std::path::Path;

/// The uppercased extension of a loose file.
///
/// Files without an extension (including dot-files such as `.bashrc`) get the
/// empty key, whose folder is literally named `" Files"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ExtensionKey(String);

impl ExtensionKey {
    /// Computes the key for a file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::extension::ExtensionKey;
    /// use std::path::Path;
    ///
    /// assert_eq!(ExtensionKey::from_path(Path::new("archive.tar.gz")).as_str(), "GZ");
    /// assert_eq!(ExtensionKey::from_path(Path::new("Makefile")).as_str(), "");
    /// assert_eq!(ExtensionKey::from_path(Path::new(".bashrc")).as_str(), "");
    /// ```
    pub fn from_path(path: &Path) -> Self {
        let key = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        Self(key)
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for files that have no extension.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name of the folder that receives files with this key.
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.0, EXTENSION_FOLDER_SUFFIX)
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if a directory name looks like a folder this tool creates
/// for an extension, e.g. `"PDF Files"` or `" Files"`.
///
/// Such directories are treated as already organized rather than as loose
/// folders.
///
/// # Examples
///
/// ```
/// use dirsort::extension::is_extension_folder_name;
///
/// assert!(is_extension_folder_name("TXT Files"));
/// assert!(is_extension_folder_name(" Files"));
/// assert!(!is_extension_folder_name("My Files"));
/// assert!(!is_extension_folder_name("drafts"));
/// ```
pub fn is_extension_folder_name(name: &str) -> bool {
    match name.strip_suffix(EXTENSION_FOLDER_SUFFIX) {
        Some(key) => {
            !key.contains(['.', '/', '\\']) && key == key.to_uppercase()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_uppercased() {
        assert_eq!(ExtensionKey::from_path(Path::new("a.txt")).as_str(), "TXT");
        assert_eq!(ExtensionKey::from_path(Path::new("b.TxT")).as_str(), "TXT");
        assert_eq!(ExtensionKey::from_path(Path::new("photo.Jpeg")).as_str(), "JPEG");
    }

    #[test]
    fn test_key_uses_last_suffix_only() {
        assert_eq!(
            ExtensionKey::from_path(Path::new("report.final.pdf")).as_str(),
            "PDF"
        );
    }

    #[test]
    fn test_files_without_extension_get_empty_key() {
        for name in ["README", ".gitignore", "trailing."] {
            let key = ExtensionKey::from_path(Path::new(name));
            assert!(key.is_empty(), "{name} should have an empty key");
            assert_eq!(key.folder_name(), " Files");
        }
    }

    #[test]
    fn test_key_from_full_path() {
        let key = ExtensionKey::from_path(Path::new("/home/user/inbox/song.mp3"));
        assert_eq!(key.to_string(), "MP3");
        assert_eq!(key.folder_name(), "MP3 Files");
    }

    #[test]
    fn test_extension_folder_names() {
        assert!(is_extension_folder_name("MP3 Files"));
        assert!(is_extension_folder_name("7Z Files"));
        assert!(is_extension_folder_name(" Files"));
    }

    #[test]
    fn test_non_extension_folder_names() {
        assert!(!is_extension_folder_name("Folders"));
        assert!(!is_extension_folder_name("Txt Files"));
        assert!(!is_extension_folder_name("TXT Files backup"));
        assert!(!is_extension_folder_name("TAR.GZ Files"));
        assert!(!is_extension_folder_name("Files"));
    }
}
