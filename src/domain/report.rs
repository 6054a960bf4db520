//! Walk entries and per-manifest results

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a listed filesystem entry is, as far as the walk cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory (or a followed symlink to one)
    Directory,
    /// A regular file (or a followed symlink to one)
    File,
    /// Anything else: unfollowed symlinks, sockets, dangling links
    Other,
}

/// One entry from a single directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Full path of the entry
    pub path: PathBuf,
    /// File name component of the entry
    pub name: OsString,
    /// Kind of the entry
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Create a new DirectoryEntry
    pub fn new(path: impl Into<PathBuf>, name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind,
        }
    }

    /// Returns true if the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A manifest file found by the walk; the unit of work for the update check
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestLocation {
    path: PathBuf,
}

impl ManifestLocation {
    /// Create a new ManifestLocation
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that contains the manifest
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

impl fmt::Display for ManifestLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Result of checking one manifest: its directory and the outdated count
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpdateReport {
    directory: PathBuf,
    updates: usize,
}

impl UpdateReport {
    /// Create a new UpdateReport
    pub fn new(directory: impl Into<PathBuf>, updates: usize) -> Self {
        Self {
            directory: directory.into(),
            updates,
        }
    }

    /// Directory containing the checked manifest
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Number of dependencies with a newer version available
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Directory rendered relative to `root` when it is a strict descendant,
    /// otherwise the directory as-is
    pub fn display_path(&self, root: &Path) -> String {
        match self.directory.strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
            _ => self.directory.display().to_string(),
        }
    }
}
