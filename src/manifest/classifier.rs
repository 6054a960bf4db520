//! Directory entry classification for the walk
//!
//! Every listed entry is sorted into one of four buckets by name and kind
//! alone. Exclusion is an exact name match on directories, never a glob.

use std::collections::BTreeSet;
use std::ffi::OsStr;

/// The file name recognised as a dependency manifest
pub const MANIFEST_FILENAME: &str = "package.json";

/// Vendored dependency cache, excluded from every walk
pub const DEFAULT_EXCLUSION: &str = "node_modules";

/// What the walk should do with one directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Recurse into this directory
    Descend,
    /// Excluded directory: neither recurse nor check
    Skip,
    /// Manifest file: run the update check
    CheckManifest,
    /// Irrelevant entry
    Ignore,
}

/// Directory names the walk never enters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Create an exclusion set holding only `node_modules`
    pub fn new() -> Self {
        Self::with_names(std::iter::empty::<String>())
    }

    /// Create an exclusion set holding `node_modules` plus `extra`
    pub fn with_names<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: BTreeSet<String> = extra
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty())
            .collect();
        names.insert(DEFAULT_EXCLUSION.to_string());
        Self { names }
    }

    /// Returns true if a directory with this name must not be entered
    pub fn contains(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|n| self.names.contains(n))
    }

    /// Excluded names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a directory entry by its name and whether it is a directory
pub fn classify(name: &OsStr, is_dir: bool, exclusions: &ExclusionSet) -> Classification {
    if is_dir {
        if exclusions.contains(name) {
            Classification::Skip
        } else {
            Classification::Descend
        }
    } else if name == MANIFEST_FILENAME {
        Classification::CheckManifest
    } else {
        Classification::Ignore
    }
}
