//! Scan configuration
//!
//! Built once by the orchestrator from CLI arguments and shared read-only
//! with every walk task.

use crate::error::RootResolutionError;
use crate::manifest::ExclusionSet;
use std::path::{Path, PathBuf};

/// Default number of walk tasks in flight
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Directory under the home directory scanned when no path is given
pub const DEFAULT_ROOT_DIR: &str = "code";

/// Order in which the entries of one directory are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListingOrder {
    /// Whatever order the filesystem returns
    #[default]
    Fs,
    /// Lexicographic by file name
    Name,
}

/// Immutable configuration for one scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Absolute path the walk starts from
    pub root: PathBuf,
    /// Directory names never entered
    pub exclusions: ExclusionSet,
    /// Maximum walk tasks (listings and manifest checks) in flight
    pub concurrency: usize,
    /// Entry order within a directory
    pub order: ListingOrder,
    /// Whether symlinked directories are descended into
    pub follow_symlinks: bool,
}

impl ScanConfig {
    /// Create a configuration with defaults for everything but the root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclusions: ExclusionSet::new(),
            concurrency: DEFAULT_CONCURRENCY,
            order: ListingOrder::default(),
            follow_symlinks: false,
        }
    }

    /// Set the exclusion set
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set the concurrency limit (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the listing order
    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    /// Set whether symlinked directories are followed
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Resolve the scan root from an optional argument
///
/// An absent or empty argument falls back to `~/code`. The result is made
/// absolute and must be an existing directory that can be listed.
pub fn resolve_root(arg: Option<&Path>) -> Result<PathBuf, RootResolutionError> {
    let candidate = match arg.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => default_root()?,
    };

    let root = std::path::absolute(&candidate).map_err(|source| {
        RootResolutionError::Unreadable {
            path: candidate.clone(),
            source,
        }
    })?;

    match std::fs::metadata(&root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(RootResolutionError::NotADirectory { path: root }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RootResolutionError::NotFound { path: root })
        }
        Err(source) => return Err(RootResolutionError::Unreadable { path: root, source }),
    }

    // The root itself must be listable
    match std::fs::read_dir(&root) {
        Ok(_) => Ok(root),
        Err(source) => Err(RootResolutionError::Unreadable { path: root, source }),
    }
}

/// `~/code`
pub fn default_root() -> Result<PathBuf, RootResolutionError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_ROOT_DIR))
        .ok_or(RootResolutionError::NoHomeDirectory)
}
