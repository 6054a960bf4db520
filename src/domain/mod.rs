//! Core domain models for depscan
//!
//! This module contains the fundamental types used throughout the application:
//! - Version specification types for declared dependency constraints
//! - Dependency information structures
//! - Walk entries, manifest locations and update reports

mod dependency;
mod report;
mod version_spec;

pub use dependency::Dependency;
pub use report::{DirectoryEntry, EntryKind, ManifestLocation, UpdateReport};
pub use version_spec::{VersionSpec, VersionSpecKind};
