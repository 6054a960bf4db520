//! Version specification types for npm-style constraints
//!
//! Handles version constraints like `^1.2.3`, `~1.2.3`, `>=1.0.0`, `1.2.3`,
//! `1.x` and `>=1.0.0 <2.0.0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of version specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSpecKind {
    /// Exact/pinned version (e.g., `1.2.3`)
    Exact,
    /// Caret range (e.g., `^1.2.3`) - compatible with major version
    Caret,
    /// Tilde range (e.g., `~1.2.3`) - compatible with minor version
    Tilde,
    /// Greater than or equal (e.g., `>=1.2.3`)
    GreaterOrEqual,
    /// Greater than (e.g., `>1.2.3`)
    Greater,
    /// Less than or equal (e.g., `<=1.2.3`)
    LessOrEqual,
    /// Less than (e.g., `<1.2.3`)
    Less,
    /// Wildcard (e.g., `1.2.*`, `*`)
    Wildcard,
    /// Complex range (e.g., `>=1.0.0 <2.0.0`)
    Range,
}

impl VersionSpecKind {
    /// Returns true if this kind carries no concrete base version
    pub fn is_wildcard(&self) -> bool {
        matches!(self, VersionSpecKind::Wildcard)
    }
}

/// A version specification with its original string representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSpec {
    /// The kind of version specification
    pub kind: VersionSpecKind,
    /// The raw version string as it appears in the manifest
    pub raw: String,
    /// The extracted version number (without operator prefix)
    pub version: String,
}

impl VersionSpec {
    /// Creates a new VersionSpec
    pub fn new(kind: VersionSpecKind, raw: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            version: version.into(),
        }
    }

    /// The declared base version, if the constraint names one
    pub fn base_version(&self) -> Option<&str> {
        if self.kind.is_wildcard() || self.version.is_empty() {
            None
        } else {
            Some(&self.version)
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
