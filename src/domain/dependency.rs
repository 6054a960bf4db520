//! Dependency information structures

use super::VersionSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency declared in a package.json manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Version specification
    pub version_spec: VersionSpec,
    /// Whether this is a development dependency
    pub is_dev: bool,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, version_spec: VersionSpec, is_dev: bool) -> Self {
        Self {
            name: name.into(),
            version_spec,
            is_dev,
        }
    }

    /// Creates a new production dependency
    pub fn production(name: impl Into<String>, version_spec: VersionSpec) -> Self {
        Self::new(name, version_spec, false)
    }

    /// Creates a new development dependency
    pub fn development(name: impl Into<String>, version_spec: VersionSpec) -> Self {
        Self::new(name, version_spec, true)
    }

    /// Returns the declared version string
    pub fn version(&self) -> &str {
        &self.version_spec.version
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.version_spec, dev_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionSpecKind;

    fn sample_version_spec() -> VersionSpec {
        VersionSpec::new(VersionSpecKind::Caret, "^1.2.3", "1.2.3")
    }

    #[test]
    fn test_dependency_production() {
        let dep = Dependency::production("react", sample_version_spec());
        assert_eq!(dep.name, "react");
        assert!(!dep.is_dev);
        assert_eq!(dep.version(), "1.2.3");
    }

    #[test]
    fn test_dependency_development() {
        let dep = Dependency::development("jest", sample_version_spec());
        assert!(dep.is_dev);
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::production("lodash", sample_version_spec());
        assert_eq!(format!("{}", dep), "lodash@^1.2.3");

        let dep = Dependency::development("jest", sample_version_spec());
        assert_eq!(format!("{}", dep), "jest@^1.2.3 (dev)");
    }
}
