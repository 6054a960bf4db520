//! Manifest file recognition and parsing
//!
//! This module provides functionality to:
//! - Classify directory entries during the walk (descend, skip, check, ignore)
//! - Read and parse package.json dependencies

mod classifier;
mod package_json;

pub use classifier::{classify, Classification, ExclusionSet, MANIFEST_FILENAME};
pub use package_json::PackageJsonParser;

use crate::domain::Dependency;
use crate::error::ManifestError;
use std::path::Path;

/// Read a manifest from disk and parse its dependencies
pub async fn read_manifest(path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::read_error(path, e))?;

    PackageJsonParser.parse(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        fs::write(&path, r#"{"dependencies": {"lodash": "^4.17.21"}}"#).unwrap();

        let deps = read_manifest(&path).await.unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "lodash");
    }

    #[tokio::test]
    async fn test_read_manifest_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_manifest(&dir.path().join(MANIFEST_FILENAME))
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }
}
