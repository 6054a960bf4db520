//! npm Registry adapter
//!
//! Looks up the `latest` dist-tag of a package in the npm registry.
//! API endpoint: {registry}/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use crate::version::compare_versions;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    /// Distribution tags, `latest` among them
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    /// Published versions
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
}

impl NpmPackageResponse {
    /// The `latest` tag, or the highest published version when untagged
    fn latest(self) -> Option<String> {
        if let Some(latest) = self.dist_tags.get("latest") {
            return Some(latest.clone());
        }
        self.versions
            .into_keys()
            .max_by(|a, b| compare_versions(a, b))
    }
}

impl NpmAdapter {
    /// Create a new npm adapter against the public registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a new npm adapter against a custom registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        // Scoped names keep the leading '@' but encode the separator
        let encoded = match package.strip_prefix('@') {
            Some(scoped) => format!("@{}", scoped.replacen('/', "%2f", 1)),
            None => package.to_string(),
        };
        format!("{}/{}", self.base_url, encoded)
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        response
            .latest()
            .ok_or_else(|| RegistryError::InvalidResponse {
                package: package.to_string(),
                registry: self.registry_name().to_string(),
                message: "no published versions".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> NpmAdapter {
        NpmAdapter::new(HttpClient::new().unwrap())
    }

    #[test]
    fn test_npm_adapter_registry_name() {
        assert_eq!(adapter().registry_name(), "npm");
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            adapter().build_url("lodash"),
            "https://registry.npmjs.org/lodash"
        );
    }

    #[test]
    fn test_build_url_scoped_package() {
        assert_eq!(
            adapter().build_url("@types/node"),
            "https://registry.npmjs.org/@types%2fnode"
        );
    }

    #[test]
    fn test_custom_registry_trailing_slash() {
        let adapter =
            NpmAdapter::with_base_url(HttpClient::new().unwrap(), "https://npm.example.com/");
        assert_eq!(
            adapter.build_url("react"),
            "https://npm.example.com/react"
        );
    }

    #[test]
    fn test_response_prefers_latest_tag() {
        let json = r#"{
            "dist-tags": {"latest": "4.17.21", "next": "5.0.0-beta.1"},
            "versions": {"4.17.21": {}, "5.0.0-beta.1": {}}
        }"#;
        let response: NpmPackageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.latest(), Some("4.17.21".to_string()));
    }

    #[test]
    fn test_response_without_tags_uses_highest_version() {
        let json = r#"{"versions": {"1.9.0": {}, "1.10.0": {}, "1.2.0": {}}}"#;
        let response: NpmPackageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.latest(), Some("1.10.0".to_string()));
    }

    #[test]
    fn test_response_empty() {
        let response: NpmPackageResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.latest(), None);
    }
}
