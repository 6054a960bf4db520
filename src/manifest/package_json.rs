//! package.json parser for Node.js projects
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies

use crate::domain::Dependency;
use crate::error::ManifestError;
use crate::parser::NodeVersionParser;
use serde_json::{Map, Value};
use std::path::Path;

/// Dependency sections read from package.json, with their dev flag
const DEPENDENCY_SECTIONS: &[(&str, bool)] = &[
    ("dependencies", false),
    ("devDependencies", true),
    ("peerDependencies", false),
    ("optionalDependencies", false),
];

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse dependencies from package.json content read from `path`
    pub fn parse(&self, path: &Path, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

        if !json.is_object() {
            return Err(ManifestError::json_parse_error(
                path,
                "top-level value is not an object",
            ));
        }

        let mut dependencies = Vec::new();
        for (section, is_dev) in DEPENDENCY_SECTIONS {
            if let Some(deps) = json.get(*section).and_then(|v| v.as_object()) {
                parse_dependency_object(deps, *is_dev, &mut dependencies);
            }
        }

        Ok(dependencies)
    }
}

fn parse_dependency_object(deps: &Map<String, Value>, is_dev: bool, output: &mut Vec<Dependency>) {
    for (name, version_value) in deps {
        if let Some(version_str) = version_value.as_str() {
            if let Some(spec) = NodeVersionParser.parse(version_str) {
                let dep = if is_dev {
                    Dependency::development(name.clone(), spec)
                } else {
                    Dependency::production(name.clone(), spec)
                };
                output.push(dep);
            }
        }
    }
}
