//! Version check adapter
//!
//! Given a manifest path, answers how many of its declared dependencies
//! have a newer version published. Answers are a snapshot of registry state
//! and may change between runs.

use crate::error::{RegistryError, ResolutionError};
use crate::manifest::read_manifest;
use crate::registry::RegistryAdapter;
use crate::version::is_newer;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Default limit for registry requests in flight across all manifests
pub const REGISTRY_CONCURRENCY: usize = 8;

/// Counts outdated dependencies of one manifest
#[async_trait]
pub trait UpdateChecker: Send + Sync {
    /// Number of distinct dependencies with a newer version available
    async fn check_updates(&self, manifest: &Path) -> Result<usize, ResolutionError>;
}

/// Update checker backed by a package registry
pub struct RegistryUpdateChecker {
    adapter: Arc<dyn RegistryAdapter>,
    requests: Arc<Semaphore>,
}

impl RegistryUpdateChecker {
    /// Create a checker with the default registry request limit
    pub fn new(adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self::with_request_limit(adapter, REGISTRY_CONCURRENCY)
    }

    /// Create a checker allowing at most `limit` registry requests at once
    pub fn with_request_limit(adapter: Arc<dyn RegistryAdapter>, limit: usize) -> Self {
        Self {
            adapter,
            requests: Arc::new(Semaphore::new(limit.max(1))),
        }
    }
}

#[async_trait]
impl UpdateChecker for RegistryUpdateChecker {
    async fn check_updates(&self, manifest: &Path) -> Result<usize, ResolutionError> {
        let dependencies = read_manifest(manifest).await?;

        // One lookup per name; the first declaration wins
        let mut declared: BTreeMap<String, String> = BTreeMap::new();
        for dep in &dependencies {
            if let Some(base) = dep.version_spec.base_version() {
                declared
                    .entry(dep.name.clone())
                    .or_insert_with(|| base.to_string());
            }
        }

        let mut lookups = JoinSet::new();
        for (name, version) in declared {
            let adapter = Arc::clone(&self.adapter);
            let requests = Arc::clone(&self.requests);
            lookups.spawn(async move {
                let latest = match requests.acquire().await {
                    Ok(_permit) => adapter.fetch_latest(&name).await,
                    Err(e) => Err(RegistryError::network_error(
                        &name,
                        adapter.registry_name(),
                        e.to_string(),
                    )),
                };
                (name, version, latest)
            });
        }

        let mut outdated = 0;
        while let Some(joined) = lookups.join_next().await {
            let (name, declared, latest) =
                joined.map_err(|e| ResolutionError::Interrupted {
                    manifest: manifest.to_path_buf(),
                    message: e.to_string(),
                })?;

            match latest {
                Ok(latest) if is_newer(&latest, &declared) => {
                    debug!(package = %name, %declared, %latest, "update available");
                    outdated += 1;
                }
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    debug!(package = %name, "not in registry, skipping");
                }
                Err(e) => return Err(ResolutionError::registry(manifest, name, e)),
            }
        }

        Ok(outdated)
    }
}
