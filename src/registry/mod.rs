//! Registry adapters for looking up the latest published version
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - npm Registry adapter

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the version the registry currently tags as latest
    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError>;
}
