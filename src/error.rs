//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ResolutionError: one manifest could not be checked (recoverable)
//! - ListingError: one directory could not be listed (recoverable)
//! - RootResolutionError: the scan root is unusable (fatal)
//! - ManifestError / RegistryError: causes carried by ResolutionError

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The root path could not be resolved
    #[error(transparent)]
    Root(#[from] RootResolutionError),

    /// The registry client could not be constructed
    #[error("failed to set up registry client: {0}")]
    Client(#[source] RegistryError),

    /// The walk driver task stopped abnormally
    #[error("walk aborted: {message}")]
    WalkAborted { message: String },

    /// Reports could not be written
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error (for package.json)
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// A single manifest could not be checked for updates
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The manifest itself could not be read or parsed
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A dependency lookup failed
    #[error("cannot resolve '{package}' for {manifest}: {source}")]
    Registry {
        manifest: PathBuf,
        package: String,
        #[source]
        source: RegistryError,
    },

    /// Resolution was abandoned before it finished
    #[error("resolution of {manifest} was interrupted: {message}")]
    Interrupted { manifest: PathBuf, message: String },
}

/// A directory could not be listed; its subtree contributes no reports
#[derive(Error, Debug)]
#[error("failed to list directory {path}: {source}")]
pub struct ListingError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The scan root is unusable; the run cannot start
#[derive(Error, Debug)]
pub enum RootResolutionError {
    /// Root path does not exist
    #[error("directory not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Root path could not be inspected
    #[error("cannot access {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No root given and no home directory to default to
    #[error("no path given and the home directory could not be determined")]
    NoHomeDirectory,
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true if the registry has no such package
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

impl ResolutionError {
    /// Creates a new Registry resolution error
    pub fn registry(
        manifest: impl Into<PathBuf>,
        package: impl Into<String>,
        source: RegistryError,
    ) -> Self {
        ResolutionError::Registry {
            manifest: manifest.into(),
            package: package.into(),
            source,
        }
    }
}

impl ListingError {
    /// Creates a new ListingError
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
