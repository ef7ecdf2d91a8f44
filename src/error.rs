//! Application error types using thiserror
//!
//! Error hierarchy:
//! - MetadataError: Issues with reading or parsing pyproject.toml files
//! - RequirementError: Malformed requirement strings (recorded, never fatal)
//! - RegistryError: Issues with package repository communication
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Metadata file related errors
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Package repository related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to metadata file operations
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Metadata file not found
    #[error("metadata file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read metadata file
    #[error("failed to read metadata file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Required structure missing or of the wrong type
    #[error("malformed metadata in {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Errors related to a single requirement string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    /// Blank requirement string
    #[error("empty requirement string")]
    Empty,

    /// Requirement does not start with a package name
    #[error("requirement '{requirement}' does not start with a package name")]
    InvalidName { requirement: String },
}

/// Errors related to package repository communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in repository
    #[error("package '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from repository
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

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Concurrency must allow at least one request
    #[error("invalid concurrency '{value}': must be at least 1")]
    InvalidConcurrency { value: usize },

    /// Timeout must be positive
    #[error("invalid timeout '{value}': must be at least 1 second")]
    InvalidTimeout { value: u64 },

    /// Nothing to generate an environment from
    #[error("no metadata files given")]
    NoInputFiles,
}

impl MetadataError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        MetadataError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetadataError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetadataError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Malformed error
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetadataError::Malformed {
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

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true if the repository answered that the package does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}
