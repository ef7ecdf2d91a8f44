//! Package repository lookups
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - anaconda.org channel adapter
//! - An offline index that never finds anything

mod anaconda;
mod client;

pub use anaconda::AnacondaAdapter;
pub use client::{HttpClient, DEFAULT_TIMEOUT};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Answers whether a package has an equivalent in the target repository
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Get the repository name used in diagnostics
    fn registry_name(&self) -> &str;

    /// Look up a package by name
    ///
    /// Returns the canonical repository name when the package exists and
    /// `None` when it does not. `Err` means the repository could not answer.
    async fn lookup(&self, name: &str) -> Result<Option<String>, RegistryError>;
}

/// Index used with `--offline`: every package falls back to pip
pub struct OfflineIndex;

#[async_trait]
impl PackageIndex for OfflineIndex {
    fn registry_name(&self) -> &str {
        "offline"
    }

    async fn lookup(&self, _name: &str) -> Result<Option<String>, RegistryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_index_finds_nothing() {
        assert_eq!(OfflineIndex.lookup("numpy").await.unwrap(), None);
        assert_eq!(OfflineIndex.registry_name(), "offline");
    }
}
