//! anaconda.org package API adapter
//!
//! Checks whether a package exists on a conda channel.
//! API endpoint: https://api.anaconda.org/package/{channel}/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageIndex};
use async_trait::async_trait;
use serde::Deserialize;

/// anaconda.org API base URL
const ANACONDA_API_URL: &str = "https://api.anaconda.org/package";

/// anaconda.org adapter for a single channel
pub struct AnacondaAdapter {
    client: HttpClient,
    channel: String,
}

/// Package metadata response (only the fields we use)
#[derive(Debug, Deserialize)]
struct PackageResponse {
    /// Canonical package name on the channel
    name: String,
}

impl AnacondaAdapter {
    /// Create a new adapter for the given channel
    pub fn new(client: HttpClient, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/{}", ANACONDA_API_URL, self.channel, package)
    }
}

#[async_trait]
impl PackageIndex for AnacondaAdapter {
    fn registry_name(&self) -> &str {
        &self.channel
    }

    async fn lookup(&self, name: &str) -> Result<Option<String>, RegistryError> {
        let url = self.build_url(name);
        match self
            .client
            .get_json::<PackageResponse>(&url, name, &self.channel)
            .await
        {
            Ok(response) => Ok(Some(response.name)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> AnacondaAdapter {
        AnacondaAdapter::new(HttpClient::new().unwrap(), "conda-forge")
    }

    #[test]
    fn test_registry_name_is_channel() {
        assert_eq!(adapter().registry_name(), "conda-forge");
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            adapter().build_url("typing_extensions"),
            "https://api.anaconda.org/package/conda-forge/typing_extensions"
        );
    }

    #[test]
    fn test_build_url_other_channel() {
        let adapter = AnacondaAdapter::new(HttpClient::new().unwrap(), "bioconda");
        assert_eq!(
            adapter.build_url("samtools"),
            "https://api.anaconda.org/package/bioconda/samtools"
        );
    }

    #[test]
    fn test_response_parsing_ignores_unknown_fields() {
        let body = r#"{
            "name": "python-igraph",
            "full_name": "conda-forge/python-igraph",
            "summary": "Python interface for igraph",
            "latest_version": "0.11.8"
        }"#;
        let response: PackageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.name, "python-igraph");
    }
}
