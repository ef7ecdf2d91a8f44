//! Metadata file loading
//!
//! This module provides functionality to:
//! - Read pyproject.toml files from disk
//! - Extract the package name, base dependencies, extras and requires-python
//!   from PEP 621 `[project]` tables or legacy `[tool.flit.metadata]` tables

mod pyproject_toml;

pub use pyproject_toml::PyprojectTomlParser;

use crate::error::MetadataError;
use std::collections::BTreeMap;
use std::path::Path;

/// One parsed dependency-description document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataFile {
    /// Module (package) name
    pub module_name: String,
    /// Base dependency requirement strings
    pub dependencies: Vec<String>,
    /// Extra name to requirement strings
    pub extras: BTreeMap<String, Vec<String>>,
    /// Raw requires-python specifier, if declared
    pub requires_python: Option<String>,
}

impl MetadataFile {
    /// Creates a metadata file with no dependencies
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Self::default()
        }
    }

    /// Sets the base dependencies (builder pattern)
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an extra (builder pattern)
    pub fn with_extra<I, S>(mut self, name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras.insert(
            name.into(),
            dependencies.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Sets requires-python (builder pattern)
    pub fn with_requires_python(mut self, requires_python: impl Into<String>) -> Self {
        self.requires_python = Some(requires_python.into());
        self
    }
}

/// Read and parse a metadata file
pub fn load_metadata(path: &Path) -> Result<MetadataFile, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::not_found(path));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| MetadataError::read_error(path, e))?;

    PyprojectTomlParser.parse(&content, path)
}

/// Read and parse every metadata file, stopping at the first failure
pub fn load_all(paths: &[impl AsRef<Path>]) -> Result<Vec<MetadataFile>, MetadataError> {
    paths.iter().map(|p| load_metadata(p.as_ref())).collect()
}

/// The requires-python value of the last file that declares one
pub fn requires_python(files: &[MetadataFile]) -> Option<&str> {
    files
        .iter()
        .rev()
        .find_map(|file| file.requires_python.as_deref())
}
