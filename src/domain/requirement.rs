//! Requirement strings and package name extraction
//!
//! A requirement is kept as opaque text (`python-igraph=0.8.0`, `foo>=1,<2`).
//! The leading package name is extracted for lookups. Of the rest, only the
//! version specifier is carried into a conda match spec; extras (`[socks]`),
//! environment markers (`; python_version < "3.8"`) and direct references
//! (`@ https://...`) are pip-only syntax.

use crate::error::RequirementError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// A package name starts with an alphanumeric character and continues with
// alphanumerics, '-', '_' or '.'. Anything else (space, '=', '<', '>', '!', '~',
// '[', ';', ',') ends it.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*").unwrap());

/// Extract the leading package name from a requirement string
pub fn extract_name(requirement: &str) -> Result<&str, RequirementError> {
    let trimmed = requirement.trim();
    if trimmed.is_empty() {
        return Err(RequirementError::Empty);
    }

    NAME_RE
        .find(trimmed)
        .map(|m| m.as_str())
        .ok_or_else(|| RequirementError::InvalidName {
            requirement: requirement.to_string(),
        })
}

/// Normalize a package name for comparison and repository lookup
///
/// Names are compared case-insensitively.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// A parsed requirement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The requirement as declared, without surrounding whitespace
    pub raw: String,
    /// Leading package name
    pub name: String,
    /// Version specifier following the name (`>=1.0`, `=0.8.0`), may be empty
    pub specifier: String,
}

impl Requirement {
    /// Parse a requirement string
    pub fn parse(raw: &str) -> Result<Self, RequirementError> {
        let name = extract_name(raw)?;
        let trimmed = raw.trim();

        Ok(Self {
            raw: trimmed.to_string(),
            name: name.to_string(),
            specifier: version_specifier(&trimmed[name.len()..]).to_string(),
        })
    }

    /// Lowercased name used for ignore matching and lookups
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Render the requirement under a different package name, keeping the
    /// version specifier
    pub fn renamed(&self, name: &str) -> String {
        format!("{}{}", name, self.specifier)
    }
}

/// Version part of the text after a package name
fn version_specifier(rest: &str) -> &str {
    let rest = rest.split_once(';').map_or(rest, |(head, _)| head).trim();

    let rest = match rest.strip_prefix('[') {
        Some(extras) => extras.split_once(']').map_or("", |(_, tail)| tail.trim()),
        None => rest,
    };

    if rest.starts_with('@') {
        return "";
    }

    rest.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map_or(rest, str::trim)
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_name_with_pin() {
        assert_eq!(extract_name("python-igraph=0.8.0").unwrap(), "python-igraph");
    }

    #[test]
    fn test_extract_name_bare() {
        assert_eq!(extract_name("typing_extensions").unwrap(), "typing_extensions");
    }

    #[test]
    fn test_extract_name_range() {
        assert_eq!(extract_name("foo>=1,<2").unwrap(), "foo");
    }

    #[test]
    fn test_extract_name_stops_at_each_delimiter() {
        assert_eq!(extract_name("foo bar").unwrap(), "foo");
        assert_eq!(extract_name("foo<2").unwrap(), "foo");
        assert_eq!(extract_name("foo!=1.3").unwrap(), "foo");
        assert_eq!(extract_name("foo~=1.3").unwrap(), "foo");
        assert_eq!(extract_name("foo[bar]>=1").unwrap(), "foo");
        assert_eq!(extract_name("foo; python_version < '3.8'").unwrap(), "foo");
    }

    #[test]
    fn test_extract_name_keeps_dots() {
        assert_eq!(extract_name("zope.interface>=5").unwrap(), "zope.interface");
    }

    #[test]
    fn test_extract_name_trims_leading_whitespace() {
        assert_eq!(extract_name("  numpy").unwrap(), "numpy");
    }

    #[test]
    fn test_extract_name_empty() {
        assert_eq!(extract_name(""), Err(RequirementError::Empty));
        assert_eq!(extract_name("   "), Err(RequirementError::Empty));
    }

    #[test]
    fn test_extract_name_invalid() {
        assert!(matches!(
            extract_name(">=1.0"),
            Err(RequirementError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_normalize_name_is_case_insensitive() {
        assert_eq!(normalize_name("PyYAML"), "pyyaml");
        assert_eq!(normalize_name("typing_extensions"), "typing_extensions");
    }

    #[test]
    fn test_parse_splits_specifier() {
        let req = Requirement::parse("python-igraph=0.8.0").unwrap();
        assert_eq!(req.name, "python-igraph");
        assert_eq!(req.specifier, "=0.8.0");
        assert_eq!(req.raw, "python-igraph=0.8.0");
    }

    #[test]
    fn test_parse_without_specifier() {
        let req = Requirement::parse("pudb").unwrap();
        assert_eq!(req.specifier, "");
    }

    #[test]
    fn test_parse_trims_raw() {
        let req = Requirement::parse("  numpy>=1.20 ").unwrap();
        assert_eq!(req.raw, "numpy>=1.20");
        assert_eq!(req.specifier, ">=1.20");
    }

    #[test]
    fn test_specifier_drops_marker() {
        let req = Requirement::parse(r#"importlib-metadata; python_version < "3.8""#).unwrap();
        assert_eq!(req.specifier, "");
        assert_eq!(req.raw, r#"importlib-metadata; python_version < "3.8""#);

        let req = Requirement::parse("attrs>=19.2;python_version>='3.6'").unwrap();
        assert_eq!(req.specifier, ">=19.2");
    }

    #[test]
    fn test_specifier_drops_extras() {
        let req = Requirement::parse("requests[socks]>=2.28").unwrap();
        assert_eq!(req.specifier, ">=2.28");
        assert_eq!(req.renamed("requests"), "requests>=2.28");

        let req = Requirement::parse("dask[array, dataframe]").unwrap();
        assert_eq!(req.specifier, "");
    }

    #[test]
    fn test_specifier_with_extras_and_marker() {
        let req =
            Requirement::parse(r#"uvicorn[standard] >=0.20 ; sys_platform != "win32""#).unwrap();
        assert_eq!(req.renamed("uvicorn"), "uvicorn>=0.20");
    }

    #[test]
    fn test_specifier_drops_direct_reference() {
        let req = Requirement::parse("pip @ https://github.com/pypa/pip/archive/22.0.zip").unwrap();
        assert_eq!(req.specifier, "");
    }

    #[test]
    fn test_specifier_unwraps_parentheses() {
        let req = Requirement::parse("foo (>=1.0)").unwrap();
        assert_eq!(req.renamed("foo"), "foo>=1.0");
    }

    #[test]
    fn test_renamed_preserves_specifier() {
        let req = Requirement::parse("PyYAML>=5.1").unwrap();
        assert_eq!(req.normalized_name(), "pyyaml");
        assert_eq!(req.renamed("pyyaml"), "pyyaml>=5.1");
    }

    #[test]
    fn test_display_is_raw() {
        let req = Requirement::parse("jupyterlab>=1.0.0").unwrap();
        assert_eq!(req.to_string(), "jupyterlab>=1.0.0");
    }
}
