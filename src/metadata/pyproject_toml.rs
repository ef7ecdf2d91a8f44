//! pyproject.toml parser
//!
//! Handles:
//! - project.name / project.dependencies / project.optional-dependencies (PEP 621)
//! - project.requires-python (PEP 621)
//! - tool.flit.metadata.module / requires / requires-extra / requires-python (flit)

use super::MetadataFile;
use crate::error::MetadataError;
use std::collections::BTreeMap;
use std::path::Path;
use toml::{Table, Value};

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser;

impl PyprojectTomlParser {
    /// Parse a metadata document; `path` is only used in error messages
    pub fn parse(&self, content: &str, path: &Path) -> Result<MetadataFile, MetadataError> {
        let doc: Table = toml::from_str(content)
            .map_err(|e: toml::de::Error| MetadataError::toml_parse_error(path, e.to_string()))?;

        if let Some(project) = doc.get("project") {
            let project = project
                .as_table()
                .ok_or_else(|| MetadataError::malformed(path, "[project] is not a table"))?;
            return parse_pep621(project, path);
        }

        if let Some(flit) = doc
            .get("tool")
            .and_then(|t| t.get("flit"))
            .and_then(|f| f.get("metadata"))
        {
            let flit = flit.as_table().ok_or_else(|| {
                MetadataError::malformed(path, "[tool.flit.metadata] is not a table")
            })?;
            return parse_flit(flit, path);
        }

        Err(MetadataError::malformed(
            path,
            "neither [project] nor [tool.flit.metadata] is present",
        ))
    }
}

fn parse_pep621(project: &Table, path: &Path) -> Result<MetadataFile, MetadataError> {
    let module_name = required_string(project, "name", "project.name", path)?;

    Ok(MetadataFile {
        module_name,
        dependencies: string_array(project.get("dependencies"), "project.dependencies", path)?,
        extras: extras_table(
            project.get("optional-dependencies"),
            "project.optional-dependencies",
            path,
        )?,
        requires_python: optional_string(project, "requires-python", path)?,
    })
}

fn parse_flit(flit: &Table, path: &Path) -> Result<MetadataFile, MetadataError> {
    let module_name = match flit.get("module") {
        Some(_) => required_string(flit, "module", "tool.flit.metadata.module", path)?,
        None => required_string(flit, "dist-name", "tool.flit.metadata.module", path)?,
    };

    Ok(MetadataFile {
        module_name,
        dependencies: string_array(flit.get("requires"), "tool.flit.metadata.requires", path)?,
        extras: extras_table(
            flit.get("requires-extra"),
            "tool.flit.metadata.requires-extra",
            path,
        )?,
        requires_python: optional_string(flit, "requires-python", path)?,
    })
}

fn required_string(
    table: &Table,
    key: &str,
    field: &str,
    path: &Path,
) -> Result<String, MetadataError> {
    match table.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(MetadataError::malformed(path, format!("{field} is empty"))),
        Some(_) => Err(MetadataError::malformed(
            path,
            format!("{field} must be a string"),
        )),
        None => Err(MetadataError::malformed(path, format!("{field} is missing"))),
    }
}

fn optional_string(table: &Table, key: &str, path: &Path) -> Result<Option<String>, MetadataError> {
    match table.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(MetadataError::malformed(
            path,
            format!("{key} must be a string"),
        )),
        None => Ok(None),
    }
}

fn string_array(
    value: Option<&Value>,
    field: &str,
    path: &Path,
) -> Result<Vec<String>, MetadataError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    let array = value
        .as_array()
        .ok_or_else(|| MetadataError::malformed(path, format!("{field} must be an array")))?;

    array
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                MetadataError::malformed(path, format!("{field} must contain only strings"))
            })
        })
        .collect()
}

fn extras_table(
    value: Option<&Value>,
    field: &str,
    path: &Path,
) -> Result<BTreeMap<String, Vec<String>>, MetadataError> {
    let Some(value) = value else {
        return Ok(BTreeMap::new());
    };

    let table = value
        .as_table()
        .ok_or_else(|| MetadataError::malformed(path, format!("{field} must be a table")))?;

    table
        .iter()
        .map(|(extra, deps)| -> Result<(String, Vec<String>), MetadataError> {
            let deps = string_array(Some(deps), &format!("{field}.{extra}"), path)?;
            Ok((extra.clone(), deps))
        })
        .collect()
}
