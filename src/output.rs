//! Output formatting for the generated environment
//!
//! The document is rendered completely before anything is written, so a
//! failed run never leaves a partial file behind.

use crate::domain::EnvironmentDescription;
use std::io::{self, Write};
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// environment.yml
    #[default]
    Yaml,
    /// JSON for machine processing
    Json,
}

impl OutputFormat {
    /// Create the format from the --json flag
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }
}

/// Render the environment in the given format
pub fn render(environment: &EnvironmentDescription, format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Yaml => environment.to_yaml().map_err(io::Error::other),
        OutputFormat::Json => environment
            .to_json()
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(io::Error::other),
    }
}

/// Write the rendered environment to a file, or to `stdout` when no path is given
pub fn write_environment(
    environment: &EnvironmentDescription,
    format: OutputFormat,
    path: Option<&Path>,
    stdout: &mut dyn Write,
) -> io::Result<()> {
    let rendered = render(environment, format)?;

    match path {
        Some(path) => std::fs::write(path, rendered),
        None => {
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()
        }
    }
}
