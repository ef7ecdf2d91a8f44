//! CLI argument parsing module for conda-envgen

use crate::domain::{DependencyScope, EnvironmentConfig, DEFAULT_BUILD_TOOL};
use crate::error::ConfigError;
use crate::resolve::{LookupPolicy, ResolveConfig, DEFAULT_CONCURRENCY};
use clap::{ArgAction, Parser};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// Generate a conda environment.yml from pyproject.toml files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "conda-envgen",
    version,
    about = "Generate a conda environment.yml from pyproject.toml files"
)]
pub struct CliArgs {
    /// pyproject.toml files; the first one names the environment
    #[arg(required = true, value_name = "PYPROJECT")]
    pub paths: Vec<PathBuf>,

    // Dependency selection
    /// Which declared dependencies to include
    #[arg(long, value_enum, default_value_t = DependencyScope::All)]
    pub deps: DependencyScope,

    /// Extras to include on top of --deps (comma separated, `all` for every extra)
    #[arg(long, value_delimiter = ',')]
    pub extras: Vec<String>,

    /// Package names to install through pip even if the channel has them
    #[arg(long, num_args = 1.., action = ArgAction::Append)]
    pub ignore: Vec<String>,

    // Lookup options
    /// Abort when the package repository cannot be reached
    #[arg(long)]
    pub strict_lookup: bool,

    /// Skip repository lookups; every requirement goes to the pip block
    #[arg(long)]
    pub offline: bool,

    /// Maximum concurrent repository lookups
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    // Environment layout
    /// Channel to list and look packages up in (can be specified multiple times)
    #[arg(long = "channel", action = ArgAction::Append)]
    pub channels: Vec<String>,

    /// Packaging tool installed through pip
    #[arg(long, default_value = DEFAULT_BUILD_TOOL)]
    pub build_tool: String,

    // Output options
    /// Output the environment as JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Write the environment to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - errors only, no progress
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Check option values clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: self.concurrency,
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.timeout,
            });
        }
        Ok(())
    }

    /// Extra names selected with --extras
    pub fn selected_extras(&self) -> BTreeSet<String> {
        self.extras
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Package names given with --ignore
    pub fn ignore_set(&self) -> BTreeSet<String> {
        self.ignore.iter().cloned().collect()
    }

    /// Lookup failure policy
    pub fn lookup_policy(&self) -> LookupPolicy {
        if self.strict_lookup {
            LookupPolicy::Strict
        } else {
            LookupPolicy::Lenient
        }
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Resolver configuration
    pub fn resolve_config(&self) -> ResolveConfig {
        ResolveConfig::default()
            .with_concurrency(self.concurrency)
            .with_policy(self.lookup_policy())
    }

    /// Environment layout configuration
    pub fn environment_config(&self) -> EnvironmentConfig {
        EnvironmentConfig::default()
            .with_channels(self.channels.clone())
            .with_build_tool(self.build_tool.clone())
    }

    /// Whether to draw progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.offline
    }
}
