//! Orchestrator for coordinating the whole generation workflow
//!
//! This module provides:
//! - Workflow coordination: load → aggregate → resolve → assemble
//! - Selection of the package index (anaconda.org channel or offline)
//! - Fatal handling of metadata errors, lenient or strict lookup failures

use crate::cli::CliArgs;
use crate::domain::{DependencyScope, EnvironmentConfig, EnvironmentDescription, PythonFloor};
use crate::error::{AppError, ConfigError};
use crate::metadata::{self, MetadataFile};
use crate::progress::Progress;
use crate::registry::{AnacondaAdapter, HttpClient, OfflineIndex, PackageIndex};
use crate::resolve::{aggregate, exclude_own_packages, ResolutionResult, ResolveConfig, Resolver};
use std::collections::BTreeSet;

/// Everything that shapes one generated environment
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Dependency scope
    pub scope: DependencyScope,
    /// Extras layered on top of the scope
    pub selected_extras: BTreeSet<String>,
    /// Names forced into the pip block
    pub ignore: BTreeSet<String>,
    /// Resolver configuration
    pub resolve: ResolveConfig,
    /// Environment layout
    pub environment: EnvironmentConfig,
    /// Whether to draw progress bars
    pub show_progress: bool,
}

impl GenerateOptions {
    /// Build options from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            scope: args.deps,
            selected_extras: args.selected_extras(),
            ignore: args.ignore_set(),
            resolve: args.resolve_config(),
            environment: args.environment_config(),
            show_progress: args.show_progress(),
        }
    }
}

/// Result of generating an environment
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The assembled environment
    pub environment: EnvironmentDescription,
    /// How each candidate requirement was classified
    pub resolution: ResolutionResult,
}

/// Generate an environment from already parsed metadata files
pub async fn generate_environment(
    files: &[MetadataFile],
    options: &GenerateOptions,
    index: &dyn PackageIndex,
) -> Result<GenerateResult, AppError> {
    let first = files.first().ok_or(ConfigError::NoInputFiles)?;

    let candidates = exclude_own_packages(
        aggregate(files, options.scope, &options.selected_extras),
        files,
    );
    tracing::info!(
        scope = %options.scope,
        candidates = candidates.len(),
        "collected requirements"
    );

    let resolution = Resolver::new(index, options.resolve.clone())
        .with_progress(options.show_progress)
        .resolve(&candidates, &options.ignore)
        .await?;

    let python_floor = metadata::requires_python(files).and_then(|spec| {
        let floor = PythonFloor::parse(spec);
        if floor.is_none() {
            tracing::warn!("no lower bound in requires-python {:?}, using plain python", spec);
        }
        floor
    });

    let environment = EnvironmentDescription::assemble(
        first.module_name.clone(),
        python_floor.as_ref(),
        &options.environment,
        &resolution.repository_matches,
        &resolution.pip_fallback(),
    );

    Ok(GenerateResult {
        environment,
        resolution,
    })
}

/// Orchestrator for a CLI invocation
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        args.validate()?;
        Ok(Self { args })
    }

    /// Run the workflow against the index selected by the CLI arguments
    pub async fn run(&self) -> Result<GenerateResult, AppError> {
        let index: Box<dyn PackageIndex> = if self.args.offline {
            Box::new(OfflineIndex)
        } else {
            let options = GenerateOptions::from_cli(&self.args);
            let client = HttpClient::with_timeout(self.args.request_timeout())?;
            Box::new(AnacondaAdapter::new(
                client,
                options.environment.primary_channel(),
            ))
        };

        self.run_with_index(index.as_ref()).await
    }

    /// Run the workflow against a given index
    pub async fn run_with_index(
        &self,
        index: &dyn PackageIndex,
    ) -> Result<GenerateResult, AppError> {
        let options = GenerateOptions::from_cli(&self.args);

        let progress = Progress::spinner(options.show_progress, "Parsing metadata files...");
        let files = metadata::load_all(&self.args.paths);
        progress.finish();
        let files = files?;

        for (path, file) in self.args.paths.iter().zip(&files) {
            tracing::debug!(
                path = %path.display(),
                module = %file.module_name,
                dependencies = file.dependencies.len(),
                extras = file.extras.len(),
                "parsed metadata"
            );
        }

        generate_environment(&files, &options, index).await
    }
}
