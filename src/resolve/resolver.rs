//! Repository resolution of candidate requirements
//!
//! Each candidate is classified as:
//! - a repository match (renamed to the repository's canonical name, version
//!   specifier kept)
//! - unresolved (no equivalent, or the lookup failed under the lenient policy)
//! - ignored (name listed in the ignore set)
//! - malformed (no package name could be extracted)

use crate::domain::{normalize_name, Requirement};
use crate::error::RegistryError;
use crate::progress::Progress;
use crate::registry::PackageIndex;
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap, HashSet};
use tokio::sync::Semaphore;

/// Default number of concurrent repository lookups
pub const DEFAULT_CONCURRENCY: usize = 10;

/// What to do when the repository cannot answer a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// Treat the package as not found and fall back to pip
    #[default]
    Lenient,
    /// Abort the whole resolution
    Strict,
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Maximum lookups in flight
    pub concurrency: usize,
    /// Lookup failure handling
    pub policy: LookupPolicy,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            policy: LookupPolicy::default(),
        }
    }
}

impl ResolveConfig {
    /// Set the lookup concurrency (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the lookup failure policy
    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Partition of the candidate set; every list is sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Requirements available in the repository, under the canonical name
    pub repository_matches: Vec<String>,
    /// Original requirements without a repository equivalent
    pub unresolved: Vec<String>,
    /// Original requirements whose name is in the ignore set
    pub ignored: Vec<String>,
    /// Candidates that are not valid requirement strings
    pub malformed: Vec<String>,
}

impl ResolutionResult {
    /// Requirements to install through pip: unresolved and ignored, sorted
    pub fn pip_fallback(&self) -> Vec<String> {
        let mut pip: Vec<String> = self
            .unresolved
            .iter()
            .chain(self.ignored.iter())
            .cloned()
            .collect();
        pip.sort();
        pip.dedup();
        pip
    }
}

/// Resolves requirement strings against a package index
pub struct Resolver<'a> {
    index: &'a dyn PackageIndex,
    config: ResolveConfig,
    show_progress: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given index
    pub fn new(index: &'a dyn PackageIndex, config: ResolveConfig) -> Self {
        Self {
            index,
            config,
            show_progress: false,
        }
    }

    /// Show a progress bar while looking packages up
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Partition `candidates` into repository matches, unresolved, ignored
    /// and malformed requirements
    ///
    /// Ignore matching and lookups use lowercased names, and each distinct
    /// name is queried once.
    pub async fn resolve(
        &self,
        candidates: &BTreeSet<String>,
        ignore: &BTreeSet<String>,
    ) -> Result<ResolutionResult, RegistryError> {
        let ignore: HashSet<String> = ignore.iter().map(|n| normalize_name(n)).collect();
        let mut result = ResolutionResult::default();
        let mut to_lookup = Vec::new();

        for candidate in candidates {
            match Requirement::parse(candidate) {
                Ok(requirement) if ignore.contains(&requirement.normalized_name()) => {
                    tracing::debug!(requirement = %requirement, "ignored");
                    result.ignored.push(requirement.raw);
                }
                Ok(requirement) => to_lookup.push(requirement),
                Err(e) => {
                    tracing::warn!("skipping requirement {:?}: {}", candidate, e);
                    result.malformed.push(candidate.clone());
                }
            }
        }

        let names: BTreeSet<String> = to_lookup.iter().map(|r| r.normalized_name()).collect();
        let progress = Progress::lookups(self.show_progress, names.len() as u64);
        let found = self.lookup_all(names, &progress).await;
        progress.finish();
        let found = found?;

        for requirement in to_lookup {
            match found.get(&requirement.normalized_name()).cloned().flatten() {
                Some(canonical) => result.repository_matches.push(requirement.renamed(&canonical)),
                None => result.unresolved.push(requirement.raw),
            }
        }

        result.repository_matches.sort();
        result.repository_matches.dedup();
        result.unresolved.sort();
        result.unresolved.dedup();
        result.ignored.sort();
        result.ignored.dedup();
        result.malformed.sort();

        Ok(result)
    }

    /// Query every name with bounded concurrency
    async fn lookup_all(
        &self,
        names: BTreeSet<String>,
        progress: &Progress,
    ) -> Result<HashMap<String, Option<String>>, RegistryError> {
        let semaphore = Semaphore::new(self.config.concurrency.max(1));

        let lookups = names.into_iter().map(|name| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await.ok();
                let outcome = self.index.lookup(&name).await;
                progress.advance(&name);
                (name, outcome)
            }
        });

        let mut found = HashMap::new();
        for (name, outcome) in join_all(lookups).await {
            let equivalent = match outcome {
                Ok(equivalent) => equivalent,
                Err(e) => match self.config.policy {
                    LookupPolicy::Strict => return Err(e),
                    LookupPolicy::Lenient => {
                        tracing::warn!("lookup of {} failed, falling back to pip: {}", name, e);
                        None
                    }
                },
            };
            tracing::debug!(
                package = %name,
                found = equivalent.is_some(),
                "{} lookup",
                self.index.registry_name()
            );
            found.insert(name, equivalent);
        }

        Ok(found)
    }
}
