//! Candidate requirement selection across metadata files

use crate::domain::{extract_name, normalize_name, DependencyScope};
use crate::metadata::MetadataFile;
use std::collections::{BTreeSet, HashSet};

/// Collect the duplicate-free set of requirement strings selected by `scope`
///
/// Base dependencies are always included. Extras are included when
/// [`DependencyScope::includes_extra`] selects them; extras a file does not
/// declare are simply absent.
pub fn aggregate(
    files: &[MetadataFile],
    scope: DependencyScope,
    selected_extras: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();

    for file in files {
        candidates.extend(file.dependencies.iter().cloned());

        for (extra, requirements) in &file.extras {
            if scope.includes_extra(extra, selected_extras) {
                candidates.extend(requirements.iter().cloned());
            }
        }
    }

    candidates
}

/// Drop requirements that name one of the input packages themselves
pub fn exclude_own_packages(
    candidates: BTreeSet<String>,
    files: &[MetadataFile],
) -> BTreeSet<String> {
    let own: HashSet<String> = files
        .iter()
        .map(|f| normalize_name(&f.module_name))
        .collect();

    candidates
        .into_iter()
        .filter(|requirement| match extract_name(requirement) {
            Ok(name) => !own.contains(&normalize_name(name)),
            // Malformed entries are reported by the resolver
            Err(_) => true,
        })
        .collect()
}
