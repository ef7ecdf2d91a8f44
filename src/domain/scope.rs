//! Dependency scope selection policy

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Extras pulled in by the `develop` scope
pub const DEVELOP_EXTRAS: &[&str] = &["test", "doc", "dev"];

/// Extra-name value that selects every extra
pub const ALL_EXTRAS: &str = "all";

/// Which declared dependencies to consider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    /// Every extra on top of the base dependencies
    #[default]
    All,
    /// Base dependencies only
    Production,
    /// Base dependencies plus the `test`, `doc` and `dev` extras
    Develop,
    /// Base dependencies plus the explicitly selected extras
    Extras,
}

impl DependencyScope {
    /// Returns true if an extra with the given name is selected
    ///
    /// Names in `selected` are layered on top of every scope. The `extras`
    /// scope with nothing selected behaves like `all`, and selecting `all`
    /// selects every extra.
    pub fn includes_extra(&self, extra: &str, selected: &BTreeSet<String>) -> bool {
        if selected.contains(extra) || selected.contains(ALL_EXTRAS) {
            return true;
        }

        match self {
            DependencyScope::Production => false,
            DependencyScope::Develop => DEVELOP_EXTRAS.contains(&extra),
            DependencyScope::All => true,
            DependencyScope::Extras => selected.is_empty(),
        }
    }

    /// Returns the CLI name for this scope
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::All => "all",
            DependencyScope::Production => "production",
            DependencyScope::Develop => "develop",
            DependencyScope::Extras => "extras",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
