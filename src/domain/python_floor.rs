//! Python version floor derived from a `requires-python` specifier
//!
//! Handles lower-bound clauses:
//! - `>=3.7`, `~=3.7`, `==3.7` (rendered as `python>=3.7`)
//! - `==3.*` (wildcard suffix is dropped)
//! - `>3.6` (rendered as `python>3.6`)
//!
//! Upper bounds and exclusions (`<4`, `!=3.8.0`) never produce a floor.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LOWER_BOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|~=|==|>)\s*(\d+(?:\.\d+)*)(\.\*)?$").unwrap()
});

/// Comparison used for the emitted python constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorOperator {
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl FloorOperator {
    /// Returns the operator text
    pub fn as_str(&self) -> &'static str {
        match self {
            FloorOperator::GreaterOrEqual => ">=",
            FloorOperator::Greater => ">",
        }
    }
}

/// Minimum python version for the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonFloor {
    pub operator: FloorOperator,
    pub version: String,
}

impl PythonFloor {
    /// Parse the first lower-bound clause of a comma separated specifier list
    pub fn parse(requires_python: &str) -> Option<Self> {
        requires_python.split(',').find_map(|clause| {
            let caps = LOWER_BOUND_RE.captures(clause.trim())?;
            let op = caps.get(1)?.as_str();
            // Wildcards are only valid on equality
            if caps.get(3).is_some() && op != "==" {
                return None;
            }
            let operator = match op {
                ">" => FloorOperator::Greater,
                _ => FloorOperator::GreaterOrEqual,
            };
            Some(Self {
                operator,
                version: caps.get(2)?.as_str().to_string(),
            })
        })
    }

    /// The dependency entry for the environment file
    pub fn dependency(floor: Option<&PythonFloor>) -> String {
        match floor {
            Some(floor) => floor.to_string(),
            None => "python".to_string(),
        }
    }
}

impl fmt::Display for PythonFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "python{}{}", self.operator.as_str(), self.version)
    }
}
