//! Dependency-set computation and repository resolution
//!
//! This module provides:
//! - Aggregation of candidate requirements across metadata files by scope
//! - Self-reference exclusion for the input packages
//! - Resolution of candidates against a package index with bounded concurrency

mod aggregate;
mod resolver;

pub use aggregate::{aggregate, exclude_own_packages};
pub use resolver::{
    LookupPolicy, ResolutionResult, ResolveConfig, Resolver, DEFAULT_CONCURRENCY,
};
