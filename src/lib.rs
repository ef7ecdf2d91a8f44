//! conda-envgen - conda environment generator library
//!
//! This library reconciles a Python package's declared dependencies with a
//! conda environment:
//! - Reads pyproject.toml metadata (PEP 621 or flit)
//! - Selects base and extra dependencies by scope
//! - Resolves each requirement against a conda channel
//! - Assembles an environment.yml with a pip fallback block

pub mod cli;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolve;
