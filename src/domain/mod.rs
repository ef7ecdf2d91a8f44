//! Core domain models for conda-envgen
//!
//! This module contains the fundamental types used throughout the application:
//! - Requirement strings and package name extraction
//! - Dependency scope selection policy
//! - Python version floor derived from requires-python
//! - The generated conda environment description

mod environment;
mod python_floor;
mod requirement;
mod scope;

pub use environment::{
    DependencyEntry, EnvironmentConfig, EnvironmentDescription, DEFAULT_BUILD_TOOL, DEFAULT_CHANNEL,
};
pub use python_floor::{FloorOperator, PythonFloor};
pub use requirement::{extract_name, normalize_name, Requirement};
pub use scope::{DependencyScope, ALL_EXTRAS, DEVELOP_EXTRAS};
