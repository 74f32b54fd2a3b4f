// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest parsing, validation, and resolution.
//!
//! A manifest is a YAML file that declares named command pipelines for the
//! `newt` build tool. This module provides:
//!
//! - **types**: Data types that mirror the YAML structure
//! - **parser**: YAML parsing (syntactic layer)
//! - **validator**: Semantic validation
//! - **context**: The standard template context
//! - **resolver**: Template resolution into command plans and Jenkins jobs
//! - **loader**: Parse plus validate in one call
//!
//! # Architecture
//!
//! ```text
//! YAML file → parser → Manifest → validator → ValidatedManifest
//!                                     ↓
//!                     context → resolver → CommandPlan / JenkinsJob
//! ```

pub mod context;
pub mod loader;
pub mod parser;
pub mod resolver;
mod scalar;
pub mod types;
pub mod validator;

pub use context::{command_context, manifest_context, ContextOptions, STANDARD_ROOTS};
pub use loader::{load_manifest, load_manifest_file, LoadError};
pub use parser::{parse_manifest, parse_manifest_file, to_yaml, ParseError};
pub use resolver::{
    resolve_command, resolve_jenkins, resolve_package_name, CommandPlan, JenkinsJob, ResolveError,
};
pub use types::{CommandConfig, JenkinsTemplate, Manifest, PythonConfig};
pub use validator::{
    templated_strings, validate_manifest, validate_manifest_with_roots, ValidatedManifest,
    ValidationError, ValidationErrors, ValidationResult, ValidationWarning,
};
