// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

//! newt-core: Core library for the newt build manifest tool
//!
//! This crate provides:
//! - Manifest types, YAML parsing and validation
//! - A Go-template-style engine for templated manifest strings
//! - Resolution of commands and Jenkins jobs against a runtime context
//! - User configuration

pub mod config;
pub mod manifest;
pub mod template;

// Re-exports
pub use config::{ConfigError, NewtConfig};
pub use manifest::{
    load_manifest, load_manifest_file, manifest_context, parse_manifest, parse_manifest_file,
    resolve_command, resolve_jenkins, resolve_package_name, to_yaml, CommandConfig, CommandPlan,
    ContextOptions, JenkinsJob, JenkinsTemplate, LoadError, Manifest, ParseError, PythonConfig,
    ResolveError, ValidatedManifest, ValidationError, ValidationErrors, ValidationWarning,
};
pub use template::{resolve_template, Context, ContextValue, Template, TemplateError};
