// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML parsing for manifests (syntactic layer).
//!
//! This module turns manifest text into a [`Manifest`]. Shape errors
//! (wrong types, duplicate command names) surface here; semantic checks
//! are the validator's job.

use super::types::Manifest;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax or shape error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The document is not a mapping
    #[error("invalid manifest: {0}")]
    InvalidFormat(String),

    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a manifest from YAML text.
///
/// An empty document parses to an empty manifest.
pub fn parse_manifest(content: &str) -> Result<Manifest, ParseError> {
    let value: serde_yml::Value = serde_yml::from_str(content)?;
    match value {
        serde_yml::Value::Null => Ok(Manifest::default()),
        serde_yml::Value::Mapping(_) => Ok(serde_yml::from_str(content)?),
        other => Err(ParseError::InvalidFormat(format!(
            "root must be a mapping, found {}",
            describe(&other)
        ))),
    }
}

/// Parse a manifest from a YAML file.
pub fn parse_manifest_file(path: &Path) -> Result<Manifest, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_manifest(&content)
}

/// Serialize a manifest back to YAML.
pub fn to_yaml(manifest: &Manifest) -> Result<String, ParseError> {
    Ok(serde_yml::to_string(manifest)?)
}

fn describe(value: &serde_yml::Value) -> &'static str {
    match value {
        serde_yml::Value::Sequence(_) => "a sequence",
        serde_yml::Value::Mapping(_) => "a mapping",
        serde_yml::Value::Null => "null",
        _ => "a scalar",
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
