// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading: parse then validate.

use super::parser::{parse_manifest, parse_manifest_file, ParseError};
use super::validator::{validate_manifest_with_roots, ValidatedManifest, ValidationErrors};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

/// Parse and validate manifest text.
pub fn load_manifest(content: &str) -> Result<ValidatedManifest, LoadError> {
    let manifest = parse_manifest(content)?;
    Ok(validate_manifest_with_roots(&manifest, &BTreeSet::new())?)
}

/// Parse and validate a manifest file.
///
/// `extra_roots` names context roots supplied beyond the standard ones
/// (e.g. from configuration), so references to them do not warn.
pub fn load_manifest_file(
    path: &Path,
    extra_roots: &BTreeSet<String>,
) -> Result<ValidatedManifest, LoadError> {
    tracing::debug!(path = %path.display(), "loading manifest");
    let manifest = parse_manifest_file(path)?;
    let validated = validate_manifest_with_roots(&manifest, extra_roots)?;
    tracing::debug!(
        commands = validated.manifest.command_configs.len(),
        jenkins = validated.manifest.jenkins_templates.len(),
        warnings = validated.warnings.len(),
        "manifest loaded"
    );
    Ok(validated)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
