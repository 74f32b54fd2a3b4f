// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic validation for manifests.
//!
//! Errors make a manifest unusable: missing required fields, blank command
//! names, malformed volumes, template syntax errors. Warnings flag things
//! that may still work against a richer runtime context, such as template
//! references to context roots this tool does not supply.

use super::context::STANDARD_ROOTS;
use super::types::Manifest;
use crate::template::Template;
use std::collections::BTreeSet;

/// Result of validation
pub type ValidationResult = Result<ValidatedManifest, ValidationErrors>;

/// A manifest that has passed validation, plus any warnings raised.
#[derive(Debug, Clone)]
pub struct ValidatedManifest {
    pub manifest: Manifest,
    pub warnings: Vec<ValidationWarning>,
}

/// Collection of validation errors
#[derive(Debug, Clone)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Manifest validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing required field
    MissingRequired {
        item_kind: &'static str,
        item_name: String,
        field: &'static str,
    },
    /// Command name is empty or whitespace
    EmptyCommandName,
    /// Volume mount without a `host:container` separator
    InvalidVolume { command: String, volume: String },
    /// A templated string does not parse
    TemplateSyntax { location: String, message: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequired {
                item_kind,
                item_name,
                field,
            } => {
                if item_name.is_empty() {
                    write!(f, "{} missing required field '{}'", item_kind, field)
                } else {
                    write!(
                        f,
                        "{} '{}' missing required field '{}'",
                        item_kind, item_name, field
                    )
                }
            }
            ValidationError::EmptyCommandName => {
                write!(f, "command-configs contains an empty command name")
            }
            ValidationError::InvalidVolume { command, volume } => write!(
                f,
                "Invalid dev-volume '{}' in command '{}' (expected host:container[:mode])",
                volume, command
            ),
            ValidationError::TemplateSyntax { location, message } => {
                write!(f, "Template error in {}: {}", location, message)
            }
        }
    }
}

/// A non-fatal finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Top-level key this tool does not model
    UnknownKey(String),
    /// Template reads a context root that is not supplied by default
    UnknownContextRoot { location: String, root: String },
    /// Pre-command keyed by a name that matches no command
    UnknownPreCommand { command: String, key: String },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::UnknownKey(key) => write!(f, "Unknown top-level key '{}'", key),
            ValidationWarning::UnknownContextRoot { location, root } => write!(
                f,
                "{} references '.{}', which is not in the standard context",
                location, root
            ),
            ValidationWarning::UnknownPreCommand { command, key } => write!(
                f,
                "Command '{}' has pre-commands for unknown command '{}'",
                command, key
            ),
        }
    }
}

/// Validate a manifest against the standard context roots.
pub fn validate_manifest(manifest: &Manifest) -> ValidationResult {
    validate_manifest_with_roots(manifest, &BTreeSet::new())
}

/// Validate a manifest, treating `extra_roots` as supplied context roots
/// in addition to the standard ones.
pub fn validate_manifest_with_roots(
    manifest: &Manifest,
    extra_roots: &BTreeSet<String>,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    validate_required(manifest, &mut errors);
    validate_commands(manifest, &mut errors, &mut warnings);
    validate_jenkins(manifest, &mut errors);
    validate_templates(manifest, extra_roots, &mut errors, &mut warnings);

    for key in manifest.extra.keys() {
        warnings.push(ValidationWarning::UnknownKey(key.clone()));
    }

    if errors.is_empty() {
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(ValidatedManifest {
            manifest: manifest.clone(),
            warnings,
        })
    } else {
        Err(ValidationErrors { errors })
    }
}

fn validate_required(manifest: &Manifest, errors: &mut Vec<ValidationError>) {
    let required = [
        ("app-type", &manifest.app_type),
        ("image-name", &manifest.image_name),
    ];
    for (field, value) in required {
        if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
            errors.push(ValidationError::MissingRequired {
                item_kind: "manifest",
                item_name: String::new(),
                field,
            });
        }
    }
}

fn validate_commands(
    manifest: &Manifest,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationWarning>,
) {
    // Pre-commands may target a full command name or its verb ("build" for "build staging").
    let mut known: BTreeSet<&str> = BTreeSet::new();
    for name in manifest.command_names() {
        known.insert(name);
        if let Some(verb) = name.split_whitespace().next() {
            known.insert(verb);
        }
    }

    for (name, command) in &manifest.command_configs {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
        }

        for volume in &command.dev_volumes {
            let mut parts = volume.split(':');
            let host = parts.next().unwrap_or_default();
            let container = parts.next().unwrap_or_default();
            if host.trim().is_empty() || container.trim().is_empty() {
                errors.push(ValidationError::InvalidVolume {
                    command: name.clone(),
                    volume: volume.clone(),
                });
            }
        }

        for key in command.pre_commands.keys() {
            if !known.contains(key.as_str()) {
                warnings.push(ValidationWarning::UnknownPreCommand {
                    command: name.clone(),
                    key: key.clone(),
                });
            }
        }
    }
}

fn validate_jenkins(manifest: &Manifest, errors: &mut Vec<ValidationError>) {
    for (i, job) in manifest.jenkins_templates.iter().enumerate() {
        let item_name = format!("jenkins-templates[{}]", i);
        if job.name.trim().is_empty() {
            errors.push(ValidationError::MissingRequired {
                item_kind: "jenkins template",
                item_name: item_name.clone(),
                field: "name",
            });
        }
        if job.template.trim().is_empty() {
            errors.push(ValidationError::MissingRequired {
                item_kind: "jenkins template",
                item_name,
                field: "template",
            });
        }
    }
}

fn validate_templates(
    manifest: &Manifest,
    extra_roots: &BTreeSet<String>,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationWarning>,
) {
    for (location, text) in templated_strings(manifest) {
        match Template::parse(text) {
            Ok(template) => {
                for root in template.field_roots() {
                    if !STANDARD_ROOTS.contains(&root.as_str()) && !extra_roots.contains(&root) {
                        warnings.push(ValidationWarning::UnknownContextRoot {
                            location: location.clone(),
                            root,
                        });
                    }
                }
            }
            Err(e) => errors.push(ValidationError::TemplateSyntax {
                location,
                message: e.to_string(),
            }),
        }
    }
}

/// Every string in the manifest that may contain template expressions,
/// paired with a human-readable location.
pub fn templated_strings(manifest: &Manifest) -> Vec<(String, &str)> {
    let mut out: Vec<(String, &str)> = Vec::new();

    if let Some(image) = &manifest.image_name {
        out.push(("image-name".to_string(), image));
    }
    if let Some(name) = &manifest.package_name {
        out.push(("package-name".to_string(), name));
    }
    for (key, value) in &manifest.params {
        out.push((format!("params.{}", key), value));
    }
    for (i, line) in manifest.build_setup.iter().enumerate() {
        out.push((format!("build-setup[{}]", i), line));
    }

    for (name, command) in &manifest.command_configs {
        let prefix = format!("command-configs.{}", name);
        if let Some(image) = &command.build_image {
            out.push((format!("{}.build-image", prefix), image));
        }
        for (key, value) in &command.params {
            out.push((format!("{}.params.{}", prefix, key), value));
        }
        for (i, line) in command.build_setup.iter().enumerate() {
            out.push((format!("{}.build-setup[{}]", prefix, i), line));
        }
        for (key, lines) in &command.pre_commands {
            for (i, line) in lines.iter().enumerate() {
                out.push((format!("{}.pre-commands.{}[{}]", prefix, key, i), line));
            }
        }
        for (i, line) in command.build_steps.iter().enumerate() {
            out.push((format!("{}.build-steps[{}]", prefix, i), line));
        }
        for (i, volume) in command.dev_volumes.iter().enumerate() {
            out.push((format!("{}.dev-volumes[{}]", prefix, i), volume));
        }
    }

    for (i, job) in manifest.jenkins_templates.iter().enumerate() {
        out.push((format!("jenkins-templates[{}].name", i), &job.name));
    }

    out
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
