// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The standard template context built from a manifest.

use super::types::{CommandConfig, Manifest};
use crate::template::{resolve_template, Context, ContextValue, TemplateError};
use std::collections::BTreeMap;

/// Context roots supplied by [`manifest_context`].
pub const STANDARD_ROOTS: &[&str] = &[
    "AppType",
    "GitBranch",
    "ImageName",
    "Name",
    "Org",
    "PackageName",
    "PackageRoot",
    "Params",
    "Python",
    "ToolVersions",
    "User",
];

/// Runtime values that do not come from the manifest itself.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Project name (`.Name`)
    pub name: Option<String>,
    /// Organization (`.Org.Value`), e.g. `~eng`
    pub org: Option<String>,
    /// Current branch (`.GitBranch`)
    pub git_branch: Option<String>,
    /// Additional values merged over the standard context
    pub overrides: Context,
}

/// Build the standard context for resolving manifest templates.
///
/// `Params` values are templates themselves; they are resolved against the
/// base context (everything except `Params` and `PackageName`). The package
/// name is resolved last so it may use `.Params`.
pub fn manifest_context(
    manifest: &Manifest,
    options: &ContextOptions,
) -> Result<Context, TemplateError> {
    let mut context = Context::new();

    if let Some(name) = &options.name {
        context.set_string("Name", name.clone());
    }
    if let Some(org) = &options.org {
        context.set_path("Org.Value", org.clone());
    }
    if let Some(branch) = &options.git_branch {
        context.set_string("GitBranch", branch.clone());
    }
    for (key, value) in [
        ("AppType", &manifest.app_type),
        ("ImageName", &manifest.image_name),
        ("PackageRoot", &manifest.package_root),
        ("User", &manifest.user),
    ] {
        if let Some(value) = value {
            context.set_string(key, value.clone());
        }
    }

    context.set_value("ToolVersions", manifest.tool_versions.clone());

    let python = manifest.python.clone().unwrap_or_default();
    let mut python_value = BTreeMap::new();
    python_value.insert(
        "TestVersions".to_string(),
        ContextValue::from(python.test_versions),
    );
    if let Some(file) = python.requirements_file {
        python_value.insert("RequirementsFile".to_string(), ContextValue::from(file));
    }
    if let Some(venv) = python.virtualenv {
        python_value.insert("Virtualenv".to_string(), ContextValue::from(venv));
    }
    context.set_value("Python", ContextValue::Object(python_value));

    // Overrides apply before params resolve so params can reference them.
    context.merge(options.overrides.clone());

    let params = resolve_params(&manifest.params, &context)?;
    context.set_value("Params", params);
    if let Some(ContextValue::Object(extra)) = options.overrides.get("Params") {
        context.merge(Context::new().with_object("Params", extra.clone()));
    }

    if let Some(package_name) = &manifest.package_name {
        let resolved = resolve_template(package_name, &context)?;
        context.set_string("PackageName", resolved);
    }

    tracing::debug!(name = ?options.name, params = manifest.params.len(), "built manifest context");
    Ok(context)
}

/// Layer a command's params and tool versions over a base context.
pub fn command_context(
    command: &CommandConfig,
    base: &Context,
) -> Result<Context, TemplateError> {
    let mut context = base.clone();
    if !command.tool_versions.is_empty() {
        context.merge(
            Context::new().with_value("ToolVersions", command.tool_versions.clone()),
        );
    }
    if !command.params.is_empty() {
        let params = resolve_params(&command.params, &context)?;
        context.merge(Context::new().with_value("Params", params));
    }
    Ok(context)
}

fn resolve_params(
    params: &BTreeMap<String, String>,
    context: &Context,
) -> Result<ContextValue, TemplateError> {
    let mut resolved = BTreeMap::new();
    for (key, value) in params {
        resolved.insert(
            key.clone(),
            ContextValue::String(resolve_template(value, context)?),
        );
    }
    Ok(ContextValue::Object(resolved))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
