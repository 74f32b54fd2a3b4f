// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of manifest templates into concrete commands and jobs.

use super::context::command_context;
use super::types::Manifest;
use crate::template::{resolve_template, Context, TemplateError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while resolving a manifest.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown command: {name}")]
    UnknownCommand {
        name: String,
        /// Close matches among the defined commands
        suggestions: Vec<String>,
    },

    #[error("no image for command '{0}': set build-image or image-name")]
    NoImage(String),

    #[error("failed to resolve {location}: {source}")]
    Template {
        location: String,
        #[source]
        source: TemplateError,
    },
}

/// A command with every template resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPlan {
    pub name: String,
    /// `build-image`, or the manifest's `image-name`
    pub image: String,
    pub image_cache: bool,
    pub install_tools: bool,
    pub setup: Vec<String>,
    pub pre_commands: BTreeMap<String, Vec<String>>,
    pub steps: Vec<String>,
    pub volumes: Vec<String>,
    pub tool_versions: BTreeMap<String, String>,
}

impl fmt::Display for CommandPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command: {}", self.name)?;
        writeln!(f, "  Image: {}", self.image)?;
        if !self.tool_versions.is_empty() {
            writeln!(f, "  Tools:")?;
            for (tool, version) in &self.tool_versions {
                writeln!(f, "    {}: {}", tool, version)?;
            }
        }
        write_lines(f, "Setup", &self.setup)?;
        for (target, lines) in &self.pre_commands {
            write_lines(f, &format!("Before {}", target), lines)?;
        }
        write_lines(f, "Steps", &self.steps)?;
        write_lines(f, "Volumes", &self.volumes)
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, title: &str, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {}:", title)?;
    for line in lines {
        writeln!(f, "    {}", line)?;
    }
    Ok(())
}

/// A Jenkins job binding with its name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JenkinsJob {
    pub name: String,
    pub template: String,
    pub raw: bool,
    pub enabled: bool,
}

impl fmt::Display for JenkinsJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.name, self.template)?;
        if self.raw {
            write!(f, " (raw)")?;
        }
        if !self.enabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

fn resolve_at(location: String, text: &str, context: &Context) -> Result<String, ResolveError> {
    resolve_template(text, context).map_err(|source| ResolveError::Template { location, source })
}

fn resolve_all(
    prefix: &str,
    lines: &[String],
    context: &Context,
) -> Result<Vec<String>, ResolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| resolve_at(format!("{}[{}]", prefix, i), line, context))
        .collect()
}

/// Resolve one command against the manifest context.
///
/// Top-level `build-setup` runs before the command's own setup lines.
pub fn resolve_command(
    manifest: &Manifest,
    name: &str,
    context: &Context,
) -> Result<CommandPlan, ResolveError> {
    let command = manifest
        .get_command(name)
        .ok_or_else(|| ResolveError::UnknownCommand {
            name: name.to_string(),
            suggestions: suggest_commands(manifest, name),
        })?;

    let context = command_context(command, context).map_err(|source| ResolveError::Template {
        location: format!("command-configs.{}.params", name),
        source,
    })?;
    let prefix = format!("command-configs.{}", name);

    let image = match command.build_image.as_ref().or(manifest.image_name.as_ref()) {
        Some(image) => resolve_at(format!("{}.build-image", prefix), image, &context)?,
        None => return Err(ResolveError::NoImage(name.to_string())),
    };

    let mut setup = resolve_all("build-setup", &manifest.build_setup, &context)?;
    setup.extend(resolve_all(
        &format!("{}.build-setup", prefix),
        &command.build_setup,
        &context,
    )?);

    let mut pre_commands = BTreeMap::new();
    for (target, lines) in &command.pre_commands {
        let resolved = resolve_all(
            &format!("{}.pre-commands.{}", prefix, target),
            lines,
            &context,
        )?;
        pre_commands.insert(target.clone(), resolved);
    }

    let steps = resolve_all(&format!("{}.build-steps", prefix), &command.build_steps, &context)?;
    let volumes = resolve_all(&format!("{}.dev-volumes", prefix), &command.dev_volumes, &context)?;

    let mut tool_versions = manifest.tool_versions.clone();
    tool_versions.extend(command.tool_versions.clone());

    tracing::debug!(command = name, steps = steps.len(), "resolved command");

    Ok(CommandPlan {
        name: name.to_string(),
        image,
        image_cache: command.build_image_cache.unwrap_or(false),
        install_tools: command.install_tools.unwrap_or(false),
        setup,
        pre_commands,
        steps,
        volumes,
        tool_versions,
    })
}

/// Resolve Jenkins job names; disabled jobs are skipped unless `include_disabled`.
pub fn resolve_jenkins(
    manifest: &Manifest,
    context: &Context,
    include_disabled: bool,
) -> Result<Vec<JenkinsJob>, ResolveError> {
    let mut jobs = Vec::new();
    for (i, binding) in manifest.jenkins_templates.iter().enumerate() {
        let enabled = binding.is_enabled();
        if !enabled && !include_disabled {
            continue;
        }
        let name = resolve_at(
            format!("jenkins-templates[{}].name", i),
            &binding.name,
            context,
        )?;
        jobs.push(JenkinsJob {
            name,
            template: binding.template.clone(),
            raw: binding.raw,
            enabled,
        });
    }
    Ok(jobs)
}

/// Resolve the manifest's package name, if it has one.
pub fn resolve_package_name(
    manifest: &Manifest,
    context: &Context,
) -> Result<Option<String>, ResolveError> {
    manifest
        .package_name
        .as_deref()
        .map(|name| resolve_at("package-name".to_string(), name, context))
        .transpose()
}

/// Commands whose names share a word with, or contain, the requested name.
fn suggest_commands(manifest: &Manifest, requested: &str) -> Vec<String> {
    let wanted: Vec<&str> = requested.split_whitespace().collect();
    manifest
        .command_names()
        .filter(|name| {
            name.contains(requested)
                || name
                    .split_whitespace()
                    .any(|word| wanted.contains(&word))
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
