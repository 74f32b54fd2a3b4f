// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest types that mirror the YAML structure.
//!
//! Field names follow the manifest's kebab-case keys. Optional fields stay
//! `None`/empty when absent and are skipped on serialization, so a parsed
//! manifest writes back out without gaining keys.

use super::scalar;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The whole manifest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Manifest {
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tty: Option<bool>,
    /// Shell commands run once per image build
    #[serde(deserialize_with = "scalar::string_list", skip_serializing_if = "Vec::is_empty")]
    pub build_setup: Vec<String>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Templated package name
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub package_root: Option<String>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub package_postinstall_file: Option<String>,
    /// Package name to version constraint; an empty constraint means any version
    #[serde(deserialize_with = "scalar::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub package_requires: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_metatron: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_privileged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ssh_agent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<bool>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Build parameters, available to templates as `.Params`
    #[serde(deserialize_with = "scalar::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PythonConfig>,
    #[serde(deserialize_with = "scalar::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub tool_versions: BTreeMap<String, String>,
    #[serde(deserialize_with = "command_configs", skip_serializing_if = "BTreeMap::is_empty")]
    pub command_configs: BTreeMap<String, CommandConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jenkins_templates: Vec<JenkinsTemplate>,
    /// Keys this tool does not model, kept so they survive a round-trip
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

impl Manifest {
    /// Get a command definition by name
    pub fn get_command(&self, name: &str) -> Option<&CommandConfig> {
        self.command_configs.get(name)
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.command_configs.keys().map(String::as_str)
    }

    /// Jenkins templates that are not disabled
    pub fn enabled_jenkins_templates(&self) -> impl Iterator<Item = &JenkinsTemplate> {
        self.jenkins_templates.iter().filter(|t| t.is_enabled())
    }
}

fn command_configs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, CommandConfig>, D::Error> {
    let mut configs: BTreeMap<String, CommandConfig> =
        scalar::unique_map(deserializer, "command")?;
    for (name, config) in configs.iter_mut() {
        config.name = name.clone();
    }
    Ok(configs)
}

/// Python toolchain settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PythonConfig {
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub requirements_file: Option<String>,
    /// Interpreter versions to test against, e.g. `["2.7", "3.6"]`.
    ///
    /// Quote them in YAML: an unquoted `3.10` is a float and reads back as `"3.1"`.
    #[serde(deserialize_with = "scalar::string_list", skip_serializing_if = "Vec::is_empty")]
    pub test_versions: Vec<String>,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub virtualenv: Option<String>,
}

/// A named command pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommandConfig {
    /// Taken from the `command-configs` key
    #[serde(skip)]
    pub name: String,
    #[serde(deserialize_with = "scalar::opt_string", skip_serializing_if = "Option::is_none")]
    pub build_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_image_cache: Option<bool>,
    #[serde(deserialize_with = "scalar::string_list", skip_serializing_if = "Vec::is_empty")]
    pub build_setup: Vec<String>,
    #[serde(deserialize_with = "scalar::string_list", skip_serializing_if = "Vec::is_empty")]
    pub build_steps: Vec<String>,
    #[serde(deserialize_with = "scalar::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// `host:container[:mode]` mounts used in development
    #[serde(deserialize_with = "scalar::string_list", skip_serializing_if = "Vec::is_empty")]
    pub dev_volumes: Vec<String>,
    /// Shell lines to run before the named command
    #[serde(
        deserialize_with = "scalar::string_list_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub pre_commands: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_tools: Option<bool>,
    #[serde(deserialize_with = "scalar::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub tool_versions: BTreeMap<String, String>,
}

/// A Jenkins job binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JenkinsTemplate {
    /// Templated job name
    #[serde(deserialize_with = "scalar::string")]
    pub name: String,
    /// Path to the job's XML template
    #[serde(deserialize_with = "scalar::string")]
    pub template: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub raw: bool,
    /// Non-empty means disabled; the text is usually the reason
    #[serde(deserialize_with = "scalar::string", skip_serializing_if = "String::is_empty")]
    pub disabled: String,
}

impl JenkinsTemplate {
    pub fn is_enabled(&self) -> bool {
        self.disabled.trim().is_empty()
    }
}
