// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration.
//!
//! An optional TOML file supplying defaults for the CLI and extra template
//! context:
//!
//! ```toml
//! manifest = ".newt.yml"
//! org = "~eng"
//! git_branch = "main"
//!
//! [context]
//! Platform = { Version = "1.2" }
//! ```

use crate::template::{Context, ContextValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or schema error
    #[error("TOML error in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewtConfig {
    /// Manifest file name used when `--file` is not given
    pub manifest: Option<String>,
    pub name: Option<String>,
    pub org: Option<String>,
    pub git_branch: Option<String>,
    /// Values merged into the template context
    pub context: toml::Table,
}

impl NewtConfig {
    /// Parse configuration text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: origin.to_string(),
            source,
        })
    }

    /// Load configuration from a file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), roots = config.context.len(), "loaded config");
        Ok(config)
    }

    /// Find and load configuration.
    ///
    /// An explicit path (from `--config` or `NEWT_CONFIG`) must exist. Without
    /// one, the user config file is read if present, else defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The `[context]` table as template context.
    pub fn context(&self) -> Context {
        Context::from_value(ContextValue::from(&toml::Value::Table(self.context.clone())))
    }

    /// Context roots this configuration supplies.
    pub fn context_roots(&self) -> BTreeSet<String> {
        self.context.keys().cloned().collect()
    }
}

/// `<config_dir>/newt/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("newt").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
