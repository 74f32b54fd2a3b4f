// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and loading the project manifest with its runtime context.

use crate::error::NewtError;
use crate::git;
use anyhow::Result;
use clap::Args;
use newt_core::manifest::{
    load_manifest_file, manifest_context, parse_manifest_file, ContextOptions, LoadError,
};
use newt_core::{Context, ContextValue, Manifest, NewtConfig};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Manifest file used when neither `--file` nor config names one.
pub const DEFAULT_MANIFEST: &str = ".newt.yml";

/// Options shared by every command that reads the manifest.
#[derive(Args, Clone, Debug, Default)]
pub struct ProjectArgs {
    /// Manifest file [default: .newt.yml]
    #[arg(short = 'f', long = "file", global = true, env = "NEWT_FILE")]
    pub file: Option<PathBuf>,

    /// Config file [default: <config dir>/newt/config.toml]
    #[arg(long, global = true, env = "NEWT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Context value, e.g. Params.Flavor=beta (repeatable; JSON lists and maps allowed)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val, global = true)]
    pub set: Vec<(String, String)>,

    /// Project name (.Name) [default: manifest directory name]
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Organization (.Org.Value)
    #[arg(long, global = true)]
    pub org: Option<String>,

    /// Branch (.GitBranch) [default: current git branch]
    #[arg(long = "git-branch", global = true)]
    pub git_branch: Option<String>,
}

pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    let key = s[..pos].trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(format!("invalid key in `{s}`"));
    }
    Ok((key.to_string(), s[pos + 1..].to_string()))
}

impl ProjectArgs {
    pub fn load_config(&self) -> Result<NewtConfig> {
        Ok(NewtConfig::discover(self.config.as_deref())?)
    }

    /// `--file`, else the config's `manifest`, else `.newt.yml`.
    pub fn manifest_path(&self, config: &NewtConfig) -> PathBuf {
        self.file
            .clone()
            .or_else(|| config.manifest.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }

    /// Config `[context]` with `--set` values layered on top.
    pub fn overrides(&self, config: &NewtConfig) -> Context {
        let mut context = config.context();
        for (key, value) in &self.set {
            context.set_path(key, ContextValue::parse_cli(value));
        }
        context
    }

    /// Context roots supplied beyond the standard ones.
    pub fn extra_roots(&self, config: &NewtConfig) -> BTreeSet<String> {
        let mut roots = config.context_roots();
        for (key, _) in &self.set {
            if let Some(root) = key.split('.').next() {
                roots.insert(root.to_string());
            }
        }
        roots
    }

    /// Runtime context values; flags win over config.
    pub fn context_options(&self, config: &NewtConfig, manifest_path: &Path) -> ContextOptions {
        let dir = manifest_dir(manifest_path);
        let git_branch = self
            .git_branch
            .clone()
            .or_else(|| config.git_branch.clone())
            .or_else(|| git::current_branch(&dir));
        ContextOptions {
            name: self
                .name
                .clone()
                .or_else(|| config.name.clone())
                .or_else(|| dir_name(&dir)),
            org: self.org.clone().or_else(|| config.org.clone()),
            git_branch,
            overrides: self.overrides(config),
        }
    }
}

fn manifest_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn dir_name(dir: &Path) -> Option<String> {
    let dir = dir.canonicalize().ok()?;
    dir.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Fail with a friendly error when the manifest is missing.
pub fn require_manifest(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(NewtError::manifest_not_found(path).into());
    }
    Ok(())
}

/// Parse a manifest without validating it.
pub fn read_manifest(args: &ProjectArgs) -> Result<(PathBuf, Manifest)> {
    let config = args.load_config()?;
    let path = args.manifest_path(&config);
    require_manifest(&path)?;
    let manifest = parse_manifest_file(&path)?;
    Ok((path, manifest))
}

/// A validated manifest with the options to build its context.
///
/// Context options are computed on first use, since finding the branch
/// shells out to git.
#[derive(Debug)]
pub struct Project {
    pub path: PathBuf,
    pub manifest: Manifest,
    args: ProjectArgs,
    config: NewtConfig,
    options: OnceCell<ContextOptions>,
}

impl Project {
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let config = args.load_config()?;
        let path = args.manifest_path(&config);
        require_manifest(&path)?;

        let validated = match load_manifest_file(&path, &args.extra_roots(&config)) {
            Ok(validated) => validated,
            Err(LoadError::Validation(errors)) => {
                let lines: Vec<String> = errors.errors.iter().map(ToString::to_string).collect();
                return Err(NewtError::invalid_manifest(&path, &lines).into());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            manifest: validated.manifest,
            args: args.clone(),
            config,
            options: OnceCell::new(),
        })
    }

    pub fn options(&self) -> &ContextOptions {
        self.options
            .get_or_init(|| self.args.context_options(&self.config, &self.path))
    }

    /// The standard context for this manifest.
    pub fn context(&self) -> Result<Context> {
        manifest_context(&self.manifest, self.options())
            .map_err(|e| NewtError::unresolved("the manifest context", e).into())
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
