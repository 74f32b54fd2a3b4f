// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt dump` - Re-serialize the parsed manifest

use crate::output::OutputFormat;
use crate::project::{read_manifest, ProjectArgs};
use anyhow::Result;
use newt_core::manifest::to_yaml;

pub fn handle(project: &ProjectArgs, format: OutputFormat) -> Result<()> {
    let (path, manifest) = read_manifest(project)?;
    tracing::debug!(path = %path.display(), "dumping manifest");
    match format {
        OutputFormat::Text => print!("{}", to_yaml(&manifest)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&manifest)?),
    }
    Ok(())
}
