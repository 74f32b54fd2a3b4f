// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt show <command>` - Show a command with templates resolved

use crate::error::NewtError;
use crate::output::{self, OutputFormat};
use crate::project::{Project, ProjectArgs};
use anyhow::Result;
use clap::Args;
use newt_core::manifest::{resolve_command, ResolveError};

#[derive(Args)]
pub struct ShowArgs {
    /// Command name (e.g., "build staging")
    pub command: String,
}

pub fn handle(args: ShowArgs, project: &ProjectArgs, format: OutputFormat) -> Result<()> {
    let project = Project::load(project)?;
    let context = project.context()?;

    let plan = resolve_command(&project.manifest, &args.command, &context).map_err(|e| match e {
        ResolveError::UnknownCommand { name, suggestions } => {
            NewtError::unknown_command(&name, &suggestions)
        }
        ResolveError::Template { location, source } => NewtError::unresolved(&location, source),
        other => NewtError::new(other.to_string()),
    })?;

    output::print(&plan, format)
}
