// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt jenkins` - Show Jenkins job bindings with names resolved

use crate::error::NewtError;
use crate::output::{self, OutputFormat};
use crate::project::{Project, ProjectArgs};
use anyhow::Result;
use clap::Args;
use newt_core::manifest::{resolve_jenkins, ResolveError};

#[derive(Args)]
pub struct JenkinsArgs {
    /// Include disabled jobs
    #[arg(long)]
    pub all: bool,
}

pub fn handle(args: JenkinsArgs, project: &ProjectArgs, format: OutputFormat) -> Result<()> {
    let project = Project::load(project)?;
    let context = project.context()?;

    let jobs = resolve_jenkins(&project.manifest, &context, args.all).map_err(|e| match e {
        ResolveError::Template { location, source } => NewtError::unresolved(&location, source),
        other => NewtError::new(other.to_string()),
    })?;

    if jobs.is_empty() && format == OutputFormat::Text {
        println!("No jenkins jobs");
        return Ok(());
    }
    output::print_list(&jobs, format)
}
