// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt render <template>` - Resolve a string against the manifest context

use crate::error::NewtError;
use crate::output::{self, OutputFormat};
use crate::project::{Project, ProjectArgs};
use anyhow::Result;
use clap::Args;
use newt_core::resolve_template;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct RenderArgs {
    /// Template text, e.g. '{{.PackageRoot}}/bin'
    pub template: String,
}

#[derive(Serialize)]
struct Rendered {
    template: String,
    output: String,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output)
    }
}

pub fn handle(args: RenderArgs, project: &ProjectArgs, format: OutputFormat) -> Result<()> {
    let project = Project::load(project)?;
    let context = project.context()?;

    let output = resolve_template(&args.template, &context)
        .map_err(|e| NewtError::unresolved(&format!("'{}'", args.template), e))?;

    output::print(
        &Rendered {
            template: args.template,
            output,
        },
        format,
    )
}
