// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt list` - List the manifest's commands

use crate::output::{self, OutputFormat};
use crate::project::{Project, ProjectArgs};
use anyhow::Result;
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct CommandInfo {
    name: String,
    /// Unresolved image template
    image: String,
    steps: usize,
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {:<40} {}", self.name, self.image, self.steps)
    }
}

pub fn handle(project: &ProjectArgs, format: OutputFormat) -> Result<()> {
    let project = Project::load(project)?;
    let manifest = &project.manifest;

    let commands: Vec<CommandInfo> = manifest
        .command_configs
        .values()
        .map(|command| CommandInfo {
            name: command.name.clone(),
            image: command
                .build_image
                .as_ref()
                .or(manifest.image_name.as_ref())
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
            steps: command.build_steps.len(),
        })
        .collect();

    if format == OutputFormat::Text {
        if commands.is_empty() {
            println!("No commands");
            return Ok(());
        }
        println!("{:<20} {:<40} STEPS", "COMMAND", "IMAGE");
    }
    output::print_list(&commands, format)
}
