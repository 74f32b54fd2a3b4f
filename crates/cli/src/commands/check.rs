// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `newt check` - Validate the manifest

use crate::output::OutputFormat;
use crate::project::{require_manifest, ProjectArgs};
use anyhow::Result;
use clap::Args;
use newt_core::manifest::{parse_manifest_file, validate_manifest_with_roots};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Args)]
pub struct CheckArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct CheckReport {
    file: String,
    valid: bool,
    commands: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

pub fn handle(args: CheckArgs, project: &ProjectArgs, format: OutputFormat) -> Result<ExitCode> {
    let config = project.load_config()?;
    let path = project.manifest_path(&config);
    require_manifest(&path)?;
    let manifest = parse_manifest_file(&path)?;

    let mut report = CheckReport {
        file: path.display().to_string(),
        valid: true,
        commands: manifest.command_configs.len(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };
    match validate_manifest_with_roots(&manifest, &project.extra_roots(&config)) {
        Ok(validated) => {
            report.warnings = validated.warnings.iter().map(ToString::to_string).collect();
        }
        Err(errors) => {
            report.valid = false;
            report.errors = errors.errors.iter().map(ToString::to_string).collect();
        }
    }
    let failed = !report.valid || (args.strict && !report.warnings.is_empty());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            for error in &report.errors {
                println!("error: {}", error);
            }
            if report.valid {
                println!(
                    "{}: ok ({} commands, {} warning(s))",
                    report.file,
                    report.commands,
                    report.warnings.len()
                );
            } else {
                println!("{}: {} error(s)", report.file, report.errors.len());
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
