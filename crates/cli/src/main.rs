// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! newt - build manifest CLI

mod commands;
mod completions;
mod error;
mod git;
mod output;
mod project;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, dump, jenkins, list, render, show};
use completions::CompletionsArgs;
use error::NewtError;
use output::OutputFormat;
use project::ProjectArgs;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "newt",
    version,
    about = "newt - Inspect and resolve .newt.yml build manifests"
)]
struct Cli {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Debug logging (overridden by NEWT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest
    Check(check::CheckArgs),
    /// List commands with their image and step count
    List,
    /// Show a command with templates resolved
    Show(show::ShowArgs),
    /// Resolve a template string against the manifest context
    Render(render::RenderArgs),
    /// Show Jenkins jobs with names resolved
    Jenkins(jenkins::JenkinsArgs),
    /// Print the parsed manifest
    Dump,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<NewtError>() {
                Some(newt) => eprint!("{}", newt),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let project = &cli.project;
    let format = cli.format;

    match cli.command {
        Commands::Check(args) => return check::handle(args, project, format),
        Commands::List => list::handle(project, format)?,
        Commands::Show(args) => show::handle(args, project, format)?,
        Commands::Render(args) => render::handle(args, project, format)?,
        Commands::Jenkins(args) => jenkins::handle(args, project, format)?,
        Commands::Dump => dump::handle(project, format)?,
        Commands::Completions(args) => completions::generate_completions::<Cli>(args.shell),
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr, filtered by `NEWT_LOG` (default `warn`, or `debug` with `-v`).
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("NEWT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
