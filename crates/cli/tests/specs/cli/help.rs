//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Project::empty()
        .newt()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("render")
        .stdout_has("jenkins")
        .stdout_has("dump")
        .stdout_has("completions");
}

#[test]
fn help_lists_global_options() {
    Project::empty()
        .newt()
        .args(&["--help"])
        .passes()
        .stdout_has("--file")
        .stdout_has("--set")
        .stdout_has("--git-branch")
        .stdout_has("--format");
}

#[test]
fn version_prints_name() {
    Project::empty()
        .newt()
        .args(&["--version"])
        .passes()
        .stdout_has("newt ");
}

#[test]
fn completions_for_bash() {
    Project::empty()
        .newt()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_newt");
}

#[test]
fn completions_need_no_manifest() {
    Project::empty()
        .newt()
        .args(&["completions", "zsh"])
        .passes()
        .stdout_has("#compdef newt");
}
