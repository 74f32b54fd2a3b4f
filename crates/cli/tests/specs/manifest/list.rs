//! `newt list` specs

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn lists_commands_with_images() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "list"])
        .passes()
        .stdout_has("COMMAND")
        .stdout_has("build staging")
        .stdout_has("{{.ImageName}}-build:{{.ToolVersions.mkwheel}}")
        .stdout_has("python:3.6-stretch")
        .stdout_has("publish debian");
}

#[test]
fn commands_listed_in_name_order() {
    let stdout = Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "list"])
        .passes()
        .stdout();
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|line| line[..20].trim_end())
        .collect();
    assert_eq!(
        names,
        vec![
            "build",
            "build staging",
            "package all",
            "package py27",
            "package py36",
            "publish debian",
            "pycharm",
            "test",
        ]
    );
}

#[test]
fn no_commands() {
    Project::with_manifest("app-type: x\nimage-name: y\n")
        .newt()
        .args(&["list"])
        .passes()
        .stdout_eq("No commands\n");
}

#[test]
fn json_list() {
    Project::with_manifest(MINIMAL_MANIFEST)
        .newt()
        .args(&["--format", "json", "list"])
        .passes()
        .stdout_has("\"name\": \"build\"")
        .stdout_has("\"image\": \"demo\"")
        .stdout_has("\"steps\": 1");
}
