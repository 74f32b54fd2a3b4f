//! `newt render` specs

use crate::prelude::*;

#[test]
fn render_standard_path() {
    Project::mezzfs()
        .newt()
        .args(&[
            "--name",
            "mezzfs",
            "--set",
            "PackageRoot=/pkg",
            "render",
            "{{.PackageRoot}}/apps/{{.Name}}",
        ])
        .passes()
        .stdout_eq("/pkg/apps/mezzfs\n");
}

#[test]
fn render_with_functions() {
    Project::mezzfs()
        .newt()
        .args(&[
            "--name",
            "mezzfs",
            "render",
            "{{join .Python.TestVersions \",\"}} {{.PackageName | toUpper}}",
        ])
        .passes()
        .stdout_eq("2.7,3.6 MEZZFS-STABLE\n");
}

#[test]
fn render_literal_text() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "render", "no placeholders"])
        .passes()
        .stdout_eq("no placeholders\n");
}

#[test]
fn render_json() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "--format", "json", "render", "{{.Name}}"])
        .passes()
        .stdout_has("\"template\": \"{{.Name}}\"")
        .stdout_has("\"output\": \"mezzfs\"");
}

#[test]
fn render_undefined_field() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "render", "{{.Missing}}"])
        .fails()
        .stderr_has("error: Cannot resolve '{{.Missing}}'")
        .stderr_has("undefined variable: .Missing");
}

#[test]
fn render_syntax_error() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "render", "{{if .Name}}"])
        .fails()
        .stderr_has("template syntax error");
}
