//! Error reporting specs
//!
//! Failures exit non-zero and explain themselves on stderr.

use crate::prelude::*;

#[test]
fn missing_manifest() {
    Project::empty()
        .newt()
        .args(&["list"])
        .fails()
        .stderr_has("error: Manifest '.newt.yml' not found")
        .stderr_has("suggestions:")
        .stderr_has("newt --file path/to/.newt.yml");
}

#[test]
fn missing_manifest_named_by_flag() {
    Project::mezzfs()
        .newt()
        .args(&["-f", "other.yml", "list"])
        .fails()
        .stderr_has("error: Manifest 'other.yml' not found");
}

#[test]
fn malformed_yaml() {
    Project::with_manifest("app-type: [python\n")
        .newt()
        .args(&["list"])
        .fails()
        .stderr_has("error: YAML parse error");
}

#[test]
fn duplicate_command_names() {
    Project::with_manifest(
        "app-type: x\nimage-name: y\ncommand-configs:\n  build: {}\n  build: {}\n",
    )
    .newt()
    .args(&["list"])
    .fails()
    .stderr_has("duplicate");
}

#[test]
fn invalid_manifest_lists_errors() {
    Project::with_manifest("user: x\n")
        .newt()
        .args(&["list"])
        .fails()
        .stderr_has("has 2 error(s)")
        .stderr_has("-> manifest missing required field 'app-type'")
        .stderr_has("-> manifest missing required field 'image-name'");
}

#[test]
fn unknown_command_suggests_similar() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "--git-branch", "main", "show", "package"])
        .fails()
        .stderr_has("error: Command 'package' not found")
        .stderr_has("Similar commands: package all, package py27, package py36")
        .stderr_has("newt list");
}

#[test]
fn bad_set_argument() {
    Project::mezzfs()
        .newt()
        .args(&["--set", "Flavor", "list"])
        .fails()
        .stderr_has("invalid key=value");
}

#[test]
fn unresolved_template_names_location() {
    Project::with_manifest(
        "app-type: x\nimage-name: y\ncommand-configs:\n  build:\n    build-steps: ['make {{.Params.Target}}']\n",
    )
    .newt()
    .args(&["--name", "demo", "--git-branch", "main", "show", "build"])
    .fails()
    .stderr_has("error: Cannot resolve command-configs.build.build-steps[0]")
    .stderr_has("undefined variable: .Params.Target")
    .stderr_has("--set KEY=VALUE");
}
