//! `newt check` specs

use crate::prelude::*;

#[test]
fn valid_manifest_passes() {
    Project::mezzfs()
        .newt()
        .args(&["check"])
        .passes()
        .stdout_eq(".newt.yml: ok (8 commands, 0 warning(s))\n");
}

#[test]
fn errors_fail_with_every_error_listed() {
    Project::with_manifest("user: x\n")
        .newt()
        .args(&["check"])
        .fails()
        .stdout_eq(
            "error: manifest missing required field 'app-type'\n\
             error: manifest missing required field 'image-name'\n\
             .newt.yml: 2 error(s)\n",
        );
}

#[test]
fn template_syntax_error_is_located() {
    Project::with_manifest(&format!(
        "{}    pre-commands:\n      build: ['{{{{end}}}}']\n",
        MINIMAL_MANIFEST
    ))
    .newt()
    .args(&["check"])
    .fails()
    .stdout_has("error: Template error in command-configs.build.pre-commands.build[0]")
    .stdout_has("unexpected {{end}}");
}

#[test]
fn build_image_syntax_error_fails_check() {
    Project::with_manifest(&format!(
        "{}    build-image: '{{{{.ImageName'\n",
        MINIMAL_MANIFEST
    ))
    .newt()
    .args(&["check"])
    .fails()
    .stdout_has("error: Template error in command-configs.build.build-image");
}

#[test]
fn warnings_pass_unless_strict() {
    let project = Project::with_manifest(&format!("{}notes: hi\n", MINIMAL_MANIFEST));

    project
        .newt()
        .args(&["check"])
        .passes()
        .stdout_eq(
            "warning: Unknown top-level key 'notes'\n\
             .newt.yml: ok (1 commands, 1 warning(s))\n",
        );

    project
        .newt()
        .args(&["check", "--strict"])
        .fails()
        .stdout_has("warning: Unknown top-level key 'notes'");
}

#[test]
fn set_supplies_context_roots() {
    let project = Project::with_manifest(
        "app-type: x\nimage-name: y\ncommand-configs:\n  build:\n    build-steps: ['make V={{.Platform.Version}}']\n",
    );

    project
        .newt()
        .args(&["check", "--strict"])
        .fails()
        .stdout_has("references '.Platform', which is not in the standard context");

    project
        .newt()
        .args(&["--set", "Platform.Version=1.2", "check", "--strict"])
        .passes()
        .stdout_eq(".newt.yml: ok (1 commands, 0 warning(s))\n");
}

#[test]
fn json_report() {
    Project::with_manifest("user: x\n")
        .newt()
        .args(&["--format", "json", "check"])
        .fails()
        .stdout_has("\"valid\": false")
        .stdout_has("\"file\": \".newt.yml\"")
        .stdout_has("missing required field 'image-name'");
}
