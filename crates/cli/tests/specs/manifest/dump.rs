//! `newt dump` specs

use crate::prelude::*;

#[test]
fn dump_is_stable() {
    let project = Project::mezzfs();
    let first = project.newt().args(&["dump"]).passes().stdout();
    project.file("dumped.yml", &first);

    project
        .newt()
        .args(&["-f", "dumped.yml", "dump"])
        .passes()
        .stdout_eq(&first);
}

#[test]
fn dump_keeps_content() {
    Project::mezzfs()
        .newt()
        .args(&["dump"])
        .passes()
        .stdout_has("app-type: python-cli")
        .stdout_has("command-configs:")
        .stdout_has("build staging:")
        .stdout_has("jenkins-templates:");
}

#[test]
fn dump_keeps_unknown_keys() {
    Project::with_manifest(&format!("{}notes: hi\n", MINIMAL_MANIFEST))
        .newt()
        .args(&["dump"])
        .passes()
        .stdout_has("notes: hi");
}

#[test]
fn dump_skips_validation() {
    Project::with_manifest("user: x\n")
        .newt()
        .args(&["dump"])
        .passes()
        .stdout_eq("user: x\n");
}

#[test]
fn dump_uses_env_file() {
    let project = Project::empty();
    project.file("app.yml", "app-type: go\n");
    project
        .newt()
        .env("NEWT_FILE", "app.yml")
        .args(&["dump"])
        .passes()
        .stdout_eq("app-type: go\n");
}
