//! `newt jenkins` specs

use crate::prelude::*;

#[test]
fn enabled_jobs() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "--org", "~eng", "jenkins"])
        .passes()
        .stdout_eq(
            "ENG-mezzfs <- jenkins/build.xml\n\
             ENG-mezzfs-publish <- jenkins/publish.xml (raw)\n",
        );
}

#[test]
fn all_jobs() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "--org", "~eng", "jenkins", "--all"])
        .passes()
        .stdout_has("mezzfs-nightly <- jenkins/nightly.xml (disabled)\n");
}

#[test]
fn org_is_required() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "jenkins"])
        .fails()
        .stderr_has("Cannot resolve jenkins-templates[0].name")
        .stderr_has("undefined variable: .Org");
}

#[test]
fn no_jobs() {
    Project::with_manifest(MINIMAL_MANIFEST)
        .newt()
        .args(&["--name", "demo", "jenkins"])
        .passes()
        .stdout_eq("No jenkins jobs\n");
}

#[test]
fn json_jobs() {
    Project::mezzfs()
        .newt()
        .args(&["--name", "mezzfs", "--org", "~eng", "--format", "json", "jenkins"])
        .passes()
        .stdout_has("\"name\": \"ENG-mezzfs\"")
        .stdout_has("\"raw\": true");
}
