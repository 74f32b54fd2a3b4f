//! Configuration file specs

use crate::prelude::*;

const CONFIG: &str = r#"
org = "~eng"
git_branch = "release"

[context]
Region = "us-east-1"
"#;

#[test]
fn config_from_env_supplies_org() {
    let project = Project::mezzfs();
    project.file("newt.toml", CONFIG);

    project
        .newt()
        .env("NEWT_CONFIG", project.path().join("newt.toml"))
        .args(&["--name", "mezzfs", "jenkins"])
        .passes()
        .stdout_has("ENG-mezzfs <- jenkins/build.xml");
}

#[test]
fn config_flag_and_context_table() {
    let project = Project::mezzfs();
    project.file("newt.toml", CONFIG);

    project
        .newt()
        .args(&[
            "--config",
            "newt.toml",
            "--name",
            "mezzfs",
            "render",
            "{{.GitBranch}}@{{.Region}}",
        ])
        .passes()
        .stdout_eq("release@us-east-1\n");
}

#[test]
fn flags_override_config() {
    let project = Project::mezzfs();
    project.file("newt.toml", CONFIG);

    project
        .newt()
        .args(&[
            "--config",
            "newt.toml",
            "--name",
            "mezzfs",
            "--git-branch",
            "main",
            "--org",
            "~ops",
            "render",
            "{{.Org.Value}} {{.GitBranch}}",
        ])
        .passes()
        .stdout_eq("~ops main\n");
}

#[test]
fn user_config_dir_is_read() {
    let project = Project::mezzfs();
    project.file(".config/newt/config.toml", "org = \"~home\"\n");
    project.file(
        "Library/Application Support/newt/config.toml",
        "org = \"~home\"\n",
    );

    project
        .newt()
        .args(&["--name", "mezzfs", "render", "{{.Org.Value}}"])
        .passes()
        .stdout_eq("~home\n");
}

#[test]
fn config_names_manifest() {
    let project = Project::empty();
    project.file("build.newt.yml", MINIMAL_MANIFEST);
    project.file("newt.toml", "manifest = \"build.newt.yml\"\n");

    project
        .newt()
        .args(&["--config", "newt.toml", "check"])
        .passes()
        .stdout_eq("build.newt.yml: ok (1 commands, 0 warning(s))\n");
}

#[test]
fn missing_explicit_config_fails() {
    Project::mezzfs()
        .newt()
        .args(&["--config", "nope.toml", "list"])
        .fails()
        .stderr_has("IO error reading nope.toml");
}

#[test]
fn invalid_config_fails() {
    let project = Project::mezzfs();
    project.file("newt.toml", "orgg = 1\n");
    project
        .newt()
        .args(&["--config", "newt.toml", "list"])
        .fails()
        .stderr_has("TOML error in newt.toml");
}

#[test]
fn git_branch_detected() {
    let project = Project::mezzfs();
    project.git_init();

    project
        .newt()
        .args(&["--name", "mezzfs", "render", "{{.GitBranch}}"])
        .passes()
        .stdout_eq("main\n");
}
