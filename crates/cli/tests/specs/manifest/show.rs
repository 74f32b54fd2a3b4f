//! `newt show` specs

use crate::prelude::*;

const RUNTIME: &[&str] = &["--name", "mezzfs", "--org", "~eng", "--git-branch", "main"];

fn show(project: &Project, extra: &[&str]) -> CliBuilder {
    project.newt().args(RUNTIME).args(extra)
}

#[test]
fn show_resolved_plan() {
    show(&Project::mezzfs(), &["show", "build"])
        .passes()
        .stdout_eq(
            "Command: build
  Image: mezzfs
  Tools:
    mkwheel: 1.4.2
    tox: 3.5.3
  Setup:
    apt-get update -qq
    apt-get install -y -qq fuse libfuse-dev pkg-config
    echo user_allow_other >> /etc/fuse.conf
  Steps:
    mkwheel build --dist dist/
",
        );
}

#[test]
fn package_all_follows_test_versions() {
    let project = Project::mezzfs();

    show(&project, &["--set", "Python.TestVersions=[\"3.6\"]", "show", "package all"])
        .passes()
        .stdout_has("  Steps:\n    newt --app-type python-cli package py36 ;\n")
        .stdout_lacks("py27");

    show(&project, &["show", "package all"])
        .passes()
        .stdout_has(
            "    newt --app-type python-cli package py27 ;newt --app-type python-cli package py36 ;\n",
        );
}

#[test]
fn tox_environments() {
    show(&Project::mezzfs(), &["show", "test"])
        .passes()
        .stdout_has("    tox -e py27,py36\n");
}

#[test]
fn pre_commands_and_volumes() {
    show(&Project::mezzfs(), &["show", "pycharm"])
        .passes()
        .stdout_has("  Before build:\n    mkdir -p /apps/mezzfs/venv\n")
        .stdout_has("  Volumes:\n    /apps/mezzfs:/apps/mezzfs\n    /dev/fuse:/dev/fuse\n")
        .stdout_has("    /apps/mezzfs/venv/bin/pip install -r requirements.txt\n");
}

#[test]
fn param_override_reaches_package_name() {
    show(
        &Project::mezzfs(),
        &["--set", "Params.Flavor=beta", "show", "publish debian"],
    )
    .passes()
    .stdout_has("    rsync -av dist/mezzfs-beta_*.deb apt/main/\n");
}

#[test]
fn json_plan() {
    show(&Project::mezzfs(), &["--format", "json", "show", "build staging"])
        .passes()
        .stdout_has("\"image\": \"mezzfs-build:1.4.2\"")
        .stdout_has("\"image_cache\": true")
        .stdout_has("\"mkwheel build --target staging --dist dist/\"");
}
