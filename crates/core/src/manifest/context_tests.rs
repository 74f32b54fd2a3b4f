// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::manifest::parse_manifest;

const MEZZFS: &str = include_str!("../../../../tests/fixtures/mezzfs.newt.yml");

fn options() -> ContextOptions {
    ContextOptions {
        name: Some("mezzfs".to_string()),
        org: Some("~eng".to_string()),
        git_branch: Some("main".to_string()),
        overrides: Context::new(),
    }
}

fn text(context: &Context, path: &str) -> Option<String> {
    context.get_path(path).map(ToString::to_string)
}

#[test]
fn standard_roots_are_populated() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let context = manifest_context(&manifest, &options()).unwrap();

    assert_eq!(text(&context, "Name").as_deref(), Some("mezzfs"));
    assert_eq!(text(&context, "Org.Value").as_deref(), Some("~eng"));
    assert_eq!(text(&context, "GitBranch").as_deref(), Some("main"));
    assert_eq!(text(&context, "AppType").as_deref(), Some("python-cli"));
    assert_eq!(text(&context, "ImageName").as_deref(), Some("mezzfs"));
    assert_eq!(text(&context, "PackageRoot").as_deref(), Some("/apps/mezzfs"));
    assert_eq!(text(&context, "User").as_deref(), Some("mezzfs"));
    assert_eq!(text(&context, "ToolVersions.tox").as_deref(), Some("3.5.3"));
    assert_eq!(
        context.get_path("Python.TestVersions"),
        Some(&ContextValue::from(vec!["2.7", "3.6"]))
    );
    assert_eq!(
        text(&context, "Python.RequirementsFile").as_deref(),
        Some("requirements.txt")
    );
}

#[test]
fn params_resolve_against_base_context() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let context = manifest_context(&manifest, &options()).unwrap();
    assert_eq!(
        text(&context, "Params.VenvBin").as_deref(),
        Some("/apps/mezzfs/venv/bin")
    );
    assert_eq!(text(&context, "Params.Flavor").as_deref(), Some("stable"));
}

#[test]
fn package_name_sees_params() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let context = manifest_context(&manifest, &options()).unwrap();
    assert_eq!(text(&context, "PackageName").as_deref(), Some("mezzfs-stable"));
}

#[test]
fn overrides_feed_params() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let mut opts = options();
    opts.overrides = Context::new().with_path("Python.Virtualenv", "/opt/venv");
    let context = manifest_context(&manifest, &opts).unwrap();

    assert_eq!(text(&context, "Params.VenvBin").as_deref(), Some("/opt/venv/bin"));
    // Sibling keys survive the deep merge
    assert_eq!(
        text(&context, "Python.RequirementsFile").as_deref(),
        Some("requirements.txt")
    );
}

#[test]
fn param_overrides_win_over_manifest_params() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let mut opts = options();
    opts.overrides = Context::new().with_path("Params.Flavor", "");
    let context = manifest_context(&manifest, &opts).unwrap();

    assert_eq!(text(&context, "Params.Flavor").as_deref(), Some(""));
    assert_eq!(text(&context, "PackageName").as_deref(), Some("mezzfs"));
    assert_eq!(
        text(&context, "Params.VenvBin").as_deref(),
        Some("/apps/mezzfs/venv/bin")
    );
}

#[test]
fn missing_runtime_value_fails_package_name() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let err = manifest_context(&manifest, &ContextOptions::default()).unwrap_err();
    assert_eq!(err, TemplateError::UndefinedVariable(".Name".to_string()));
}

#[test]
fn empty_manifest_still_has_python_root() {
    let manifest = parse_manifest("").unwrap();
    let context = manifest_context(&manifest, &ContextOptions::default()).unwrap();
    assert_eq!(
        context.get_path("Python.TestVersions"),
        Some(&ContextValue::List(Vec::new()))
    );
    assert!(context.get("PackageName").is_none());
}

#[test]
fn command_context_layers_tools_and_params() {
    let manifest = parse_manifest(MEZZFS).unwrap();
    let base = manifest_context(&manifest, &options()).unwrap();

    let py36 = manifest.get_command("package py36").unwrap();
    let context = command_context(py36, &base).unwrap();
    assert_eq!(text(&context, "ToolVersions.mkwheel").as_deref(), Some("1.5.0"));
    assert_eq!(text(&context, "ToolVersions.tox").as_deref(), Some("3.5.3"));

    let publish = manifest.get_command("publish debian").unwrap();
    let context = command_context(publish, &base).unwrap();
    assert_eq!(text(&context, "Params.DebRepo").as_deref(), Some("apt/main"));
    assert_eq!(text(&context, "Params.Flavor").as_deref(), Some("stable"));

    // The base context is left untouched
    assert!(base.get_path("Params.DebRepo").is_none());
}
