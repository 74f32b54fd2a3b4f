// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::manifest::ValidationWarning;
use std::io::Write;

#[test]
fn load_valid_manifest() {
    let validated = load_manifest(include_str!("../../../../tests/fixtures/mezzfs.newt.yml")).unwrap();
    assert_eq!(validated.manifest.command_configs.len(), 8);
    assert!(validated.warnings.is_empty());
}

#[test]
fn parse_errors_pass_through() {
    let err = load_manifest("- a\n- b\n").unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::InvalidFormat(_))));
}

#[test]
fn validation_errors_are_reported() {
    let err = load_manifest("user: x\n").unwrap_err();
    let LoadError::Validation(errors) = &err else {
        panic!("expected validation error, got {:?}", err);
    };
    assert_eq!(errors.errors.len(), 2);
    assert!(err.to_string().contains("missing required field 'app-type'"));
}

#[test]
fn load_file_with_extra_roots() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "app-type: go-cli").unwrap();
    writeln!(file, "image-name: tool").unwrap();
    writeln!(file, "command-configs:").unwrap();
    writeln!(file, "  build:").unwrap();
    writeln!(file, "    build-steps: ['go build -o {{{{.Output}}}}']").unwrap();

    let warned = load_manifest_file(file.path(), &BTreeSet::new()).unwrap();
    assert_eq!(
        warned.warnings,
        vec![ValidationWarning::UnknownContextRoot {
            location: "command-configs.build.build-steps[0]".to_string(),
            root: "Output".to_string(),
        }]
    );

    let roots: BTreeSet<String> = ["Output".to_string()].into_iter().collect();
    let quiet = load_manifest_file(file.path(), &roots).unwrap();
    assert!(quiet.warnings.is_empty());
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest_file(&dir.path().join(".newt.yml"), &BTreeSet::new()).unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::Io { .. })));
}
