// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Current-branch lookup for `.GitBranch`.

use std::path::Path;
use std::process::Command;

/// The checked-out branch of the repository containing `dir`.
///
/// Returns `None` when git is missing, `dir` is not in a repository, or
/// HEAD is detached.
pub fn current_branch(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .map_err(|e| tracing::debug!(error = %e, "git unavailable"))
        .ok()?;
    if !output.status.success() {
        tracing::debug!(dir = %dir.display(), "not a git repository");
        return None;
    }
    parse_branch(&String::from_utf8_lossy(&output.stdout))
}

fn parse_branch(stdout: &str) -> Option<String> {
    match stdout.trim() {
        "" | "HEAD" => None,
        branch => Some(branch.to_string()),
    }
}
