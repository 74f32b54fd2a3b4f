//! Shared helpers for CLI specs.
//!
//! Each spec runs `newt` inside a fresh temporary project with the user's
//! config directory and `NEWT_*` variables isolated.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The mezzfs manifest used across specs.
pub const MEZZFS: &str = include_str!("../../../../tests/fixtures/mezzfs.newt.yml");

/// Smallest manifest that validates.
pub const MINIMAL_MANIFEST: &str = "\
app-type: python-cli
image-name: demo
command-configs:
  build:
    build-steps:
      - make
";

/// A temporary project directory.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A project whose `.newt.yml` is the mezzfs manifest.
    pub fn mezzfs() -> Self {
        let project = Self::empty();
        project.file(".newt.yml", MEZZFS);
        project
    }

    pub fn with_manifest(yaml: &str) -> Self {
        let project = Self::empty();
        project.file(".newt.yml", yaml);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent dirs.
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).expect("read file")
    }

    /// Initialize a git repository on branch `main` with one commit.
    pub fn git_init(&self) {
        let git = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(self.path())
                .env("GIT_AUTHOR_NAME", "spec")
                .env("GIT_AUTHOR_EMAIL", "spec@example.com")
                .env("GIT_COMMITTER_NAME", "spec")
                .env("GIT_COMMITTER_EMAIL", "spec@example.com")
                .status()
                .expect("run git");
            assert!(status.success(), "git {:?} failed", args);
        };
        git(&["init", "-q"]);
        git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&["commit", "-q", "--allow-empty", "-m", "init"]);
    }

    /// Build a `newt` invocation running in this project.
    pub fn newt(&self) -> CliBuilder {
        CliBuilder {
            cwd: self.path().to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }
}

pub struct CliBuilder {
    cwd: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs
            .push((key.to_string(), value.as_ref().display().to_string()));
        self
    }

    fn run(self) -> Output {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_newt"));
        cmd.current_dir(&self.cwd)
            .args(&self.args)
            .env_remove("NEWT_FILE")
            .env_remove("NEWT_CONFIG")
            .env_remove("NEWT_LOG")
            .env("HOME", &self.cwd)
            .env("XDG_CONFIG_HOME", self.cwd.join(".config"));
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.output().expect("run newt")
    }

    /// Run and assert a zero exit status.
    pub fn passes(self) -> RunAssert {
        let desc = format!("newt {}", self.args.join(" "));
        let output = self.run();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected `{}` to pass\nstdout:\n{}\nstderr:\n{}",
            desc,
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and assert a non-zero exit status.
    pub fn fails(self) -> RunAssert {
        let desc = format!("newt {}", self.args.join(" "));
        let output = self.run();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected `{}` to fail\nstdout:\n{}",
            desc,
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            stderr
        );
        self
    }
}
