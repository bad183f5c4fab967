//! Shared testing utilities for etcdlabs CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated directory for profile files and CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write a profile file named `name` and return its path.
    pub fn write_profile(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).expect("Failed to write profile");
        path
    }

    /// Build a command for invoking the compiled `etcdlabs` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("etcdlabs").expect("Failed to locate etcdlabs binary");
        cmd.current_dir(self.work_dir());
        cmd
    }

    /// Like [`cli`](Self::cli) with `--profile <path>` already set.
    pub fn cli_with_profile(&self, path: &Path) -> Command {
        let mut cmd = self.cli();
        cmd.arg("--profile").arg(path);
        cmd
    }
}
