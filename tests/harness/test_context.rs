//! Shared testing harness for `feast-serving-config` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated directory for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Write `content` to `name` inside the work directory and return its path.
    pub(crate) fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write test config file");
        path
    }

    /// Build a command for the compiled binary with no `FEAST_*` variables leaking in.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("feast-serving-config").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir);
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("FEAST_") {
                cmd.env_remove(&key);
            }
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }
}
