//! Shared test infrastructure for integration tests.
//!
//! Each test gets its own scratch directory which becomes the working
//! directory of the `fef` binary under test.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Captured result of one `fef` invocation.
#[derive(Debug)]
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Scratch working directory populated with files and directories.
pub struct Workspace {
    dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp workspace"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.join(name), contents).expect("write fixture file");
        self
    }

    pub fn dir(&self, name: &str) -> &Self {
        fs::create_dir_all(self.join(name)).expect("create fixture dir");
        self
    }

    /// Run `fef` with `args` inside the workspace.
    pub fn run(&self, args: &[&str]) -> RunOutput {
        self.run_with_env(args, &[])
    }

    /// Run `fef` with extra environment overrides applied on top of the
    /// defaults.
    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> RunOutput {
        let output = Command::new(env!("CARGO_BIN_EXE_fef"))
            .args(args)
            .current_dir(self.path())
            .env_remove("FEF_MAX_DELETE_DEPTH")
            .env("FEF_LOG", "info")
            .envs(envs.iter().copied())
            .output()
            .expect("spawn fef");
        RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
