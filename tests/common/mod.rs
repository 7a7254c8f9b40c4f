//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory that runs the `fileno` binary with it as the cwd.
pub struct TestFixture {
    pub dir: TempDir,
}

/// Captured result of one `fileno` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl TestFixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Run `fileno` with `args`, failing only if the process cannot start.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_fileno"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("FILENO_LOG")
            .output()?;
        Ok(output.into())
    }

    /// Run `fileno` and panic with its stderr if it fails.
    pub fn run_ok(&self, args: &[&str]) -> RunResult {
        let result = self.run(args).expect("spawn fileno");
        assert!(
            result.success,
            "fileno {args:?} failed:\n{}",
            result.stderr
        );
        result
    }

    /// Read a file from the scratch dir (unused by some test binaries).
    #[allow(dead_code)]
    pub fn read(&self, rel: &str) -> String {
        read_to_string(&self.path(rel))
    }

    pub fn write(&self, rel: &str, contents: &str) {
        std::fs::write(self.path(rel), contents).expect("write fixture file");
    }
}

pub fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}
