//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory the stageline binary runs in
pub struct TestLedger {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestLedger {
  /// Create an empty scratch directory (no ledger file yet)
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a scratch directory with an initialized ledger
  pub fn initialized() -> Result<Self> {
    let ledger = Self::new()?;
    run_stageline(&ledger.path, &["init"])?;
    Ok(ledger)
  }

  /// Path of the ledger file the default configuration writes
  pub fn file(&self) -> PathBuf {
    self.path.join("stageline.json")
  }

  /// Read the raw ledger file
  pub fn read_file(&self) -> Result<String> {
    Ok(std::fs::read_to_string(self.file())?)
  }

  /// Overwrite the raw ledger file
  pub fn write_file(&self, content: &str) -> Result<()> {
    std::fs::write(self.file(), content)?;
    Ok(())
  }
}

/// Run the stageline binary, failing the test on a nonzero exit
pub fn run_stageline(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_stageline_raw(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "stageline command failed: stageline {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}

/// Run the stageline binary without asserting on the exit status
pub fn run_stageline_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let stageline_bin = env!("CARGO_BIN_EXE_stageline");

  Command::new(stageline_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run stageline")
}

/// stdout as a string
pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

/// stderr as a string
pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
