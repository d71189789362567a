//! PyInstaller invocation.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Runs PyInstaller against a fixed spec file through the virtual
/// environment's interpreter.
#[derive(Debug)]
pub struct Packager {
    python: PathBuf,
    spec_file: PathBuf,
    project_dir: PathBuf,
    expected_output: PathBuf,
}

impl Packager {
    pub fn new(
        python: impl Into<PathBuf>,
        spec_file: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
        expected_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            python: python.into(),
            spec_file: spec_file.into(),
            project_dir: project_dir.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Invokes `PyInstaller --clean --noconfirm <spec>`.
    ///
    /// # Result
    /// Returns `Ok(())` once PyInstaller exits successfully and the expected
    /// executable exists on disk.
    ///
    /// # Errors
    /// Returns an error if the spec file is missing, PyInstaller exits
    /// non-zero, or the expected output was not produced. A spec file with a
    /// diverging name setting can exit zero without producing the configured
    /// executable, hence the final check.
    pub fn run(&self) -> Result<()> {
        if !self.spec_file.is_file() {
            bail!("Packaging spec file not found at: {}", self.spec_file.display());
        }

        let status = Command::new(&self.python)
            .args(["-m", "PyInstaller", "--clean", "--noconfirm"])
            .arg(&self.spec_file)
            .current_dir(&self.project_dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| {
                format!(
                    "Failed to execute {}. Is the virtual environment intact?",
                    self.python.display()
                )
            })?;

        if !status.success() {
            bail!("PyInstaller failed with status: {status}");
        }

        if !self.expected_output.is_file() {
            bail!(
                "PyInstaller reported success but {} was not produced",
                self.expected_output.display()
            );
        }

        Ok(())
    }
}

#[test]
fn missing_spec_file_is_reported() {
    let packager = Packager::new("python3", "non-existent.spec", ".", "dist/ChronoFlow");
    let err = packager.run().unwrap_err();
    assert!(err.to_string().contains("not found"), "expected missing spec error, got: {err}");
}
