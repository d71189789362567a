//! Virtual environment provisioning.
//!
//! Activation scripts only mutate an interactive shell session, so instead of
//! sourcing them the tool always invokes the environment's own interpreter
//! directly. [`Venv::verify`] stands in for "activation succeeded".

use crate::services::utils::{is_tool_available, run_command};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// An isolated dependency environment rooted at a fixed directory.
#[derive(Debug)]
pub struct Venv {
    dir: PathBuf,
}

impl Venv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `pyvenv.cfg` is the last file `python -m venv` writes, so its presence
    /// marks a completed environment.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.dir.join("pyvenv.cfg").is_file()
    }

    /// Path of the interpreter inside the environment.
    #[must_use]
    pub fn python(&self) -> PathBuf {
        if cfg!(windows) {
            self.dir.join("Scripts").join("python.exe")
        } else {
            self.dir.join("bin").join("python")
        }
    }

    /// Creates the environment with the given base interpreter.
    ///
    /// # Result
    /// Returns `Ok(())` once `python -m venv` has completed.
    ///
    /// # Errors
    /// Returns an error if the base interpreter is not on the `PATH` or the
    /// venv module exits non-zero.
    pub fn create(&self, base_python: &str) -> Result<()> {
        if !is_tool_available(base_python) {
            bail!(
                "Python interpreter '{base_python}' not found. \
                 Is Python installed and in your PATH?"
            );
        }

        run_command(
            base_python,
            &[OsStr::new("-m"), OsStr::new("venv"), self.dir.as_os_str()],
        )
        .with_context(|| format!("Failed to create virtual environment at {}", self.dir.display()))
    }

    /// Checks that the environment's interpreter exists and runs.
    ///
    /// # Errors
    /// Returns an error when the interpreter is missing or broken; the build
    /// must not continue with a half-provisioned environment.
    pub fn verify(&self) -> Result<()> {
        let python = self.python();
        if !python.is_file() {
            bail!(
                "Virtual environment at {} has no usable interpreter (expected {})",
                self.dir.display(),
                python.display()
            );
        }

        let status = Command::new(&python)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Failed to execute {}", python.display()))?;

        if !status.success() {
            bail!("Virtual environment interpreter {} is not functional", python.display());
        }

        debug!(venv = %self.dir.display(), "virtual environment verified");
        Ok(())
    }

    /// Installs every dependency listed in the manifest through the
    /// environment's own pip.
    ///
    /// # Errors
    /// Returns an error when the manifest is missing or pip exits non-zero.
    /// The caller must abort the build in that case, before packaging runs.
    pub fn install_requirements(&self, manifest: &Path) -> Result<()> {
        if !manifest.is_file() {
            bail!("Requirements manifest not found at: {}", manifest.display());
        }

        run_command(
            self.python(),
            &[
                OsStr::new("-m"),
                OsStr::new("pip"),
                OsStr::new("install"),
                OsStr::new("-r"),
                manifest.as_os_str(),
            ],
        )
        .context("Dependency installation failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn interpreter_path_matches_the_platform_layout() {
        let venv = Venv::new("/srv/app/venv");
        if cfg!(windows) {
            assert!(venv.python().ends_with("Scripts/python.exe"));
        } else {
            assert!(venv.python().ends_with("bin/python"));
        }
    }

    #[test]
    fn environment_exists_only_after_pyvenv_cfg_appears() -> Result<()> {
        let tmp = tempdir()?;
        let venv = Venv::new(tmp.path().join("venv"));
        assert!(!venv.exists());

        fs::create_dir_all(tmp.path().join("venv"))?;
        assert!(!venv.exists());

        fs::write(tmp.path().join("venv").join("pyvenv.cfg"), "home = /usr/bin\n")?;
        assert!(venv.exists());
        Ok(())
    }

    #[test]
    fn missing_base_interpreter_is_reported() {
        let tmp = tempdir().unwrap();
        let venv = Venv::new(tmp.path().join("venv"));
        let err = venv.create("chronoflow-no-such-python").unwrap_err();
        assert!(err.to_string().contains("not found"), "unexpected error: {err}");
    }

    #[test]
    fn missing_manifest_aborts_before_pip_runs() {
        let tmp = tempdir().unwrap();
        let venv = Venv::new(tmp.path().join("venv"));
        let err = venv.install_requirements(&tmp.path().join("requirements.txt")).unwrap_err();
        assert!(err.to_string().contains("Requirements manifest"), "unexpected error: {err}");
    }
}
