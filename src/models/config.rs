//! Build manifest loading and derived path helpers.
//!
//! Settings come from three layers, later ones winning:
//! 1. Compiled-in defaults matching the original deployment layout.
//! 2. An optional `ChronoBuild.toml` in the working directory (or the file
//!    passed via `--config`, which must then exist).
//! 3. Environment variables prefixed with `CHRONOFLOW__`
//!    (e.g. `CHRONOFLOW__VENV_DIR` maps to `venv_dir`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_MANIFEST: &str = "ChronoBuild.toml";

/// Settings controlling a build run.
///
/// All relative paths are resolved against `project_dir` once, at load time,
/// so every consumer sees absolute paths.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Display name of the application. Also names the produced executable
    /// and the run-at-login entry.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Exact process name the termination guard looks for.
    #[serde(default = "default_process_name")]
    pub process_name: String,

    /// Root of the application checkout; every other path resolves against it.
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    #[serde(default = "default_venv_dir")]
    pub venv_dir: PathBuf,

    #[serde(default = "default_requirements_file")]
    pub requirements_file: PathBuf,

    #[serde(default = "default_spec_file")]
    pub spec_file: PathBuf,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Log file the application writes next to its sources; removed together
    /// with the other stale artifacts.
    #[serde(default = "default_app_log_file")]
    pub app_log_file: PathBuf,

    /// Base interpreter used to create the virtual environment.
    #[serde(default = "default_python")]
    pub python: String,
}

fn default_app_name() -> String {
    "ChronoFlow".to_owned()
}

fn default_process_name() -> String {
    if cfg!(windows) { "ChronoFlow.exe" } else { "ChronoFlow" }.to_owned()
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_venv_dir() -> PathBuf {
    PathBuf::from("venv")
}

fn default_requirements_file() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_spec_file() -> PathBuf {
    PathBuf::from("ChronoFlow.spec")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_app_log_file() -> PathBuf {
    PathBuf::from("chronoflow.log")
}

fn default_python() -> String {
    if cfg!(windows) { "python" } else { "python3" }.to_owned()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            process_name: default_process_name(),
            project_dir: default_project_dir(),
            venv_dir: default_venv_dir(),
            requirements_file: default_requirements_file(),
            spec_file: default_spec_file(),
            dist_dir: default_dist_dir(),
            build_dir: default_build_dir(),
            app_log_file: default_app_log_file(),
            python: default_python(),
        }
    }
}

impl BuildConfig {
    /// Loads the layered build manifest.
    ///
    /// # Result
    /// Returns the populated configuration with `project_dir` made absolute.
    ///
    /// # Errors
    /// Returns an error if an explicitly requested manifest is missing, the
    /// file or environment overrides cannot be parsed, or the working
    /// directory cannot be resolved.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = path.map_or_else(
            || (PathBuf::from(DEFAULT_MANIFEST), false),
            |explicit| (explicit.to_path_buf(), true),
        );

        debug!("loading build manifest from {}", file.display());

        let mut config = Config::builder()
            .add_source(File::from(file.as_path()).required(required))
            .add_source(
                Environment::with_prefix("CHRONOFLOW")
                    .separator("__")
                    .convert_case(config::Case::Snake),
            )
            .build()
            .context("Failed to read the build manifest")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize the build manifest")?;

        config.project_dir = resolve_project_dir(&config.project_dir)?;
        Ok(config)
    }

    #[must_use]
    pub fn venv_path(&self) -> PathBuf {
        self.project_dir.join(&self.venv_dir)
    }

    #[must_use]
    pub fn requirements_path(&self) -> PathBuf {
        self.project_dir.join(&self.requirements_file)
    }

    #[must_use]
    pub fn spec_path(&self) -> PathBuf {
        self.project_dir.join(&self.spec_file)
    }

    #[must_use]
    pub fn build_path(&self) -> PathBuf {
        self.project_dir.join(&self.build_dir)
    }

    #[must_use]
    pub fn app_log_path(&self) -> PathBuf {
        self.project_dir.join(&self.app_log_file)
    }

    /// Absolute path of the executable the packaging step produces.
    ///
    /// Artifact cleanup and startup registration both key off this path, so
    /// it is the single source of truth for the build output.
    #[must_use]
    pub fn executable_path(&self) -> PathBuf {
        self.project_dir
            .join(&self.dist_dir)
            .join(format!("{}{}", self.app_name, std::env::consts::EXE_SUFFIX))
    }
}

fn resolve_project_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to resolve the current working directory")?
            .join(dir)
    };
    Ok(absolute.canonicalize().unwrap_or(absolute))
}
