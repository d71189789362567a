//! Removal of artifacts left over from a previous build.

use crate::models::config::BuildConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deletes the previously produced executable, the application log file and
/// the intermediate build directory. Missing paths are skipped silently.
///
/// # Result
/// Returns the list of paths that were actually removed.
///
/// # Errors
/// Returns an error when an existing artifact cannot be removed; a stale
/// artifact surviving into the next packaging run would poison its output.
pub fn clean_artifacts(config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    remove_file(&config.executable_path(), &mut removed)?;
    remove_file(&config.app_log_path(), &mut removed)?;
    remove_dir(&config.build_path(), &mut removed)?;

    Ok(removed)
}

fn remove_file(path: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    if !path.is_file() {
        debug!(path = %path.display(), "no stale file to remove");
        return Ok(());
    }

    fs::remove_file(path)
        .with_context(|| format!("Failed to remove stale artifact {}", path.display()))?;
    removed.push(path.to_path_buf());
    Ok(())
}

fn remove_dir(path: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    if !path.is_dir() {
        debug!(path = %path.display(), "no stale directory to remove");
        return Ok(());
    }

    fs::remove_dir_all(path)
        .with_context(|| format!("Failed to remove stale build directory {}", path.display()))?;
    removed.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> BuildConfig {
        BuildConfig { project_dir: dir.to_path_buf(), ..Default::default() }
    }

    #[test]
    fn removes_the_full_stale_artifact_set() -> Result<()> {
        let tmp = tempdir()?;
        let config = config_in(tmp.path());

        fs::create_dir_all(config.executable_path().parent().unwrap())?;
        fs::write(config.executable_path(), "stale binary")?;
        fs::write(config.app_log_path(), "stale log")?;
        fs::create_dir_all(config.build_path().join("ChronoFlow"))?;

        let removed = clean_artifacts(&config)?;
        assert_eq!(removed.len(), 3);
        assert!(!config.executable_path().exists());
        assert!(!config.app_log_path().exists());
        assert!(!config.build_path().exists());
        // The dist directory itself stays; the next packaging run refills it.
        assert!(config.executable_path().parent().unwrap().exists());
        Ok(())
    }

    #[test]
    fn absent_artifacts_are_not_an_error() -> Result<()> {
        let tmp = tempdir()?;
        let removed = clean_artifacts(&config_in(tmp.path()))?;
        assert!(removed.is_empty());
        Ok(())
    }
}
