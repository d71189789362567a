use crate::models::config::BuildConfig;
use crate::services::cleanup;
use anyhow::Result;

/// Deletes artifacts from a previous build without running anything else.
///
/// # Result
/// Returns `Ok(())` after printing what was removed.
///
/// # Errors
/// Returns an error when an existing artifact cannot be removed.
pub fn run(config: &BuildConfig) -> Result<()> {
    let removed = cleanup::clean_artifacts(config)?;

    if removed.is_empty() {
        println!("🧹 Nothing to remove.");
    } else {
        for path in &removed {
            println!("🧹 Removed {}", path.display());
        }
    }

    Ok(())
}
