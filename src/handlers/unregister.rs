use crate::models::config::BuildConfig;
use crate::services::autostart;
use anyhow::Result;

/// Removes the run-at-login entry for the configured application.
///
/// # Result
/// Returns `Ok(())` whether or not an entry was present; removing an absent
/// entry is the normal "nothing to do" case.
///
/// # Errors
/// Returns an error when an existing entry cannot be removed.
pub fn run(config: &BuildConfig) -> Result<()> {
    if autostart::remove(&config.app_name)? {
        println!("🗑️ Removed the {} startup entry.", config.app_name);
    } else {
        println!("ℹ️ No {} startup entry was present.", config.app_name);
    }

    Ok(())
}
