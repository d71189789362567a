//! Per-user run-at-login registration for the packaged application.
//!
//! One entry, keyed by the application name, pointing at the quoted absolute
//! path of the produced executable. Registration always overwrites the entry
//! under the same fixed name, so repeated builds can never accumulate
//! duplicates.
//!
//! * Windows: a value under `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`.
//! * Linux/BSD: an XDG autostart `.desktop` file under the user config dir.
//! * macOS: a launchd agent plist under `~/Library/LaunchAgents`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by startup registration.
///
/// During a build these are reported but deliberately non-fatal; a missing
/// login entry does not invalidate the produced executable.
#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("failed to write startup entry '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove startup entry '{}': {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// Registers (or overwrites) the run-at-login entry for `app_name`.
///
/// # Result
/// Returns a human-readable description of where the entry lives.
///
/// # Errors
/// Returns an [`AutostartError`] when the per-user startup location cannot be
/// resolved or written.
pub fn register(app_name: &str, executable: &Path) -> Result<String, AutostartError> {
    platform::register(app_name, executable)
}

/// Removes the run-at-login entry for `app_name`.
///
/// # Result
/// Returns `true` when an entry existed and was removed, `false` when there
/// was nothing to do.
///
/// # Errors
/// Returns an [`AutostartError`] when an existing entry cannot be removed.
pub fn remove(app_name: &str) -> Result<bool, AutostartError> {
    platform::remove(app_name)
}

/// The manual command a user can run to undo the registration.
#[must_use]
pub fn removal_hint(app_name: &str) -> String {
    platform::removal_hint(app_name)
}

#[cfg(windows)]
mod platform {
    use super::AutostartError;
    use std::path::{Path, PathBuf};
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};

    const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

    pub(super) fn register(app_name: &str, executable: &Path) -> Result<String, AutostartError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (run, _disposition) = hkcu
            .create_subkey(RUN_KEY)
            .map_err(|source| AutostartError::Write { path: PathBuf::from(RUN_KEY), source })?;

        let command = format!("\"{}\"", executable.display());
        run.set_value(app_name, &command).map_err(|source| AutostartError::Write {
            path: PathBuf::from(RUN_KEY).join(app_name),
            source,
        })?;

        Ok(format!(r"HKCU\{RUN_KEY}\{app_name}"))
    }

    pub(super) fn remove(app_name: &str) -> Result<bool, AutostartError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let run = match hkcu.open_subkey_with_flags(RUN_KEY, KEY_SET_VALUE) {
            Ok(key) => key,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(AutostartError::Remove { path: PathBuf::from(RUN_KEY), source });
            },
        };

        match run.delete_value(app_name) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AutostartError::Remove {
                path: PathBuf::from(RUN_KEY).join(app_name),
                source,
            }),
        }
    }

    pub(super) fn removal_hint(app_name: &str) -> String {
        format!(r#"reg delete "HKCU\{RUN_KEY}" /v {app_name} /f"#)
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use super::AutostartError;
    use std::fs;
    use std::path::{Path, PathBuf};

    pub(super) fn register(app_name: &str, executable: &Path) -> Result<String, AutostartError> {
        let path = agent_path(app_name)?;
        let contents = launch_agent_plist(&agent_label(app_name), executable);
        write_entry(&path, &contents)?;
        Ok(path.display().to_string())
    }

    pub(super) fn remove(app_name: &str) -> Result<bool, AutostartError> {
        let path = agent_path(app_name)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .map(|()| true)
            .map_err(|source| AutostartError::Remove { path, source })
    }

    pub(super) fn removal_hint(app_name: &str) -> String {
        format!("rm ~/Library/LaunchAgents/{}.plist", agent_label(app_name))
    }

    fn agent_label(app_name: &str) -> String {
        format!("com.chronoflow.{}", app_name.to_lowercase())
    }

    fn agent_path(app_name: &str) -> Result<PathBuf, AutostartError> {
        let home = dirs::home_dir().ok_or(AutostartError::NoConfigDir)?;
        Ok(home
            .join("Library")
            .join("LaunchAgents")
            .join(format!("{}.plist", agent_label(app_name))))
    }

    fn launch_agent_plist(label: &str, executable: &Path) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
            executable.display()
        )
    }

    fn write_entry(path: &Path, contents: &str) -> Result<(), AutostartError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| AutostartError::Write { path: path.to_path_buf(), source })?;
        }
        fs::write(path, contents)
            .map_err(|source| AutostartError::Write { path: path.to_path_buf(), source })
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod platform {
    use super::AutostartError;
    use std::fs;
    use std::path::{Path, PathBuf};

    pub(super) fn register(app_name: &str, executable: &Path) -> Result<String, AutostartError> {
        let config_dir = dirs::config_dir().ok_or(AutostartError::NoConfigDir)?;
        let path = entry_path(&config_dir, app_name);
        write_entry(&path, &desktop_entry(app_name, executable))?;
        Ok(path.display().to_string())
    }

    pub(super) fn remove(app_name: &str) -> Result<bool, AutostartError> {
        let config_dir = dirs::config_dir().ok_or(AutostartError::NoConfigDir)?;
        remove_entry(&entry_path(&config_dir, app_name))
    }

    pub(super) fn removal_hint(app_name: &str) -> String {
        format!("rm ~/.config/autostart/{app_name}.desktop")
    }

    fn entry_path(config_dir: &Path, app_name: &str) -> PathBuf {
        config_dir.join("autostart").join(format!("{app_name}.desktop"))
    }

    fn desktop_entry(app_name: &str, executable: &Path) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={app_name}\n\
             Exec=\"{}\"\n\
             X-GNOME-Autostart-enabled=true\n",
            executable.display()
        )
    }

    fn write_entry(path: &Path, contents: &str) -> Result<(), AutostartError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| AutostartError::Write { path: path.to_path_buf(), source })?;
        }
        fs::write(path, contents)
            .map_err(|source| AutostartError::Write { path: path.to_path_buf(), source })
    }

    fn remove_entry(path: &Path) -> Result<bool, AutostartError> {
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(path)
            .map(|()| true)
            .map_err(|source| AutostartError::Remove { path: path.to_path_buf(), source })
    }

}
