use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs an external command with inherited stdio.
///
/// # Result
/// Returns `Ok(())` when the command exits successfully.
///
/// # Errors
/// Returns an error if the command cannot be spawned or exits non-zero.
pub fn run_command(program: impl AsRef<OsStr>, args: &[&OsStr]) -> Result<()> {
    let program = program.as_ref();

    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute '{}'", Path::new(program).display()))?;

    if !status.success() {
        anyhow::bail!("Command '{}' failed with status: {status}", Path::new(program).display());
    }

    Ok(())
}

/// Probes whether a tool answers `--version` on the current `PATH`.
#[must_use]
pub fn is_tool_available(tool: impl AsRef<OsStr>) -> bool {
    Command::new(tool.as_ref())
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_reported() {
        assert!(!is_tool_available("chronoflow-no-such-tool"));

        let err = run_command("chronoflow-no-such-tool", &[OsStr::new("--version")]).unwrap_err();
        assert!(err.to_string().contains("Failed to execute"), "unexpected error: {err}");
    }

    #[test]
    fn present_tool_is_detected() {
        // cargo is always on PATH when running the test suite.
        assert!(is_tool_available("cargo"));
    }
}
