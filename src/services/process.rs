//! Termination guard for running application instances.
//!
//! PyInstaller cannot overwrite an executable that is still running, and the
//! startup entry must never point at a half-replaced binary, so the build
//! refuses to continue while an old instance survives.

use anyhow::{Result, bail};
use std::ffi::OsStr;
use std::thread;
use std::time::Duration;
use sysinfo::System;
use tracing::debug;

/// How long a killed process gets to disappear from the process table.
const KILL_SETTLE: Duration = Duration::from_millis(1500);

/// Force-terminates every running process whose name matches `process_name`
/// exactly, then waits briefly and re-checks the process table.
///
/// # Result
/// Returns `Ok(false)` when nothing matched (the normal "nothing to do"
/// case) and `Ok(true)` when at least one instance was terminated.
///
/// # Errors
/// Returns an error if any matched instance survives the kill. The caller
/// must not continue with the build in that case.
pub fn terminate_if_running(process_name: &str) -> Result<bool> {
    let sys = System::new_all();
    let own_pid = sysinfo::get_current_pid().ok();

    let targets: Vec<sysinfo::Pid> = sys
        .processes_by_exact_name(OsStr::new(process_name))
        .filter(|process| Some(process.pid()) != own_pid)
        .map(sysinfo::Process::pid)
        .collect();

    if targets.is_empty() {
        debug!(process = process_name, "no running instance found");
        return Ok(false);
    }

    println!("⚠️ {process_name} is running ({} instance(s)), terminating...", targets.len());
    for pid in &targets {
        if let Some(process) = sys.process(*pid) {
            process.kill();
        }
    }

    thread::sleep(KILL_SETTLE);

    let sys = System::new_all();
    let survivors = targets.iter().filter(|pid| sys.process(**pid).is_some()).count();
    if survivors > 0 {
        bail!(
            "Failed to terminate {survivors} running '{process_name}' instance(s). \
             Close the application manually and retry."
        );
    }

    Ok(true)
}

#[test]
fn absent_process_is_skipped() {
    let killed = terminate_if_running("chronoflow-guard-test-no-such-process").unwrap();
    assert!(!killed);
}
