//! The full build procedure, end to end.

use crate::models::config::BuildConfig;
use crate::services::packager::Packager;
use crate::services::venv::Venv;
use crate::services::{autostart, cleanup, process};

use anyhow::Result;
use chrono::Local;
use std::time::Instant;
use tracing::warn;

/// Runs the whole procedure: termination guard, artifact cleanup, environment
/// provisioning, dependency install, packaging, startup registration, report.
///
/// # Result
/// Returns `Ok(())` after a complete build. Startup registration failures are
/// reported but do not fail the build.
///
/// # Errors
/// Returns an error on the first fatal step failure; later steps never run.
pub fn run(config: &BuildConfig) -> Result<()> {
    let started = Instant::now();
    println!("🔨 Building {} in {}", config.app_name, config.project_dir.display());

    if process::terminate_if_running(&config.process_name)? {
        println!("🛑 Stopped the running {} instance.", config.app_name);
    }

    let removed = cleanup::clean_artifacts(config)?;
    if removed.is_empty() {
        println!("🧹 No stale artifacts to remove.");
    } else {
        println!("🧹 Removed {} stale artifact(s).", removed.len());
    }

    let venv = Venv::new(config.venv_path());
    if venv.exists() {
        println!("✅ Reusing virtual environment at {}", config.venv_path().display());
    } else {
        println!("🐍 Creating virtual environment at {}", config.venv_path().display());
        venv.create(&config.python)?;
    }
    venv.verify()?;

    println!("📦 Installing dependencies from {}", config.requirements_path().display());
    venv.install_requirements(&config.requirements_path())?;

    println!("🚚 Packaging with PyInstaller ({})", config.spec_path().display());
    let executable = config.executable_path();
    Packager::new(venv.python(), config.spec_path(), config.project_dir.clone(), &executable)
        .run()?;

    match autostart::register(&config.app_name, &executable) {
        Ok(entry) => println!("🚀 Registered startup entry: {entry}"),
        Err(err) => {
            warn!(error = %err, "startup registration failed");
            println!("⚠️ Could not register the startup entry: {err}");
            println!("   The build itself succeeded; the app just won't launch at login yet.");
        },
    }

    println!(
        "\n✨ Build finished in {:.1?} at {}.",
        started.elapsed(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("📁 Executable: {}", executable.display());
    println!(
        "ℹ️ Remove the auto-start entry later with 'chronoflow-build unregister' or: {}",
        autostart::removal_hint(&config.app_name)
    );

    Ok(())
}
