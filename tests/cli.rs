use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("chronoflow-build").unwrap()
}

/// Writes a manifest that points the interpreter somewhere controllable and
/// uses a process name that can never match a real process on the host.
fn write_manifest(dir: &Path, python: &str) {
    fs::write(
        dir.join("ChronoBuild.toml"),
        format!("python = \"{python}\"\nprocess_name = \"chronoflow-cli-test-absent\"\n"),
    )
    .unwrap();
}

#[test]
fn help_lists_the_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("build").and(contains("clean")).and(contains("unregister")));
}

#[test]
fn bare_invocation_runs_the_build_and_fails_before_packaging() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "chronoflow-cli-test-no-such-python");

    // Guard skips (nothing matches), cleanup is a no-op, then provisioning
    // hits the bogus interpreter. Packaging must never be reached.
    cmd()
        .current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("not found"))
        .stdout(contains("No stale artifacts").and(contains("PyInstaller").not()));
}

#[test]
fn clean_removes_the_stale_artifact_set() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "python3");

    let exe = tmp
        .path()
        .join("dist")
        .join(format!("ChronoFlow{}", std::env::consts::EXE_SUFFIX));
    fs::create_dir_all(exe.parent().unwrap()).unwrap();
    fs::write(&exe, "stale binary").unwrap();
    fs::write(tmp.path().join("chronoflow.log"), "stale log").unwrap();
    fs::create_dir_all(tmp.path().join("build").join("ChronoFlow")).unwrap();

    cmd()
        .current_dir(tmp.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(contains("Removed"));

    assert!(!exe.exists());
    assert!(!tmp.path().join("chronoflow.log").exists());
    assert!(!tmp.path().join("build").exists());
    // The dist directory itself survives cleanup.
    assert!(tmp.path().join("dist").exists());
}

#[test]
fn clean_on_a_fresh_tree_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "python3");

    cmd()
        .current_dir(tmp.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(contains("Nothing to remove"));
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn unregister_removes_the_startup_entry_exactly_once() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "python3");

    let autostart_dir = tmp.path().join("xdg").join("autostart");
    fs::create_dir_all(&autostart_dir).unwrap();
    let entry = autostart_dir.join("ChronoFlow.desktop");
    fs::write(&entry, "[Desktop Entry]\nType=Application\n").unwrap();

    cmd()
        .current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .arg("unregister")
        .assert()
        .success()
        .stdout(contains("Removed"));
    assert!(!entry.exists());

    cmd()
        .current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .arg("unregister")
        .assert()
        .success()
        .stdout(contains("No ChronoFlow startup entry"));
}

#[test]
fn missing_explicit_manifest_is_fatal() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["--config", "definitely-missing.toml", "clean"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("manifest"));
}
