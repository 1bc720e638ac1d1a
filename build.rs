//! Build script to inject build-time information into the binary.
//!
//! This sets environment variables that can be read at compile time:
//! - `CHKCONFIG_STATEDIR`: Built-in read-write flag state directory
//! - `CHKCONFIG_DEFAULTDIR`: Built-in read-only fallback default directory
//! - `CHKCONFIG_GIT_COMMIT`: Short git commit hash (or "unknown" if not in a git repo)
//!
//! The directories can be overridden at build time through the
//! `CHKCONFIG_STATEDIR_DEFAULT` and `CHKCONFIG_DEFAULTDIR_DEFAULT` environment variables.

use std::process::Command;

const STATEDIR_DEFAULT: &str = "/var/lib/chkconfig/state";
const DEFAULTDIR_DEFAULT: &str = "/usr/share/chkconfig/default";

fn main() {
    // Rerun if git HEAD changes (new commit)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=CHKCONFIG_STATEDIR_DEFAULT");
    println!("cargo:rerun-if-env-changed=CHKCONFIG_DEFAULTDIR_DEFAULT");

    let state_dir = directory_from_env("CHKCONFIG_STATEDIR_DEFAULT", STATEDIR_DEFAULT);
    println!("cargo:rustc-env=CHKCONFIG_STATEDIR={}", state_dir);

    let default_dir = directory_from_env("CHKCONFIG_DEFAULTDIR_DEFAULT", DEFAULTDIR_DEFAULT);
    println!("cargo:rustc-env=CHKCONFIG_DEFAULTDIR={}", default_dir);

    // Get git commit hash
    let commit = get_git_commit().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CHKCONFIG_GIT_COMMIT={}", commit);
}

fn directory_from_env(name: &str, fallback: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}

fn get_git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        let commit = String::from_utf8(output.stdout).ok()?;
        Some(commit.trim().to_string())
    } else {
        None
    }
}
