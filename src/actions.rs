//! Post-scaffold actions: `git init` and package installation
//!
//! Both actions shell out to the system tools with the working directory set
//! to the new project. They are not retried; re-running them is safe because
//! the tools themselves are idempotent.
//!
//! Failures are reported with fixed errors (`Error::GitInit`,
//! `Error::PackageInstall`) whether the tool is missing or exits non-zero.
//! The tool's stderr is only logged.

use crate::error::{Error, Result};
use crate::materialize::{PackageManager, PackageMap};
use log::{debug, info};
use std::path::Path;
use std::process::{Command, Output};

/// Run `git init` in `target_dir`.
pub fn initialize_git(target_dir: &Path) -> Result<()> {
    run_in(target_dir, "git", &["init"]).ok_or(Error::GitInit)?;
    info!("Initialized git repository in {}", target_dir.display());
    Ok(())
}

/// Run `<manager> install` in `target_dir`.
pub fn install_packages(manager: PackageManager, target_dir: &Path) -> Result<()> {
    install_with(manager.program(), target_dir)
}

/// Run `<program> install` in `target_dir`.
///
/// Lets callers use a package manager binary that is not on the standard
/// name, e.g. a wrapper script.
pub fn install_with(program: &str, target_dir: &Path) -> Result<()> {
    run_in(target_dir, program, &["install"]).ok_or(Error::PackageInstall)?;
    info!("Installed packages with {} in {}", program, target_dir.display());
    Ok(())
}

/// Install every recorded package set, in the order the lock files were seen.
///
/// Stops at the first failure.
pub fn install_all(package_map: &PackageMap) -> Result<()> {
    for record in package_map {
        install_packages(record.manager, &record.path)?;
    }
    Ok(())
}

/// Run a command in `dir`; `None` if it could not start or did not succeed.
fn run_in(dir: &Path, program: &str, args: &[&str]) -> Option<Output> {
    debug!("Running `{} {}` in {}", program, args.join(" "), dir.display());
    let output = match Command::new(program).args(args).current_dir(dir).output() {
        Ok(output) => output,
        Err(e) => {
            debug!("Could not run {}: {}", program, e);
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            "`{} {}` exited with {}: {}",
            program,
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    Some(output)
}
