//! Installed package catalog and the package manager backends that produce it.
//!
//! A backend reads the on-disk database of one package manager and hands out a
//! closed-world list: every dependency name in a [`Package`] refers to another
//! package in the same list, with virtual names already resolved to their
//! providers.

mod arch;
mod debian;

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

pub use arch::Arch;
pub use debian::Debian;

/// A single installed package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Unique package name.
    pub name: String,
    /// One-line human description.
    pub description: String,
    /// Installed size in bytes.
    pub size: u64,
    /// Resolved dependency names, sorted and deduplicated.
    pub depends: Vec<String>,
}

/// What: Capability set every supported package manager implements.
///
/// Inputs: Implementations keep whatever root directory they were detected in.
///
/// Output:
/// - `packages` lists installed packages with resolved dependencies.
/// - `install_command`/`remove_command` build the argv for the real package
///   manager, without any privilege escalation prefix.
///
/// Details:
/// - The engine never runs these commands itself; the caller decides whether
///   to execute the argv.
pub trait PackageSystem {
    /// Short backend identifier used in logs.
    fn name(&self) -> &'static str;

    /// # Errors
    /// - Returns `Err` when the database cannot be read, an entry is malformed,
    ///   or a dependency has no installed provider.
    fn packages(&self) -> Result<Vec<Package>>;

    /// Command line that installs `names`.
    fn install_command(&self, names: &[String]) -> Vec<String>;

    /// Command line that removes `names`.
    fn remove_command(&self, names: &[String]) -> Vec<String>;
}

/// What: Pick the package manager backend whose state lives under `root`.
///
/// Inputs:
/// - `root`: Filesystem root to inspect, `/` outside of tests.
///
/// Output:
/// - The first matching backend, checking pacman before dpkg.
///
/// # Errors
/// - Returns `Err(Error::NoSupportedSystem)` when neither database exists.
pub fn detect(root: &Path) -> Result<Box<dyn PackageSystem>> {
    if root.join(arch::LOCAL_DB).is_dir() {
        tracing::debug!(root = %root.display(), "detected pacman database");
        return Ok(Box::new(Arch::new(root)));
    }
    if root.join(debian::STATUS_FILE).is_file() {
        tracing::debug!(root = %root.display(), "detected dpkg database");
        return Ok(Box::new(Debian::new(root)));
    }
    Err(Error::NoSupportedSystem)
}

/// Provider lookup shared by the backends: virtual or real name to the
/// installed package that satisfies it.
type Providers = HashMap<String, String>;

/// What: Sort and deduplicate a resolved dependency list in place.
fn normalize_depends(depends: &mut Vec<String>) {
    depends.sort();
    depends.dedup();
}
