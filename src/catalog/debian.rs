//! dpkg status file backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Package, PackageSystem, Providers, normalize_depends};
use crate::error::{Error, Result};

/// The dpkg database file listing every known package.
pub(super) const STATUS_FILE: &str = "var/lib/dpkg/status";

/// Backend for Debian-like systems reading `/var/lib/dpkg/status`.
#[derive(Debug, Clone)]
pub struct Debian {
    /// Filesystem root the status file lives under.
    root: PathBuf,
}

impl Debian {
    /// Create a backend reading the status file below `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl PackageSystem for Debian {
    fn name(&self) -> &'static str {
        "debian"
    }

    fn packages(&self) -> Result<Vec<Package>> {
        let path = self.root.join(STATUS_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let (stanzas, providers) = parse_status(&content);
        tracing::debug!(count = stanzas.len(), "parsed dpkg status stanzas");
        stanzas
            .into_iter()
            .map(|(mut pkg, depends)| {
                pkg.depends = resolve_depends(&pkg.name, &depends, &providers)?;
                Ok(pkg)
            })
            .collect()
    }

    fn install_command(&self, names: &[String]) -> Vec<String> {
        ["apt", "install"]
            .iter()
            .map(ToString::to_string)
            .chain(names.iter().cloned())
            .collect()
    }

    fn remove_command(&self, names: &[String]) -> Vec<String> {
        ["apt", "remove"]
            .iter()
            .map(ToString::to_string)
            .chain(names.iter().cloned())
            .collect()
    }
}

/// Stanza being accumulated while scanning the status file.
#[derive(Default)]
struct Stanza {
    /// Package under construction; an empty name marks a skipped stanza.
    package: Package,
    /// Raw `Depends:` value.
    depends: String,
    /// Raw `Provides:` value.
    provides: String,
}

/// What: Split the status file into installed packages and a provider map.
///
/// Inputs:
/// - `content`: Full text of `/var/lib/dpkg/status`.
///
/// Output:
/// - Installed packages paired with their raw `Depends:` value, plus the
///   provider map covering real and `Provides:` names.
///
/// Details:
/// - Stanzas whose `Status:` does not start with `install` are ignored.
/// - `Installed-Size:` is reported in KiB and converted to bytes.
/// - Continuation lines (leading whitespace) are ignored.
/// - Stanzas repeating a package name (one per architecture) merge into one
///   package: sizes add up and `Depends:` groups are combined.
fn parse_status(content: &str) -> (Vec<(Package, String)>, Providers) {
    let mut out: Vec<(Package, String)> = Vec::new();
    let mut providers = Providers::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut cur = Stanza::default();
    let mut installed = true;

    let mut finish = |cur: &mut Stanza, installed: &mut bool| {
        let stanza = std::mem::take(cur);
        let keep = *installed && !stanza.package.name.is_empty();
        *installed = true;
        if !keep {
            return;
        }
        let name = stanza.package.name.clone();
        providers.insert(name.clone(), name.clone());
        for provided in stanza.provides.split(',') {
            let bare = provided.split('(').next().unwrap_or(provided).trim();
            if !bare.is_empty() {
                providers.insert(bare.to_string(), name.clone());
            }
        }
        // Multi-arch installs list one stanza per architecture.
        if let Some(&index) = seen.get(&name) {
            let (pkg, depends) = &mut out[index];
            pkg.size = pkg.size.saturating_add(stanza.package.size);
            if !stanza.depends.is_empty() {
                if !depends.is_empty() {
                    depends.push_str(", ");
                }
                depends.push_str(&stanza.depends);
            }
            return;
        }
        seen.insert(name, out.len());
        out.push((stanza.package, stanza.depends));
    };

    for line in content.lines() {
        if line.trim().is_empty() {
            finish(&mut cur, &mut installed);
            continue;
        }
        if line.starts_with([' ', '\t']) {
            continue;
        }
        let (key, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.trim();
        match key {
            "Package" => cur.package.name = value.to_string(),
            "Description" => cur.package.description = value.to_string(),
            "Installed-Size" => {
                cur.package.size = value.parse::<u64>().unwrap_or(0).saturating_mul(1024);
            }
            "Status" => installed = value.starts_with("install"),
            "Provides" => cur.provides = value.to_string(),
            "Depends" => cur.depends = value.to_string(),
            _ => {}
        }
    }
    finish(&mut cur, &mut installed);
    (out, providers)
}

/// What: Resolve a `Depends:` value against the provider map.
///
/// Details:
/// - Each comma-separated group is satisfied by its first alternative that
///   has an installed provider. Version constraints and `:any` are ignored.
///
/// # Errors
/// - Returns `Err(Error::UnresolvedDependency)` when no alternative of a group
///   is installed.
fn resolve_depends(package: &str, depends: &str, providers: &Providers) -> Result<Vec<String>> {
    let mut resolved = Vec::new();
    for group in depends.split(',') {
        if group.trim().is_empty() {
            continue;
        }
        let provider = group.split('|').find_map(|alternative| {
            let bare = alternative.split('(').next().unwrap_or(alternative).trim();
            let bare = bare.strip_suffix(":any").unwrap_or(bare);
            if bare.is_empty() {
                return None;
            }
            providers.get(bare)
        });
        let Some(provider) = provider else {
            return Err(Error::UnresolvedDependency {
                package: package.to_string(),
                dependency: group.trim().to_string(),
            });
        };
        resolved.push(provider.clone());
    }
    normalize_depends(&mut resolved);
    Ok(resolved)
}
