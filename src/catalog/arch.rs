//! pacman local database backend.

use std::path::{Path, PathBuf};

use super::{Package, PackageSystem, Providers, normalize_depends};
use crate::error::{Error, Result};

/// Directory holding one sub-directory per installed package.
pub(super) const LOCAL_DB: &str = "var/lib/pacman/local";

/// Backend for Arch-like systems reading `/var/lib/pacman/local/*/desc`.
#[derive(Debug, Clone)]
pub struct Arch {
    /// Filesystem root the database lives under.
    root: PathBuf,
}

impl Arch {
    /// Create a backend reading the database below `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// What: List every `desc` file of the local database in name order.
    ///
    /// # Errors
    /// - Returns `Err(Error::Io)` when the database directory cannot be listed.
    /// - Returns `Err(Error::MalformedEntry)` when no package is installed at all.
    fn desc_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(LOCAL_DB);
        let entries = std::fs::read_dir(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path().join("desc"))
            .filter(|path| path.is_file())
            .collect();
        if files.is_empty() {
            return Err(Error::MalformedEntry {
                path: dir,
                message: "no desc files found".to_string(),
            });
        }
        files.sort();
        Ok(files)
    }
}

impl PackageSystem for Arch {
    fn name(&self) -> &'static str {
        "arch"
    }

    fn packages(&self) -> Result<Vec<Package>> {
        let mut providers = Providers::new();
        let mut parsed: Vec<(Package, String)> = Vec::new();
        for file in self.desc_files()? {
            let content = std::fs::read_to_string(&file).map_err(|source| Error::Io {
                path: file.clone(),
                source,
            })?;
            parsed.push(parse_desc(&file, &content, &mut providers)?);
        }
        tracing::debug!(count = parsed.len(), "parsed pacman desc files");

        parsed
            .into_iter()
            .map(|(mut pkg, depends)| {
                pkg.depends = resolve_depends(&pkg.name, &depends, &providers)?;
                Ok(pkg)
            })
            .collect()
    }

    fn install_command(&self, names: &[String]) -> Vec<String> {
        command(&["pacman", "-S"], names)
    }

    fn remove_command(&self, names: &[String]) -> Vec<String> {
        command(&["pacman", "-R"], names)
    }
}

/// Join a fixed program prefix with package names.
fn command(prefix: &[&str], names: &[String]) -> Vec<String> {
    prefix
        .iter()
        .map(ToString::to_string)
        .chain(names.iter().cloned())
        .collect()
}

/// What: Parse one `desc` file into a package and its raw `%DEPENDS%` block.
///
/// Inputs:
/// - `path`: File name used in error messages.
/// - `content`: File contents.
/// - `providers`: Map receiving the package name and its `%PROVIDES%` entries.
///
/// Output:
/// - The package (dependencies still empty) and the unresolved depends text.
///
/// # Errors
/// - Returns `Err(Error::MalformedEntry)` when a section header is not
///   terminated, `%NAME%` is not the first section, `%DEPENDS%` repeats or no
///   name is present.
///
/// Details:
/// - Versions in `%PROVIDES%` (`libfoo.so=1-64`) are dropped before registering.
fn parse_desc(path: &Path, content: &str, providers: &mut Providers) -> Result<(Package, String)> {
    let malformed = |message: String| Error::MalformedEntry {
        path: path.to_path_buf(),
        message,
    };
    let mut pkg = Package::default();
    let mut depends: Option<String> = None;
    let text = format!("\n{content}");
    for entry in text.split("\n%") {
        if entry.is_empty() {
            continue;
        }
        let Some((header, value)) = entry.split_once("%\n") else {
            return Err(malformed(format!("cut {entry:?}")));
        };
        let value = value.trim();
        if header != "NAME" && pkg.name.is_empty() {
            return Err(malformed(format!(
                "{header:?} is the first section, want NAME"
            )));
        }
        match header {
            "NAME" => {
                pkg.name = value.to_string();
                providers.insert(pkg.name.clone(), pkg.name.clone());
            }
            "DESC" => {
                pkg.description = value.lines().next().unwrap_or_default().to_string();
            }
            "SIZE" => pkg.size = value.parse().unwrap_or(0),
            "DEPENDS" => {
                if depends.is_some() {
                    return Err(malformed("double DEPENDS section".to_string()));
                }
                depends = Some(value.to_string());
            }
            "PROVIDES" => {
                for line in value.lines().filter(|l| !l.is_empty()) {
                    let virtual_name = line.split('=').next().unwrap_or(line);
                    providers.insert(virtual_name.to_string(), pkg.name.clone());
                }
            }
            _ => {}
        }
    }
    if pkg.name.is_empty() {
        return Err(malformed("no name found".to_string()));
    }
    Ok((pkg, depends.unwrap_or_default()))
}

/// What: Map each `%DEPENDS%` line onto the installed package providing it.
///
/// # Errors
/// - Returns `Err(Error::UnresolvedDependency)` for a name nobody provides.
fn resolve_depends(package: &str, depends: &str, providers: &Providers) -> Result<Vec<String>> {
    let mut resolved = Vec::new();
    for dep in depends.lines().filter(|l| !l.is_empty()) {
        // "ca-certificates-utils>=20181109-3", "libargon2.so=1-64"
        let bare = dep.split(['>', '<', '=']).next().unwrap_or(dep).trim();
        let Some(provider) = providers.get(bare) else {
            return Err(Error::UnresolvedDependency {
                package: package.to_string(),
                dependency: bare.to_string(),
            });
        };
        resolved.push(provider.clone());
    }
    normalize_depends(&mut resolved);
    Ok(resolved)
}
