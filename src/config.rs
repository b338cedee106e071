//! User settings and XDG locations.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// User-configurable settings parsed from `settings.toml`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Intent file used when `-f` is not given.
    pub trimfile: Option<PathBuf>,
    /// Program prepended to install/remove commands; empty disables it.
    pub privilege_command: String,
    /// Log level used when `--log-level` is not given.
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trimfile: None,
            privilege_command: "sudo".to_string(),
            log_level: None,
        }
    }
}

impl Settings {
    /// What: Load settings from `path`, or defaults when it does not exist.
    ///
    /// # Errors
    /// - Returns `Err(Error::Config)` when the file exists but is not valid TOML
    ///   for [`Settings`].
    /// - Returns `Err(Error::Io)` when it exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string().trim().to_string(),
        })
    }

    /// Intent file to read, honouring the settings override.
    #[must_use]
    pub fn default_trimfile(&self) -> PathBuf {
        self.trimfile.clone().unwrap_or_else(default_trimfile)
    }

    /// What: Prefix `argv` with the privilege command, if one is configured.
    #[must_use]
    pub fn privileged(&self, argv: Vec<String>) -> Vec<String> {
        let prefix = self.privilege_command.trim();
        if prefix.is_empty() {
            return argv;
        }
        prefix
            .split_whitespace()
            .map(ToString::to_string)
            .chain(argv)
            .collect()
    }
}

/// `$HOME/.pkgtrim`, or `.pkgtrim` when HOME is unset.
#[must_use]
pub fn default_trimfile() -> PathBuf {
    env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".pkgtrim")
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// `$XDG_CONFIG_HOME/pkgtrim`, not created.
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("pkgtrim")
}

/// Settings file location.
#[must_use]
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Logs directory under config, created on demand.
///
/// # Errors
/// - Returns `Err(Error::Io)` when the directory cannot be created.
pub fn logs_dir() -> Result<PathBuf> {
    let dir = config_dir().join("logs");
    std::fs::create_dir_all(&dir).map_err(|source| Error::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
