//! Small helpers shared by the report and driver code.

pub mod command;

use std::path::{Component, Path, PathBuf};

/// What: Render a byte count as fixed-width megabytes.
///
/// Inputs:
/// - `bytes`: Size in bytes.
///
/// Output:
/// - Seven-wide, one-decimal megabyte string such as `"   12.3 MB"`.
///
/// Details:
/// - Uses decimal megabytes (`1e6` bytes) to match package manager output.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn humanize(bytes: u64) -> String {
    format!("{:7.1} MB", bytes as f64 / 1e6)
}

/// What: Map a user supplied path onto the inspected filesystem root.
///
/// Inputs:
/// - `root`: Filesystem root being analyzed (`/` on a live system).
/// - `cwd`: Directory relative paths are resolved against.
/// - `path`: Path as typed by the user.
///
/// Output:
/// - `root` joined with the lexically cleaned absolute form of `path`.
///
/// Details:
/// - `..` never climbs above `/`, so the result always stays inside `root`.
#[must_use]
pub fn rooted(root: &Path, cwd: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                parts.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    parts.into_iter().fold(root.to_path_buf(), |acc, part| acc.join(part))
}
