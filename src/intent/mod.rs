//! Intent file handling.
//!
//! The intent file lists the packages a user wants on the system. Tokens are
//! separated by whitespace, `#` starts a comment, and a line beginning with
//! `!` is run through `sh -c` with its stdout parsed as more intent content.

pub mod matcher;

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::util::command::CommandRunner;

pub use matcher::{IntentMatcher, is_glob};

/// Deepest `!command` nesting accepted before giving up.
pub const MAX_NESTING: usize = 10;

/// What: Parse intent content into the set of declared names and globs.
///
/// Inputs:
/// - `content`: Intent file text.
/// - `runner`: Executes `!command` lines.
///
/// Output:
/// - Sorted set of declared tokens.
///
/// # Errors
/// - Returns `Err(Error::ShellCommand)` when an expansion exits non-zero.
/// - Returns `Err(Error::TooManyNestedCommands)` past [`MAX_NESTING`] levels.
/// - Returns `Err(Error::NestedCommand)` wrapping failures inside expanded output.
pub fn parse(content: &str, runner: &dyn CommandRunner) -> Result<BTreeSet<String>> {
    let mut found = BTreeSet::new();
    parse_into(&mut found, 0, content, runner)?;
    Ok(found)
}

/// Recursive worker for [`parse`].
fn parse_into(
    found: &mut BTreeSet<String>,
    depth: usize,
    content: &str,
    runner: &dyn CommandRunner,
) -> Result<()> {
    if depth > MAX_NESTING {
        return Err(Error::TooManyNestedCommands);
    }
    for (index, line) in content.lines().enumerate() {
        if let Some(command) = line.strip_prefix('!') {
            let output = runner.shell(command)?;
            if !output.success {
                return Err(Error::ShellCommand {
                    line: index + 1,
                    command: command.to_string(),
                    status: output.status,
                    stderr: output.stderr,
                });
            }
            parse_into(found, depth + 1, &output.stdout, runner).map_err(|source| {
                Error::NestedCommand {
                    line: index + 1,
                    command: command.to_string(),
                    source: Box::new(source),
                }
            })?;
            continue;
        }
        let tokens = line.split('#').next().unwrap_or_default();
        found.extend(tokens.split_whitespace().map(ToString::to_string));
    }
    Ok(())
}

/// What: Read and parse the intent file at `path`.
///
/// Inputs:
/// - `path`: Location on disk (already mapped under the filesystem root).
/// - `shown`: Path as the user named it, used in messages.
/// - `explicit`: Whether the user asked for this file rather than the default.
/// - `runner`: Executes `!command` lines.
///
/// Output:
/// - Declared names; empty when the default file does not exist.
///
/// # Errors
/// - Returns `Err(Error::IntentRead)` when an explicitly requested file cannot be read.
/// - Returns `Err(Error::IntentParse)` when expansion fails.
pub fn load(
    path: &Path,
    shown: &Path,
    explicit: bool,
    runner: &dyn CommandRunner,
) -> Result<BTreeSet<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) if explicit => {
            return Err(Error::IntentRead {
                path: shown.to_path_buf(),
                source,
            });
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "default intent file unavailable");
            String::new()
        }
    };
    let names = parse(&content, runner).map_err(|source| Error::IntentParse {
        path: shown.to_path_buf(),
        source: Box::new(source),
    })?;
    tracing::debug!(path = %shown.display(), declared = names.len(), "loaded intent file");
    Ok(names)
}
