//! Crate-wide error type.
//!
//! Every failure carries the stage that failed and the identifiers involved so
//! the binary can print a single self-explanatory line.

use std::path::PathBuf;

/// What: Error type for catalog loading, intent parsing, graph queries and
/// command execution.
///
/// Inputs: Generated by the module that detected the failure.
///
/// Output: Implements `Display`/`Error` for propagation up to `main`.
///
/// Details:
/// - Input-integrity failures (`MalformedEntry`, `UnresolvedDependency`,
///   `UnknownDependency`, `DuplicatePackage`) abort the whole run.
/// - Query failures (`PackageNotFound`, `NotADependency`, `NothingToRemove`,
///   `Usage`) only concern the requested operation.
/// - Nothing is executed once any of these has been returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No package manager database was found under the root.
    #[error("detect package system: no supported system detected")]
    NoSupportedSystem,

    /// A backend database entry could not be parsed.
    #[error("parse {}: {message}", path.display())]
    MalformedEntry {
        /// File that contained the entry.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A dependency string did not resolve to any installed provider.
    #[error("resolve {package}: no provider found for dependency {dependency}")]
    UnresolvedDependency {
        /// Package declaring the dependency.
        package: String,
        /// The unresolved dependency as written.
        dependency: String,
    },

    /// The catalog references a package that it does not contain.
    #[error("build graph: {package} depends on {dependency} which is not in the catalog")]
    UnknownDependency {
        /// Package declaring the dependency.
        package: String,
        /// Missing dependency name.
        dependency: String,
    },

    /// The catalog lists the same package name twice.
    #[error("build graph: package {0} is listed more than once")]
    DuplicatePackage(String),

    /// A query named a package that is not installed.
    #[error("package {0} not found")]
    PackageNotFound(String),

    /// Trace target is not forward-reachable from the trace source.
    #[error("package {dependency} is not a dependency of {package}")]
    NotADependency {
        /// Trace source.
        package: String,
        /// Trace target.
        dependency: String,
    },

    /// Protection removed every removal candidate.
    #[error("nothing to remove")]
    NothingToRemove {
        /// Candidates that were kept, for explaining the outcome.
        kept: Vec<String>,
    },

    /// Invalid combination of arguments.
    #[error("{0}")]
    Usage(String),

    /// Intent file `!command` expansion recursed too deep.
    #[error("too many nested commands")]
    TooManyNestedCommands,

    /// An intent file `!command` exited unsuccessfully.
    #[error("execute line {line}: {command:?}: {status}, stderr: {stderr}")]
    ShellCommand {
        /// 1-based line number in the enclosing content.
        line: usize,
        /// Command text after the `!`.
        command: String,
        /// Exit status description.
        status: String,
        /// Trimmed stderr of the command.
        stderr: String,
    },

    /// Parsing the output of an intent file `!command` failed.
    #[error("parse line {line}: {command:?}: {source}")]
    NestedCommand {
        /// 1-based line number in the enclosing content.
        line: usize,
        /// Command text after the `!`.
        command: String,
        /// Failure inside the expanded output.
        #[source]
        source: Box<Self>,
    },

    /// The intent file could not be read.
    #[error("open trimfile {}: {source}", path.display())]
    IntentRead {
        /// Requested intent file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The intent file was read but its expansion failed.
    #[error("parse {}: {source}", path.display())]
    IntentParse {
        /// Intent file as named by the user.
        path: PathBuf,
        /// Failure inside the file.
        #[source]
        source: Box<Self>,
    },

    /// Generic file system failure.
    #[error("read {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Settings file exists but is invalid.
    #[error("load settings {}: {message}", path.display())]
    Config {
        /// Settings file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Intent patterns could not be compiled.
    #[error("compile intent patterns: {0}")]
    Pattern(#[from] regex::Error),

    /// A program could not be started.
    #[error("execute {program}: {source}")]
    CommandSpawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A program ran but reported failure.
    #[error("{action}: {program} exited with {status}")]
    CommandFailed {
        /// What the command was supposed to do.
        action: String,
        /// Program name.
        program: String,
        /// Exit status description.
        status: String,
    },

    /// A program is not on `PATH`.
    #[error("{0} not found in PATH")]
    CommandNotFound(String),

    /// Writing the report failed.
    #[error("write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
