//! Command-line argument definition.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// pkgtrim - find unintentionally installed packages and trim them safely
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pkgtrim")]
#[command(version)]
#[command(
    about = "Find unintentionally installed packages, measure their unique cost and trim them safely",
    long_about = None
)]
#[command(group(ArgGroup::new("action").args(["install", "remove", "trace"]).multiple(false)))]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Packages to analyze; with no packages every unintentional top-level package is listed
    pub packages: Vec<String>,

    /// The intent file listing intended packages and globs (default: ~/.pkgtrim)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Filesystem root holding the package database and intent file
    #[arg(long, default_value = "/")]
    pub root: PathBuf,

    /// Don't execute the --remove or --install commands, only print them
    #[arg(long)]
    pub dry_run: bool,

    /// Install the packages declared in the intent file that are missing
    #[arg(long)]
    pub install: bool,

    /// Remove the given packages and their unique dependencies, or every unintentional package when none are given
    #[arg(long)]
    pub remove: bool,

    /// Print every dependency path from the first package to the second as dot
    #[arg(long)]
    pub trace: bool,

    /// Print the dependency graph around the given packages as dot (pipe into `dot -Tx11`)
    #[arg(long)]
    pub graph: bool,

    /// Print the parsed intent file and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Print the detected packages and their dependencies and exit
    #[arg(long)]
    pub dump_packages: bool,

    /// Use JSON for --dump-packages
    #[arg(long, requires = "dump_packages")]
    pub json: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
