//! Shared utilities for argument processing.

use crate::config::Settings;

/// Level used when neither the command line nor the settings choose one.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// What: Determine the log level based on command-line arguments and settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded user settings.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - `--verbose` overrides everything, then `--log-level`, then the settings file.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args, settings: &Settings) -> String {
    if args.verbose {
        "debug".to_string()
    } else if let Some(level) = &args.log_level {
        level.clone()
    } else {
        settings
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}
