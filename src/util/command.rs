//! Command execution abstraction.
//!
//! This module provides the [`CommandRunner`] trait so intent file expansion
//! and the final install/remove step can be exercised without touching the
//! host system.

use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Captured result of a shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Human readable exit status.
    pub status: String,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

/// What: Abstract command execution interface.
///
/// Inputs:
/// - `shell`: Command text handed to `sh -c`, output captured.
/// - `execute`: Full argv run with the terminal attached.
///
/// Output:
/// - `shell` returns the captured output regardless of exit status.
/// - `execute` returns `Ok(())` only when the program exits successfully.
///
/// Details:
/// - Production code relies on [`SystemCommandRunner`]; tests record calls.
pub trait CommandRunner {
    /// # Errors
    /// - Returns `Err(Error::CommandSpawn)` when `sh` cannot be started.
    fn shell(&self, command: &str) -> Result<ShellOutput>;

    /// # Errors
    /// - Returns `Err(Error::CommandNotFound)` when the program is not on `PATH`.
    /// - Returns `Err(Error::CommandSpawn)` when it cannot be started.
    /// - Returns `Err(Error::CommandFailed)` on a non-zero exit.
    fn execute(&self, action: &str, argv: &[String]) -> Result<()>;
}

/// Real command runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn shell(&self, command: &str) -> Result<ShellOutput> {
        tracing::debug!(command = %command, "expanding intent command");
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::CommandSpawn {
                program: "sh".to_string(),
                source,
            })?;
        Ok(ShellOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn execute(&self, action: &str, argv: &[String]) -> Result<()> {
        let Some((program, args)) = argv.split_first() else {
            return Err(Error::Usage(format!("{action}: empty command")));
        };
        let resolved =
            which::which(program).map_err(|_| Error::CommandNotFound(program.clone()))?;
        tracing::info!(action = %action, argv = ?argv, "executing package manager");
        let status = Command::new(resolved)
            .args(args)
            .status()
            .map_err(|source| Error::CommandSpawn {
                program: program.clone(),
                source,
            })?;
        if status.success() {
            tracing::info!(action = %action, "package manager finished");
            Ok(())
        } else {
            tracing::error!(action = %action, exit_code = status.code(), "package manager failed");
            Err(Error::CommandFailed {
                action: action.to_string(),
                program: program.clone(),
                status: status.to_string(),
            })
        }
    }
}
