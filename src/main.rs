//! pkgtrim binary entrypoint kept minimal. The full runtime lives in `app`.

use std::process::ExitCode;

use clap::Parser;
use pkgtrim::app::{self, Env};
use pkgtrim::args::{Args, determine_log_level};
use pkgtrim::config::{self, Settings};
use pkgtrim::util::command::SystemCommandRunner;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Log timestamp formatter (`YYYY-MM-DD-T HH:MM:SS`, local time).
struct PkgtrimTimer;

impl tracing_subscriber::fmt::time::FormatTime for PkgtrimTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

/// What: Build the subscriber writing plain lines to `file` through a non-blocking worker.
///
/// Output:
/// - The subscriber and the guard that flushes the worker when dropped.
fn file_subscriber(
    file: std::fs::File,
    filter: EnvFilter,
) -> (impl tracing::Subscriber + Send + Sync + 'static, WorkerGuard) {
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(PkgtrimTimer)
        .finish();
    (subscriber, guard)
}

/// What: Initialize tracing into `pkgtrim.log`, falling back to stderr.
///
/// Inputs:
/// - `level`: Filter used when `RUST_LOG` is not set.
///
/// Output:
/// - The file writer's guard; buffered lines are flushed when it is dropped.
#[must_use]
fn init_logging(level: &str) -> Option<WorkerGuard> {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    let log_file = config::logs_dir().and_then(|dir| {
        let path = dir.join("pkgtrim.log");
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(|file| (path.clone(), file))
            .map_err(|source| pkgtrim::Error::Io { path, source })
    });
    match log_file {
        Ok((path, file)) => {
            let (subscriber, guard) = file_subscriber(file, env_filter());
            subscriber.init();
            tracing::debug!(path = %path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            // Fallback: stderr logger
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(PkgtrimTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings_path = config::settings_path();
    let (settings, settings_error) = match Settings::load(&settings_path) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    let _log_guard = init_logging(&determine_log_level(&args, &settings));
    if let Some(err) = settings_error {
        tracing::warn!(error = %err, "using default settings");
        eprintln!("Warning: {err}; using default settings.");
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("/"));
    let runner = SystemCommandRunner;
    let env = Env {
        settings: &settings,
        cwd: &cwd,
        runner: &runner,
    };
    tracing::info!(dry_run = args.dry_run, root = %args.root.display(), "pkgtrim starting");
    let mut stdout = std::io::stdout().lock();
    match app::run(&args, &env, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "pkgtrim failed");
            eprintln!("Error: {err}.");
            ExitCode::FAILURE
        }
    }
}
