//! Logging setup for seachart.
//!
//! Two outputs share one `EnvFilter` (from `RUST_LOG`, default `info`):
//! - a log file, truncated at the start of each session, pretty-printed
//! - the terminal on stderr, compact, so command output on stdout stays clean

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "seachart.log";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the session log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize the global subscriber.
///
/// Creates `log_dir` if needed and clears any previous `log_file` in it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be truncated.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    let path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .pretty();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding apps); keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path,
    })
}

/// Create the directory and an empty log file; returns the file path.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file);
    fs::write(&path, "")?;
    Ok(path)
}

/// Default log directory: `~/.seachart/logs`, or `./logs` without a home directory.
pub fn default_log_dir() -> PathBuf {
    crate::config::config_directory().join("logs")
}
