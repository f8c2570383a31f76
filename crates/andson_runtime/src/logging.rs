//! Logging bootstrap.
//!
//! Library code only emits through the `log` facade. Applications that want
//! the events on disk call [`init_logging`] once to start a size-rotated
//! file logger.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Repeating it with the same level and directory is a no-op.
//! - Repeating it with a different level or directory is rejected.
//! - Events carry ids and counts only, never titles or other record text.

use std::path::{Path, PathBuf};

use andson_foundation::{Error, ErrorKind, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "andson";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging at `level` into `log_dir`.
///
/// # Errors
///
/// Returns `LoggingError` when `level` is unsupported, when `log_dir` is
/// empty or relative or cannot be created, when the backend fails to start,
/// or when logging is already active with another configuration.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir.as_ref())?;

    let state = LOGGING_STATE.get_or_try_init(|| start(level, &log_dir))?;

    if state.log_dir != log_dir {
        return Err(logging_error(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        )));
    }
    if state.level != level {
        return Err(logging_error(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        )));
    }
    Ok(())
}

fn start(level: &'static str, log_dir: &Path) -> Result<LoggingState> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        logging_error(format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        ))
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| logging_error(format!("invalid log level `{level}`: {err}")))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| logging_error(format!("failed to start logger: {err}")))?;

    info!(
        "event=logging_started level={level} build_mode={} version={}",
        build_mode(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

/// Returns `(level, log_dir)` of the active logger, or `None` before
/// [`init_logging`] succeeded.
#[must_use]
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Returns `debug` in debug builds and `info` otherwise.
#[must_use]
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(logging_error(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        ))),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf> {
    if log_dir.as_os_str().is_empty() {
        return Err(logging_error("log_dir cannot be empty"));
    }
    if !log_dir.is_absolute() {
        return Err(logging_error(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        )));
    }
    Ok(log_dir.to_path_buf())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn logging_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::LoggingError(message.into()))
}
