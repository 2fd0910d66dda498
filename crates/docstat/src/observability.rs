//! Logging and tracing setup.
//!
//! Two sinks, one filter:
//!
//! - stderr, human-readable, warnings and errors only unless `-v` is given
//! - a JSONL file (one event per line), rotated daily, at the level chosen
//!   by `RUST_LOG`, `-q`/`-v`, or `log_level` from config
//!
//! The file goes to `DOCSTAT_LOG_PATH` if set, else a `docstat.*.jsonl`
//! file in `DOCSTAT_LOG_DIR`, the configured `log_dir`, or the platform's
//! local data directory. If no directory can be used, file logging is
//! skipped rather than failing the command.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "DOCSTAT_LOG_PATH";
const LOG_DIR_ENV: &str = "DOCSTAT_LOG_DIR";
const LOG_FILE_PREFIX: &str = "docstat";
const LOG_FILE_SUFFIX: &str = "jsonl";

/// Where log output goes.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Explicit log file (appended to, never rotated).
    pub log_path: Option<PathBuf>,
    /// Directory for rotated log files.
    pub log_dir: Option<PathBuf>,
    /// Most verbose level shown on stderr.
    pub stderr_level: LevelFilter,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_dir: None,
            stderr_level: LevelFilter::WARN,
        }
    }
}

impl ObservabilityConfig {
    /// Read log locations from the environment, falling back to `config_log_dir`
    /// and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV).map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(default_log_dir);
        Self {
            log_path,
            log_dir,
            ..Self::default()
        }
    }

    /// Show more on stderr with `-v`, less with `-q`.
    #[must_use]
    pub const fn with_stderr_verbosity(mut self, quiet: bool, verbose: u8) -> Self {
        self.stderr_level = stderr_level(quiet, verbose);
        self
    }
}

fn default_log_dir() -> Option<PathBuf> {
    docstat_core::config::user_data_local_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

/// Level shown on stderr for the given flags.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the global filter: `RUST_LOG` wins, then flags, then config.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, default_level))
}

fn filter_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the
/// file writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    env_filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match open_log_writer(config) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_current_span(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(config.stderr_level);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn open_log_writer(
    config: &ObservabilityConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if let Some(ref path) = config.log_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).ok()?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
        return Some(tracing_appender::non_blocking(file));
    }

    let dir = config.log_dir.as_ref()?;
    std::fs::create_dir_all(dir).ok()?;
    let appender = RollingBuilder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(dir)
        .ok()?;
    Some(tracing_appender::non_blocking(appender))
}
