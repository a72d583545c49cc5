//! Logging utilities for the Cliniko prober.
//!
//! Structured logs go to stderr so that the probe transcript on stdout stays
//! readable; an optional daily rolling file can be added from configuration.

use cliniko_probe_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{config_error, ProbeError};

/// Crates whose events are enabled at the configured level.
const LOG_TARGETS: &[&str] = &[
    "cliniko_probe",
    "cliniko_probe_cli",
    "cliniko_probe_common",
    "cliniko_probe_config",
];

/// File name prefix of the rolling log file.
const LOG_FILE_PREFIX: &str = "cliniko-probe.log";

/// Initialize the tracing subscriber with INFO level on stderr only.
pub fn init() {
    // A fixed level and no file cannot fail to build.
    let _ = init_with_level(Level::INFO, None);
}

/// Initialize the tracing subscriber from the `[logging]` configuration.
///
/// The returned guard must be kept alive for the run when a log file is
/// configured, otherwise buffered lines are lost on exit.
pub fn init_from_config(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ProbeError> {
    let level = Level::from_str(config.level.trim())
        .map_err(|_| config_error(format!("unknown log level '{}'", config.level)))?;
    init_with_level(level, config.file.as_deref())
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` still takes precedence when it is set.
pub fn init_with_level(
    level: Level,
    file_dir: Option<&str>,
) -> Result<Option<WorkerGuard>, ProbeError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let mut filter = EnvFilter::new("warn");
            for target in LOG_TARGETS {
                let directive = format!("{}={}", target, level)
                    .parse()
                    .map_err(|e| config_error(format!("invalid log directive: {}", e)))?;
                filter = filter.add_directive(directive);
            }
            filter
        }
    };

    let (file_layer, guard) = match file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: a subscriber may already be installed (tests, embedding).
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    Ok(guard)
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
