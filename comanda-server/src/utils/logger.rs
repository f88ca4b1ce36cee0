//! Logging Infrastructure
//!
//! Console logging with an env-filter, plus optional daily-rolling files.

use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger (console only, `info`)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", None)
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `level` when set. File output goes to
/// `{log_dir}/comanda-server.YYYY-MM-DD` when the directory exists.
pub fn init_logger_with_file(level: &str, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_layer = log_dir
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "comanda-server");
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(appender)
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
