//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize console logging at `info` (overridable with `RUST_LOG`)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logger with optional daily rotating file output
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset (e.g. "info", "listing_store=debug")
/// * `json_format` - JSON lines instead of human readable output
/// * `log_dir` - directory for `listing.YYYY-MM-DD` files; created if missing
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_path = Path::new(dir);
            fs::create_dir_all(log_path)?;
            let file_appender = tracing_appender::rolling::daily(log_path, "listing");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file_appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
