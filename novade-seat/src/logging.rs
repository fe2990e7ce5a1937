//! Logging setup built on `tracing-subscriber`.
//!
//! The seat itself only emits `tracing` events; installing a subscriber is
//! up to the embedding compositor. These helpers cover the two usual cases:
//! an early/minimal stderr logger and a configured one.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Target used for per-event touch tracing, kept apart so it can be
/// enabled on its own (`RUST_LOG=novade_seat::touch::events=trace`).
pub const TOUCH_EVENTS_TARGET: &str = "novade_seat::touch::events";

/// Installs a stderr logger filtered by `RUST_LOG` (default `info`).
///
/// Errors (e.g. a subscriber is already installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

fn parse_level(level: &str) -> Result<Level, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

/// Installs the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = parse_level(&config.level)?;
    let filter = EnvFilter::new(level.to_string());

    let result = match config.format.to_lowercase().as_str() {
        "json" => fmt::Subscriber::builder()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init(),
        _ => fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .try_init(),
    };

    result.map_err(|e| LoggingError::InitializationError(e.to_string()))?;
    tracing::info!(
        "Logging: Initialized at level '{}' with format '{}'.",
        level,
        config.format
    );
    Ok(())
}
