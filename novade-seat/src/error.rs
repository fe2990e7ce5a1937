//! Error handling for the NovaDE seat layer.
//!
//! Errors are split by concern, the same way `novade-core` does it:
//! [`SeatError`] for seat/device bookkeeping, [`ConfigError`] for loading and
//! validating [`SeatConfig`](crate::config::SeatConfig), and [`LoggingError`]
//! for subscriber setup.
//!
//! Only bookkeeping mistakes made by the compositor itself surface as errors.
//! Inconsistent device streams and events without a focused target are
//! handled inside the seat (logged or reported as "not handled") and never
//! reach the caller as an `Err`.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{DeviceId, SeatId};

/// Errors returned by [`Seat`](crate::input::seat::Seat) and
/// [`SeatManager`](crate::manager::SeatManager) operations.
#[derive(Debug, Error)]
pub enum SeatError {
    /// The device already belongs to a seat (possibly this one).
    #[error("Input device {device:?} is already attached to seat {seat:?}")]
    AlreadyAttached { device: DeviceId, seat: SeatId },

    /// The device is not attached to the seat it was detached from.
    #[error("Input device {device:?} is not attached to seat {seat:?}")]
    NotAttached { device: DeviceId, seat: SeatId },

    /// The cursor is currently bound to another seat.
    #[error("Cursor is already bound to seat {seat:?}")]
    CursorAlreadyBound { seat: SeatId },

    /// An event filter is already installed on the seat.
    #[error("Seat already has an event filter installed")]
    FilterAlreadySet,

    /// No seat with the given name is managed.
    #[error("Seat not found: {0}")]
    SeatNotFound(String),

    /// A seat with the given name is already managed.
    #[error("A seat named '{0}' already exists")]
    DuplicateSeat(String),

    /// Loading or validating the seat configuration failed.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
}

/// Error type for configuration-related operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`SeatConfig`](crate::config::SeatConfig).
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Error type for logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not one of trace/debug/info/warn/error.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Installing the global subscriber failed (usually: already installed).
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),
}
