//! # NovaDE Seat (`novade-seat`)
//!
//! Input routing for one compositor seat: raw events from pointer, keyboard
//! and touch devices go in, focus-aware protocol notifications come out.
//!
//! ## Overview
//!
//! - **Devices**: [`InputDevice`] handles attached to a [`Seat`] through its
//!   [`DeviceRegistry`]; the advertised [`SeatCapability`] is the union of
//!   their classes.
//! - **Focus**: the [`FocusManager`] keeps pointer, keyboard and touch focus
//!   and pairs every pointer enter with a leave.
//! - **Touch**: a [`TouchTracker`] per touch device batches point transitions
//!   into frames.
//! - **Routing**: the compositor's UI layer ([`LocalUi`]) gets first refusal
//!   on synthesized events, an optional [`EventFilter`] can consume anything,
//!   and the rest reaches the wire through [`SeatProtocol`].
//!
//! Everything runs on the compositor's dispatch thread; nothing here is
//! `Send`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novade_seat::{DeviceClass, DeviceEvent, InputDevice, SeatConfig, SeatManager};
//!
//! let mut seats = SeatManager::new();
//! seats.create_seat(SeatConfig::default())?;
//! let seat = seats.seat_mut("seat0").unwrap();
//! seat.create(Box::new(my_wl_seat));
//!
//! let touchscreen = InputDevice::new("touchscreen", DeviceClass::Touch);
//! seat.attach_device(&touchscreen)?;
//! seats.dispatch(&touchscreen, DeviceEvent::TouchFrame);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod manager;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{KeyboardConfig, KeymapRules, LoggingConfig, SeatConfig, TouchConfig};
pub use error::{ConfigError, LoggingError, SeatError};
pub use input::{
    Cursor, CursorImage, DeviceClass, DeviceEvent, DeviceRegistry, EventFilter, EventFilterChain,
    EventWindow, FocusManager, InputDevice, InputEvent, InputEventKind, LocalUi, Seat,
    SeatCapability, SeatProtocol, TouchPointState, TouchTracker,
};
pub use manager::SeatManager;
pub use types::{ClientId, DeviceId, Point, Rect, SeatId, SurfaceId, SurfaceRef, UiObjectId, WindowId};
