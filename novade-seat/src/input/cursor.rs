//! The on-screen cursor a seat drives.
//!
//! A [`Cursor`] is a shared handle: the compositor keeps one to move and
//! render it, the seat keeps one while bound and attaches its pointing
//! devices to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::input::pointer::{ButtonState, MouseButton, MouseButtons};
use crate::types::{DeviceId, Point, SeatId, SurfaceRef, WindowId};

/// Name of the compositor's default cursor shape.
pub const DEFAULT_CURSOR_SHAPE: &str = "default";

/// What the cursor currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorImage {
    /// A themed shape drawn by the compositor.
    Named(String),
    /// A client-provided surface, offset by `hotspot`.
    Surface { surface: SurfaceRef, hotspot: Point },
    Hidden,
}

impl Default for CursorImage {
    fn default() -> Self {
        CursorImage::Named(DEFAULT_CURSOR_SHAPE.to_string())
    }
}

/// The local UI window currently under the cursor, and the global position
/// of its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventWindow {
    pub id: WindowId,
    pub origin: Point,
}

impl EventWindow {
    pub fn new(id: WindowId, origin: Point) -> Self {
        Self { id, origin }
    }

    /// Maps a global position into this window's coordinates.
    pub fn map_from_global(&self, global: Point) -> Point {
        global - self.origin
    }
}

#[derive(Debug, Default)]
struct CursorState {
    seat: Option<SeatId>,
    devices: Vec<DeviceId>,
    position: Point,
    event_window: Option<EventWindow>,
    buttons: MouseButtons,
    image: CursorImage,
}

#[derive(Clone, Default)]
pub struct Cursor {
    state: Rc<RefCell<CursorState>>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        self.state.borrow().position
    }

    /// Moves the cursor. Devices report relative motion to the compositor,
    /// which accumulates it here before the seat is notified.
    pub fn set_position(&self, position: Point) {
        self.state.borrow_mut().position = position;
    }

    pub fn event_window(&self) -> Option<EventWindow> {
        self.state.borrow().event_window
    }

    /// Sets the window that receives the events synthesized for this cursor.
    pub fn set_event_window(&self, window: Option<EventWindow>) {
        self.state.borrow_mut().event_window = window;
    }

    pub fn buttons(&self) -> MouseButtons {
        self.state.borrow().buttons
    }

    pub(crate) fn update_button(&self, button: MouseButton, state: ButtonState) -> MouseButtons {
        let mut inner = self.state.borrow_mut();
        inner.buttons.apply(button, state);
        inner.buttons
    }

    pub fn image(&self) -> CursorImage {
        self.state.borrow().image.clone()
    }

    pub fn set_image(&self, image: CursorImage) {
        self.state.borrow_mut().image = image;
    }

    /// Restores the compositor's default shape.
    pub fn reset_image(&self) {
        self.set_image(CursorImage::default());
    }

    pub fn seat(&self) -> Option<SeatId> {
        self.state.borrow().seat
    }

    pub(crate) fn set_seat(&self, seat: Option<SeatId>) {
        self.state.borrow_mut().seat = seat;
    }

    /// Devices currently driving this cursor.
    pub fn attached_devices(&self) -> Vec<DeviceId> {
        self.state.borrow().devices.clone()
    }

    pub fn is_attached(&self, device: DeviceId) -> bool {
        self.state.borrow().devices.contains(&device)
    }

    pub(crate) fn attach_device(&self, device: DeviceId) {
        let mut inner = self.state.borrow_mut();
        if !inner.devices.contains(&device) {
            debug!("Cursor: Attaching device {:?}.", device);
            inner.devices.push(device);
        }
    }

    pub(crate) fn detach_device(&self, device: DeviceId) {
        let mut inner = self.state.borrow_mut();
        if let Some(index) = inner.devices.iter().position(|d| *d == device) {
            debug!("Cursor: Detaching device {:?}.", device);
            inner.devices.remove(index);
        }
    }

    /// Whether both handles refer to the same cursor.
    pub fn ptr_eq(&self, other: &Cursor) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Cursor")
            .field("seat", &state.seat)
            .field("position", &state.position)
            .field("devices", &state.devices)
            .finish()
    }
}
