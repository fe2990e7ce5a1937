//! Events flowing through a seat.
//!
//! [`DeviceEvent`]s are what the runtime reads from devices. [`InputEvent`]s
//! are the objects exchanged with the local UI layer: the seat synthesizes
//! them for its windows, and the UI hands them back through
//! [`Seat::send_event`](crate::input::seat::Seat::send_event) when a surface
//! item should receive them.

use crate::input::device::InputDevice;
use crate::input::keyboard::{KeyState, KeyboardModifiers, ModifiersState};
use crate::input::pointer::{AxisOrientation, AxisSource, ButtonState, MouseButton, MouseButtons};
use crate::input::touch::TouchPoint;
use crate::types::Point;

/// One raw event as read from a device. Timestamps are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// The cursor moved; its new position is already stored on the cursor.
    PointerMotion { time: u32 },
    PointerButton { button: u32, state: ButtonState, time: u32 },
    PointerAxis {
        source: AxisSource,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        time: u32,
    },
    PointerFrame,
    /// `keycode` is the evdev keycode.
    Key { keycode: u32, state: KeyState, time: u32 },
    Modifiers(ModifiersState),
    TouchDown { id: i32, position: Point, time: u32 },
    TouchMotion { id: i32, position: Point, time: u32 },
    TouchUp { id: i32, time: u32 },
    TouchCancel { time: u32 },
    TouchFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEventKind {
    HoverEnter { position: Point },
    HoverLeave,
    HoverMove { position: Point },
    MouseMove { local: Point, global: Point, buttons: MouseButtons },
    MouseButtonPress { button: MouseButton, local: Point, global: Point, buttons: MouseButtons },
    MouseButtonRelease { button: MouseButton, local: Point, global: Point, buttons: MouseButtons },
    Wheel { local: Point, global: Point, angle_delta: Point, orientation: AxisOrientation },
    KeyPress { native_scan_code: u32, native_virtual_key: u32 },
    KeyRelease { native_scan_code: u32, native_virtual_key: u32 },
    TouchBegin { points: Vec<TouchPoint> },
    TouchUpdate { points: Vec<TouchPoint> },
    TouchEnd { points: Vec<TouchPoint> },
    TouchCancel,
    FocusIn,
    FocusOut,
}

/// An event object shared between the seat and the local UI layer.
///
/// Delivery frameworks are free to flip the accepted flag while an event is
/// passed around; once the seat has forwarded an event to the protocol it
/// also records that, and [`is_consumed`](Self::is_consumed) keeps reporting
/// it consumed whatever the flag says afterwards.
#[derive(Debug, Clone)]
pub struct InputEvent {
    kind: InputEventKind,
    device: InputDevice,
    timestamp: u32,
    modifiers: KeyboardModifiers,
    accepted: bool,
    forwarded: bool,
}

impl InputEvent {
    /// A new event, not yet accepted by anyone.
    pub fn new(kind: InputEventKind, device: InputDevice, timestamp: u32) -> Self {
        Self {
            kind,
            device,
            timestamp,
            modifiers: KeyboardModifiers::empty(),
            accepted: false,
            forwarded: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn kind(&self) -> &InputEventKind {
        &self.kind
    }

    /// The device the event originates from.
    pub fn device(&self) -> &InputDevice {
        &self.device
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn ignore(&mut self) {
        self.accepted = false;
    }

    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Whether the event was accepted, or forwarded by the seat.
    pub fn is_consumed(&self) -> bool {
        self.accepted || self.forwarded
    }

    pub(crate) fn mark_forwarded(&mut self) {
        self.forwarded = true;
    }

    pub(crate) fn clear_forwarded(&mut self) {
        self.forwarded = false;
    }

    /// Touch points carried by touch begin/update/end events.
    pub fn touch_points(&self) -> &[TouchPoint] {
        match &self.kind {
            InputEventKind::TouchBegin { points }
            | InputEventKind::TouchUpdate { points }
            | InputEventKind::TouchEnd { points } => points,
            _ => &[],
        }
    }
}
