//! The wire-facing side of a seat.
//!
//! A [`SeatProtocol`] is the `wl_seat` global and its pointer, keyboard and
//! touch resources. The seat only tells it what to send; serials, resource
//! lookup and per-client fan-out stay behind this trait.

use crate::config::KeyboardConfig;
use crate::input::device::SeatCapability;
use crate::input::keyboard::{KeyState, ModifiersState};
use crate::input::pointer::{AxisOrientation, AxisSource, ButtonState};
use crate::types::{DeviceId, Point, SurfaceRef};

pub trait SeatProtocol {
    fn set_capabilities(&mut self, capabilities: SeatCapability);

    /// Installs the keymap and repeat info for a newly set up keyboard.
    fn setup_keyboard(&mut self, device: DeviceId, config: &KeyboardConfig);

    // Pointer. Positions are surface-local.
    fn pointer_notify_enter(&mut self, surface: SurfaceRef, position: Point);
    /// Sends leave to the focused surface, if any.
    fn pointer_notify_clear_focus(&mut self);
    fn pointer_notify_motion(&mut self, time: u32, position: Point);
    fn pointer_notify_button(&mut self, time: u32, button: u32, state: ButtonState);
    fn pointer_notify_axis(
        &mut self,
        time: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        source: AxisSource,
    );
    fn pointer_notify_frame(&mut self);

    // Keyboard.
    /// Enters `surface` with an empty pressed-key list, leaving any
    /// previously focused surface.
    fn keyboard_notify_enter(&mut self, surface: SurfaceRef);
    fn keyboard_clear_focus(&mut self);
    fn keyboard_notify_key(&mut self, time: u32, keycode: u32, state: KeyState);
    fn keyboard_notify_modifiers(&mut self, modifiers: ModifiersState);

    // Touch. Positions are surface-local.
    fn touch_notify_down(&mut self, surface: SurfaceRef, time: u32, id: i32, position: Point);
    fn touch_notify_motion(&mut self, time: u32, id: i32, position: Point);
    fn touch_notify_up(&mut self, time: u32, id: i32);
    fn touch_notify_cancel(&mut self, surface: SurfaceRef);
    fn touch_notify_frame(&mut self);
}
