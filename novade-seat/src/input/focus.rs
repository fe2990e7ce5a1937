//! Pointer, keyboard and touch focus of a seat.
//!
//! The [`FocusManager`] mirrors what the protocol layer currently considers
//! focused and is the only place that issues focus-changing protocol
//! notifications, so enter and leave are always paired.

use tracing::{debug, error, warn};

use crate::input::keyboard::{KeyState, ModifiersState};
use crate::input::pointer::{AxisOrientation, AxisSource, ButtonState};
use crate::input::protocol::SeatProtocol;
use crate::types::{Point, SurfaceId, SurfaceRef, WindowId};

#[derive(Debug, Default)]
pub struct FocusManager {
    pointer_focus: Option<SurfaceRef>,
    // Surface focused before the latest enter; a leave for it may still be
    // in flight from the UI layer.
    previous_pointer_focus: Option<SurfaceRef>,
    // Global position of the focused surface's origin.
    pointer_origin: Point,
    keyboard_focus: Option<SurfaceRef>,
    focus_window: Option<WindowId>,
    touch_focus: Option<SurfaceRef>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_focus(&self) -> Option<SurfaceRef> {
        self.pointer_focus
    }

    pub fn previous_pointer_focus(&self) -> Option<SurfaceRef> {
        self.previous_pointer_focus
    }

    pub fn keyboard_focus(&self) -> Option<SurfaceRef> {
        self.keyboard_focus
    }

    pub fn focus_window(&self) -> Option<WindowId> {
        self.focus_window
    }

    pub fn touch_focus(&self) -> Option<SurfaceRef> {
        self.touch_focus
    }

    /// Maps a global position into the pointer-focused surface.
    pub fn pointer_local(&self, global: Point) -> Point {
        global - self.pointer_origin
    }

    pub(crate) fn pointer_enter(
        &mut self,
        protocol: &mut dyn SeatProtocol,
        target: SurfaceRef,
        local: Point,
        global: Point,
    ) {
        self.pointer_origin = global - local;
        if self.pointer_focus == Some(target) {
            return;
        }

        if let Some(current) = self.pointer_focus {
            warn!(
                "FocusManager: Pointer enters {:?} while {:?} still has focus; leaving it first.",
                target.id, current.id
            );
            protocol.pointer_notify_clear_focus();
        }
        debug!("FocusManager: Pointer enter {:?} at {:?}.", target.id, local);
        self.previous_pointer_focus = self.pointer_focus;
        self.pointer_focus = Some(target);
        protocol.pointer_notify_enter(target, local);
    }

    /// Returns `true` when a leave was sent, `false` for a stale leave.
    pub(crate) fn pointer_leave(&mut self, protocol: &mut dyn SeatProtocol, target: SurfaceRef) -> bool {
        let known = self.pointer_focus == Some(target) || self.previous_pointer_focus == Some(target);
        debug_assert!(known, "pointer leave for a surface that never had focus");
        if !known {
            error!("FocusManager: Pointer leave for {:?} which never had focus.", target.id);
        }
        if self.pointer_focus != Some(target) {
            return false;
        }

        debug!("FocusManager: Pointer leave {:?}.", target.id);
        self.previous_pointer_focus = self.pointer_focus.take();
        protocol.pointer_notify_clear_focus();
        true
    }

    pub(crate) fn pointer_motion(
        &mut self,
        protocol: &mut dyn SeatProtocol,
        target: SurfaceRef,
        local: Point,
        global: Point,
        time: u32,
    ) -> bool {
        let focused = self.pointer_focus == Some(target);
        debug_assert!(focused, "pointer motion for a surface without pointer focus");
        if !focused {
            error!(
                "FocusManager: Pointer motion for {:?} but focus is {:?}; dropping it.",
                target.id,
                self.pointer_focus.map(|s| s.id)
            );
            return false;
        }
        self.pointer_origin = global - local;
        protocol.pointer_notify_motion(time, local);
        true
    }

    /// Motion at a global position, mapped into the focused surface.
    pub(crate) fn pointer_motion_global(
        &self,
        protocol: &mut dyn SeatProtocol,
        global: Point,
        time: u32,
    ) -> bool {
        if self.pointer_focus.is_none() {
            return false;
        }
        protocol.pointer_notify_motion(time, self.pointer_local(global));
        true
    }

    pub(crate) fn pointer_button(
        &self,
        protocol: &mut dyn SeatProtocol,
        time: u32,
        button: u32,
        state: ButtonState,
    ) -> bool {
        if self.pointer_focus.is_none() {
            return false;
        }
        protocol.pointer_notify_button(time, button, state);
        true
    }

    pub(crate) fn pointer_axis(
        &self,
        protocol: &mut dyn SeatProtocol,
        time: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        source: AxisSource,
    ) -> bool {
        if self.pointer_focus.is_none() {
            return false;
        }
        protocol.pointer_notify_axis(time, orientation, delta, delta_discrete, source);
        true
    }

    /// Sets the keyboard focus surface. A surface target takes precedence
    /// over a focus window, so setting one clears the window.
    pub(crate) fn set_keyboard_focus(
        &mut self,
        protocol: Option<&mut dyn SeatProtocol>,
        target: Option<SurfaceRef>,
    ) {
        debug!(
            "FocusManager: Keyboard focus {:?} -> {:?}.",
            self.keyboard_focus.map(|s| s.id),
            target.map(|s| s.id)
        );
        self.keyboard_focus = target;
        if target.is_some() {
            self.focus_window = None;
        }
        if let Some(protocol) = protocol {
            match target {
                Some(surface) => protocol.keyboard_notify_enter(surface),
                None => protocol.keyboard_clear_focus(),
            }
        }
    }

    pub(crate) fn set_focus_window(&mut self, window: Option<WindowId>) {
        debug!("FocusManager: Keyboard focus window -> {:?}.", window);
        self.focus_window = window;
    }

    pub(crate) fn key(&self, protocol: &mut dyn SeatProtocol, time: u32, keycode: u32, state: KeyState) -> bool {
        if self.keyboard_focus.is_none() {
            return false;
        }
        protocol.keyboard_notify_key(time, keycode, state);
        true
    }

    pub(crate) fn modifiers(&self, protocol: &mut dyn SeatProtocol, modifiers: ModifiersState) -> bool {
        if self.keyboard_focus.is_none() {
            return false;
        }
        protocol.keyboard_notify_modifiers(modifiers);
        true
    }

    pub(crate) fn touch_down(
        &mut self,
        protocol: &mut dyn SeatProtocol,
        target: SurfaceRef,
        time: u32,
        id: i32,
        position: Point,
    ) {
        self.touch_focus = Some(target);
        protocol.touch_notify_down(target, time, id, position);
    }

    /// Forgets the touch focus once no touch sequence is active.
    pub(crate) fn touch_sequence_ended(&mut self) {
        self.touch_focus = None;
    }

    pub(crate) fn touch_cancel(&self, protocol: &mut dyn SeatProtocol, target: Option<SurfaceRef>) -> bool {
        let Some(surface) = target.or(self.touch_focus) else {
            return false;
        };
        protocol.touch_notify_cancel(surface);
        true
    }

    /// Forgets every focus slot referring to `surface`. Returns whether any
    /// slot changed.
    pub(crate) fn surface_destroyed(&mut self, surface: SurfaceId) -> bool {
        let mut changed = false;
        for slot in [
            &mut self.pointer_focus,
            &mut self.previous_pointer_focus,
            &mut self.keyboard_focus,
            &mut self.touch_focus,
        ] {
            if slot.map(|s| s.id) == Some(surface) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    /// Drops all focus without notifying anyone.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
