//! Event routing.
//!
//! Two paths lead from an event to the protocol:
//!
//! - [`Seat::send_event`] is called by the local UI once it has decided which
//!   client surface an event belongs to (hover enter/leave, pointer motion,
//!   buttons, keys and touch points). Forwarding is the default outcome.
//! - [`Seat::dispatch`] takes raw device events from the runtime. Pointer and
//!   key events are first offered to the local UI as synthesized events and
//!   only reach the protocol directly when the UI leaves them unconsumed.
//!   Touch events go through the device's [`TouchTracker`] and are emitted
//!   one frame at a time.
//!
//! [`TouchTracker`]: crate::input::touch::TouchTracker

use tracing::{debug, trace, warn};

use crate::input::cursor::Cursor;
use crate::input::device::InputDevice;
use crate::input::event::{DeviceEvent, InputEvent, InputEventKind};
use crate::input::keyboard::{KeyState, ModifiersState, KEYCODE_OFFSET};
use crate::input::pointer::{AxisOrientation, AxisSource, ButtonState, MouseButton};
use crate::input::seat::Seat;
use crate::input::touch::TouchPointState;
use crate::logging::TOUCH_EVENTS_TARGET;
use crate::types::{Point, SurfaceRef, UiObjectId, WindowId};

// Angle delta of one wheel notch, in eighths of a degree.
const WHEEL_NOTCH_ANGLE: f64 = 120.0;

impl Seat {
    /// Routes an event the local UI assigned to `target` (wrapped by the UI
    /// item `object`, if any) to the protocol.
    ///
    /// Returns whether the event was handled. Events from devices of other
    /// seats are not handled.
    pub fn send_event(&mut self, target: SurfaceRef, object: Option<UiObjectId>, event: &mut InputEvent) -> bool {
        if event.device().seat() != Some(self.id) {
            return false;
        }
        if self.filter_surface_event(target, object, event) {
            return true;
        }
        if !self.is_live() {
            event.ignore();
            return false;
        }

        event.accept();
        event.mark_forwarded();
        let handled = self.forward_to_protocol(target, event);
        if !handled {
            event.ignore();
            event.clear_forwarded();
        }
        handled
    }

    fn filter_surface_event(&mut self, target: SurfaceRef, object: Option<UiObjectId>, event: &mut InputEvent) -> bool {
        let Some(mut filter) = self.filter.take() else {
            return false;
        };
        let consumed = filter.filter_surface_event(self, target, object, event);
        if self.filter.is_none() {
            self.filter = Some(filter);
        }
        consumed
    }

    fn forward_to_protocol(&mut self, target: SurfaceRef, event: &InputEvent) -> bool {
        let cursor_position = self.cursor.as_ref().map(Cursor::position);
        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        let time = event.timestamp();

        match event.kind() {
            InputEventKind::HoverEnter { position } => {
                let global = cursor_position.unwrap_or(*position);
                self.focus.pointer_enter(protocol, target, *position, global);
                true
            }
            InputEventKind::HoverLeave => {
                if self.focus.pointer_leave(protocol, target) {
                    if let Some(cursor) = &self.cursor {
                        cursor.reset_image();
                    }
                }
                true
            }
            InputEventKind::MouseButtonPress { button, .. } => {
                self.focus
                    .pointer_button(protocol, time, button.to_native(), ButtonState::Pressed)
            }
            InputEventKind::MouseButtonRelease { button, .. } => {
                self.focus
                    .pointer_button(protocol, time, button.to_native(), ButtonState::Released)
            }
            InputEventKind::HoverMove { position } => {
                let global = cursor_position.unwrap_or(*position);
                self.focus.pointer_motion(protocol, target, *position, global, time)
            }
            InputEventKind::MouseMove { local, global, .. } => {
                self.focus.pointer_motion(protocol, target, *local, *global, time)
            }
            InputEventKind::KeyPress { native_virtual_key, .. } => {
                self.focus.key(protocol, time, *native_virtual_key, KeyState::Pressed)
            }
            InputEventKind::KeyRelease { native_virtual_key, .. } => {
                self.focus.key(protocol, time, *native_virtual_key, KeyState::Released)
            }
            InputEventKind::TouchBegin { points }
            | InputEventKind::TouchUpdate { points }
            | InputEventKind::TouchEnd { points } => {
                for point in points {
                    match point.state {
                        TouchPointState::Pressed => {
                            self.focus
                                .touch_down(protocol, target, time, point.id, point.position());
                        }
                        TouchPointState::Updated => {
                            protocol.touch_notify_motion(time, point.id, point.position());
                        }
                        TouchPointState::Released => protocol.touch_notify_up(time, point.id),
                        // Clients keep the last position of steady points.
                        TouchPointState::Stationary => {}
                    }
                }
                true
            }
            InputEventKind::TouchCancel => self.focus.touch_cancel(protocol, Some(target)),
            _ => false,
        }
    }

    /// Handles one raw event from `device`. Returns whether it was handled.
    pub fn dispatch(&mut self, device: &InputDevice, event: DeviceEvent) -> bool {
        if device.seat() != Some(self.id) || !self.devices.contains(device.id()) {
            warn!(
                "Seat '{}': Dropping {:?} from device '{}' which is not attached to this seat.",
                self.config.name,
                event,
                device.name()
            );
            return false;
        }

        match event {
            DeviceEvent::PointerMotion { time } => self.notify_motion(device, time),
            DeviceEvent::PointerButton { button, state, time } => {
                self.notify_button(device, button, state, time)
            }
            DeviceEvent::PointerAxis {
                source,
                orientation,
                delta,
                delta_discrete,
                time,
            } => self.notify_axis(device, source, orientation, delta, delta_discrete, time),
            DeviceEvent::PointerFrame => self.notify_frame(),
            DeviceEvent::Key { keycode, state, time } => self.notify_key(device, keycode, state, time),
            DeviceEvent::Modifiers(modifiers) => self.notify_modifiers(modifiers),
            DeviceEvent::TouchDown { id, position, time } => {
                self.notify_touch_down(device, id, position, time)
            }
            DeviceEvent::TouchMotion { id, position, time } => {
                self.notify_touch_motion(device, id, position, time)
            }
            DeviceEvent::TouchUp { id, time } => self.notify_touch_up(device, id, time),
            DeviceEvent::TouchCancel { time } => self.notify_touch_cancel(device, time),
            DeviceEvent::TouchFrame => self.notify_touch_frame(device),
        }
    }

    fn synthesize(&self, kind: InputEventKind, device: &InputDevice, time: u32) -> InputEvent {
        InputEvent::new(kind, device.clone(), time).with_modifiers(self.modifiers.keyboard_modifiers())
    }

    /// Hands `event` to the local UI for `window`, after the event filter.
    /// Returns whether the event ended up consumed.
    fn deliver_to_window(&mut self, window: WindowId, event: &mut InputEvent) -> bool {
        if self.filter_input_event(window, event) {
            event.accept();
            return true;
        }
        let Some(mut ui) = self.ui.take() else {
            return false;
        };
        ui.send_event(self, window, event);
        if self.ui.is_none() {
            self.ui = Some(ui);
        }
        event.is_consumed()
    }

    /// Cursor moved to its current position.
    pub fn notify_motion(&mut self, device: &InputDevice, time: u32) -> bool {
        let Some(cursor) = self.cursor.clone() else {
            return false;
        };
        let global = cursor.position();

        if let Some(window) = cursor.event_window() {
            let kind = InputEventKind::MouseMove {
                local: window.map_from_global(global),
                global,
                buttons: cursor.buttons(),
            };
            let mut event = self.synthesize(kind, device, time);
            if self.deliver_to_window(window.id, &mut event) {
                return true;
            }
        }

        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus.pointer_motion_global(protocol, global, time)
    }

    /// `button` is the evdev code.
    pub fn notify_button(&mut self, device: &InputDevice, button: u32, state: ButtonState, time: u32) -> bool {
        if let Some(cursor) = self.cursor.clone() {
            let mouse_button = MouseButton::from_native(button);
            let buttons = cursor.update_button(mouse_button, state);

            if let Some(window) = cursor.event_window() {
                let global = cursor.position();
                let local = window.map_from_global(global);
                let kind = match state {
                    ButtonState::Pressed => InputEventKind::MouseButtonPress {
                        button: mouse_button,
                        local,
                        global,
                        buttons,
                    },
                    ButtonState::Released => InputEventKind::MouseButtonRelease {
                        button: mouse_button,
                        local,
                        global,
                        buttons,
                    },
                };
                let mut event = self.synthesize(kind, device, time);
                if self.deliver_to_window(window.id, &mut event) {
                    return true;
                }
            }
        }

        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus.pointer_button(protocol, time, button, state)
    }

    pub fn notify_axis(
        &mut self,
        device: &InputDevice,
        source: AxisSource,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        time: u32,
    ) -> bool {
        if let Some(cursor) = self.cursor.clone() {
            if let Some(window) = cursor.event_window() {
                let global = cursor.position();
                // Positive angles scroll up/left, the opposite of axis deltas.
                let angle = if delta_discrete != 0 {
                    -f64::from(delta_discrete) * WHEEL_NOTCH_ANGLE
                } else {
                    -delta
                };
                let angle_delta = match orientation {
                    AxisOrientation::Vertical => Point::new(0.0, angle),
                    AxisOrientation::Horizontal => Point::new(angle, 0.0),
                };
                let kind = InputEventKind::Wheel {
                    local: window.map_from_global(global),
                    global,
                    angle_delta,
                    orientation,
                };
                let mut event = self.synthesize(kind, device, time);
                if self.deliver_to_window(window.id, &mut event) {
                    return true;
                }
            }
        }

        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus
            .pointer_axis(protocol, time, orientation, delta, delta_discrete, source)
    }

    pub fn notify_frame(&mut self) -> bool {
        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        protocol.pointer_notify_frame();
        true
    }

    /// `keycode` is the evdev keycode. With a keyboard focus window set, the
    /// key goes to that window and never to the protocol.
    pub fn notify_key(&mut self, device: &InputDevice, keycode: u32, state: KeyState, time: u32) -> bool {
        if let Some(window) = self.focus.focus_window() {
            let native_scan_code = keycode.saturating_add(KEYCODE_OFFSET);
            let kind = match state {
                KeyState::Pressed => InputEventKind::KeyPress {
                    native_scan_code,
                    native_virtual_key: keycode,
                },
                KeyState::Released => InputEventKind::KeyRelease {
                    native_scan_code,
                    native_virtual_key: keycode,
                },
            };
            let mut event = self.synthesize(kind, device, time);
            self.deliver_to_window(window, &mut event);
            return true;
        }

        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus.key(protocol, time, keycode, state)
    }

    pub fn notify_modifiers(&mut self, modifiers: ModifiersState) -> bool {
        self.modifiers = modifiers;
        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus.modifiers(protocol, modifiers)
    }

    pub fn notify_touch_down(&mut self, device: &InputDevice, id: i32, position: Point, time: u32) -> bool {
        self.touch_time = time;
        let Some(tracker) = self.devices.touch_state(device.id()) else {
            warn!(
                "Seat '{}': Touch down from device '{}' which has no touch state.",
                self.config.name,
                device.name()
            );
            return false;
        };

        if tracker.needs_flush_before_down(id) {
            debug!(
                target: TOUCH_EVENTS_TARGET,
                "Touch id {} reused before its release was reported; forcing a frame.", id
            );
            self.flush_touch_frame(device);
        }
        if let Some(tracker) = self.devices.touch_state_mut(device.id()) {
            tracker.down(id, position);
        }
        true
    }

    pub fn notify_touch_motion(&mut self, device: &InputDevice, id: i32, position: Point, time: u32) -> bool {
        self.touch_time = time;
        match self.devices.touch_state_mut(device.id()) {
            Some(tracker) => tracker.motion(id, position),
            None => false,
        }
    }

    pub fn notify_touch_up(&mut self, device: &InputDevice, id: i32, time: u32) -> bool {
        self.touch_time = time;
        let Some(tracker) = self.devices.touch_state_mut(device.id()) else {
            return false;
        };
        if tracker.up(id) {
            debug!(target: TOUCH_EVENTS_TARGET, "All touch points released; forcing a frame.");
            self.flush_touch_frame(device);
        }
        true
    }

    /// Cancels the current touch sequence. Touch points are left as they
    /// are.
    pub fn notify_touch_cancel(&mut self, device: &InputDevice, time: u32) -> bool {
        self.touch_time = time;
        if let Some(window) = self.cursor.as_ref().and_then(Cursor::event_window) {
            let mut event = self.synthesize(InputEventKind::TouchCancel, device, time);
            if self.deliver_to_window(window.id, &mut event) {
                return true;
            }
        }

        let Some(protocol) = self.protocol.as_deref_mut() else {
            return false;
        };
        self.focus.touch_cancel(protocol, None)
    }

    pub fn notify_touch_frame(&mut self, device: &InputDevice) -> bool {
        self.flush_touch_frame(device)
    }

    /// Frame boundary reported without a device: flushes every touch device
    /// in attach order.
    pub fn notify_touch_frame_all(&mut self) {
        for device in self.devices.touch_devices() {
            self.flush_touch_frame(&device);
        }
    }

    /// Delivers the pending touch frame of `device`: the points go to the
    /// cursor's event window as one touch event, then the protocol frame
    /// closes the batch. Returns `false` when there was nothing to report.
    fn flush_touch_frame(&mut self, device: &InputDevice) -> bool {
        let Some(frame) = self
            .devices
            .touch_state_mut(device.id())
            .and_then(|tracker| tracker.frame())
        else {
            return false;
        };
        debug!(
            target: TOUCH_EVENTS_TARGET,
            "Touch frame for device '{}', handle the following state: {:?}",
            device.name(),
            frame.points
        );

        if let Some(window) = self.cursor.as_ref().and_then(Cursor::event_window) {
            let kind = if frame.all(TouchPointState::Pressed) {
                InputEventKind::TouchBegin { points: frame.points }
            } else if frame.all(TouchPointState::Released) {
                InputEventKind::TouchEnd { points: frame.points }
            } else {
                InputEventKind::TouchUpdate { points: frame.points }
            };
            let mut event = self.synthesize(kind, device, self.touch_time);
            let consumed = self.deliver_to_window(window.id, &mut event);
            trace!(target: TOUCH_EVENTS_TARGET, "Touch frame consumed by the local UI: {}", consumed);
        }

        if let Some(protocol) = self.protocol.as_deref_mut() {
            protocol.touch_notify_frame();
        }
        if !self.devices.has_touch_points() {
            self.focus.touch_sequence_ended();
        }
        true
    }
}
