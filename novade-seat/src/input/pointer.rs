//! Pointer button and axis vocabulary shared by the raw device events, the
//! synthesized local UI events and the protocol notifications.

use bitflags::bitflags;

/// Linux evdev button codes (`linux/input-event-codes.h`).
pub const BTN_LEFT: u32 = 0x110;
pub const BTN_RIGHT: u32 = 0x111;
pub const BTN_MIDDLE: u32 = 0x112;
pub const BTN_SIDE: u32 = 0x113;
pub const BTN_EXTRA: u32 = 0x114;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A mouse button as the local UI layer names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    /// Any other evdev code.
    Other(u32),
}

impl MouseButton {
    pub fn from_native(code: u32) -> Self {
        match code {
            BTN_LEFT => MouseButton::Left,
            BTN_RIGHT => MouseButton::Right,
            BTN_MIDDLE => MouseButton::Middle,
            BTN_SIDE => MouseButton::Back,
            BTN_EXTRA => MouseButton::Forward,
            other => MouseButton::Other(other),
        }
    }

    pub fn to_native(self) -> u32 {
        match self {
            MouseButton::Left => BTN_LEFT,
            MouseButton::Right => BTN_RIGHT,
            MouseButton::Middle => BTN_MIDDLE,
            MouseButton::Back => BTN_SIDE,
            MouseButton::Forward => BTN_EXTRA,
            MouseButton::Other(code) => code,
        }
    }

    fn flag(self) -> MouseButtons {
        match self {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Back => MouseButtons::BACK,
            MouseButton::Forward => MouseButtons::FORWARD,
            MouseButton::Other(_) => MouseButtons::empty(),
        }
    }
}

bitflags! {
    /// Buttons currently held down on a cursor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u32 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const BACK = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

impl MouseButtons {
    pub fn apply(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => self.insert(button.flag()),
            ButtonState::Released => self.remove(button.flag()),
        }
    }
}

/// Where a scroll event came from (`wl_pointer.axis_source`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSource {
    Wheel,
    Finger,
    Continuous,
    WheelTilt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrientation {
    Vertical,
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_button_mapping() {
        for button in [
            MouseButton::Left,
            MouseButton::Right,
            MouseButton::Middle,
            MouseButton::Back,
            MouseButton::Forward,
            MouseButton::Other(0x115),
        ] {
            assert_eq!(MouseButton::from_native(button.to_native()), button);
        }
        assert_eq!(MouseButton::Left.to_native(), 272);
    }

    #[test]
    fn test_buttons_apply() {
        let mut buttons = MouseButtons::empty();
        buttons.apply(MouseButton::Left, ButtonState::Pressed);
        buttons.apply(MouseButton::Right, ButtonState::Pressed);
        buttons.apply(MouseButton::Left, ButtonState::Released);
        buttons.apply(MouseButton::Other(0x120), ButtonState::Pressed);
        assert_eq!(buttons, MouseButtons::RIGHT);
    }
}
