//! Keyboard state carried by the seat.

use bitflags::bitflags;

// Libinput/evdev keycodes are offset by +8 compared to XKB keycodes.
pub const KEYCODE_OFFSET: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Standard XKB modifier masks (core X11 modifier indices).
pub mod mask {
    pub const SHIFT: u32 = 1 << 0;
    pub const CAPS_LOCK: u32 = 1 << 1;
    pub const CTRL: u32 = 1 << 2;
    pub const ALT: u32 = 1 << 3;
    pub const NUM_LOCK: u32 = 1 << 4;
    pub const LOGO: u32 = 1 << 6;
}

/// Serialized modifier state as reported by the keyboard backend and sent
/// in `wl_keyboard.modifiers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifiersState {
    pub depressed: u32,
    pub latched: u32,
    pub locked: u32,
    pub group: u32,
}

impl ModifiersState {
    pub fn effective(&self) -> u32 {
        self.depressed | self.latched | self.locked
    }

    /// The modifiers the local UI layer sees on synthesized events.
    pub fn keyboard_modifiers(&self) -> KeyboardModifiers {
        let effective = self.effective();
        let mut mods = KeyboardModifiers::empty();
        mods.set(KeyboardModifiers::SHIFT, effective & mask::SHIFT != 0);
        mods.set(KeyboardModifiers::CTRL, effective & mask::CTRL != 0);
        mods.set(KeyboardModifiers::ALT, effective & mask::ALT != 0);
        mods.set(KeyboardModifiers::LOGO, effective & mask::LOGO != 0);
        mods.set(KeyboardModifiers::CAPS_LOCK, effective & mask::CAPS_LOCK != 0);
        mods.set(KeyboardModifiers::NUM_LOCK, effective & mask::NUM_LOCK != 0);
        mods
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyboardModifiers: u32 {
        const SHIFT = 1;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const LOGO = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
    }
}
