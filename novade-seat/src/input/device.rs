//! Input devices and the per-seat device registry.
//!
//! An [`InputDevice`] is a cheap, clonable handle. The seat owns the forward
//! association (its [`DeviceRegistry`]); the device only remembers the id of
//! the seat it belongs to, which is how an event coming from a device is
//! routed back to its seat.

use bitflags::bitflags;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::input::touch::TouchTracker;
use crate::types::{DeviceId, SeatId};

bitflags! {
    /// Capabilities advertised through `wl_seat.capabilities`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeatCapability: u32 {
        /// The seat has pointer devices (e.g., a mouse).
        const POINTER = 1;
        /// The seat has keyboard devices.
        const KEYBOARD = 2;
        /// The seat has touch devices.
        const TOUCH = 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Pointer,
    Keyboard,
    Touch,
}

impl DeviceClass {
    pub fn capability(self) -> SeatCapability {
        match self {
            DeviceClass::Pointer => SeatCapability::POINTER,
            DeviceClass::Keyboard => SeatCapability::KEYBOARD,
            DeviceClass::Touch => SeatCapability::TOUCH,
        }
    }

    /// Whether devices of this class drive the seat's cursor.
    pub fn drives_cursor(self) -> bool {
        matches!(self, DeviceClass::Pointer | DeviceClass::Touch)
    }
}

struct DeviceInner {
    id: DeviceId,
    name: String,
    class: DeviceClass,
    seat: Cell<Option<SeatId>>,
}

/// Handle to one input device.
///
/// Clones share the same device; equality is identity.
#[derive(Clone)]
pub struct InputDevice {
    inner: Rc<DeviceInner>,
}

impl InputDevice {
    pub fn new(name: impl Into<String>, class: DeviceClass) -> Self {
        Self::with_id(DeviceId::new_unique(), name, class)
    }

    pub fn with_id(id: DeviceId, name: impl Into<String>, class: DeviceClass) -> Self {
        Self {
            inner: Rc::new(DeviceInner {
                id,
                name: name.into(),
                class,
                seat: Cell::new(None),
            }),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn class(&self) -> DeviceClass {
        self.inner.class
    }

    /// The seat this device currently belongs to.
    pub fn seat(&self) -> Option<SeatId> {
        self.inner.seat.get()
    }

    pub(crate) fn set_seat(&self, seat: Option<SeatId>) {
        self.inner.seat.set(seat);
    }
}

impl PartialEq for InputDevice {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for InputDevice {}

impl fmt::Debug for InputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDevice")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("class", &self.inner.class)
            .field("seat", &self.inner.seat.get())
            .finish()
    }
}

/// Devices attached to one seat, plus the side-state the seat keeps for
/// them.
///
/// Side-state lives in slots keyed by device id. A slot is allocated when the
/// seat performs protocol-level setup for the device and freed on detach.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<InputDevice>,
    touch_states: HashMap<DeviceId, TouchTracker>,
    // Attach order of touch devices; frames for all devices are flushed in it.
    touch_order: Vec<DeviceId>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.iter().any(|d| d.id() == id)
    }

    pub fn get(&self, id: DeviceId) -> Option<&InputDevice> {
        self.devices.iter().find(|d| d.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputDevice> {
        self.devices.iter()
    }

    pub(crate) fn push(&mut self, device: InputDevice) {
        self.devices.push(device);
    }

    /// Removes the device and frees its side-state slot.
    pub(crate) fn remove(&mut self, id: DeviceId) -> Option<InputDevice> {
        let index = self.devices.iter().position(|d| d.id() == id)?;
        self.release_side_state(id);
        Some(self.devices.remove(index))
    }

    /// Removes every device and side-state slot, returning the devices.
    pub(crate) fn drain(&mut self) -> Vec<InputDevice> {
        self.touch_states.clear();
        self.touch_order.clear();
        std::mem::take(&mut self.devices)
    }

    /// Union of the capability flags of all attached devices.
    pub fn capabilities(&self) -> SeatCapability {
        self.devices
            .iter()
            .fold(SeatCapability::empty(), |caps, d| caps | d.class().capability())
    }

    pub(crate) fn allocate_touch_state(&mut self, id: DeviceId, contact_size: f64) {
        if self.touch_states.contains_key(&id) {
            tracing::warn!(
                "DeviceRegistry: Touch state for device {:?} already allocated; keeping the existing one.",
                id
            );
            return;
        }
        self.touch_states.insert(id, TouchTracker::new(contact_size));
        self.touch_order.push(id);
    }

    pub(crate) fn release_side_state(&mut self, id: DeviceId) -> Option<TouchTracker> {
        self.touch_order.retain(|d| *d != id);
        self.touch_states.remove(&id)
    }

    pub fn touch_state(&self, id: DeviceId) -> Option<&TouchTracker> {
        self.touch_states.get(&id)
    }

    pub(crate) fn touch_state_mut(&mut self, id: DeviceId) -> Option<&mut TouchTracker> {
        self.touch_states.get_mut(&id)
    }

    /// Whether any touch device still holds points.
    pub fn has_touch_points(&self) -> bool {
        self.touch_states.values().any(|tracker| !tracker.is_empty())
    }

    /// Touch devices with allocated state, in attach order.
    pub fn touch_devices(&self) -> Vec<InputDevice> {
        self.touch_order
            .iter()
            .filter_map(|id| self.get(*id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], SeatCapability::empty())]
    #[case(&[DeviceClass::Pointer], SeatCapability::POINTER)]
    #[case(&[DeviceClass::Keyboard, DeviceClass::Keyboard], SeatCapability::KEYBOARD)]
    #[case(
        &[DeviceClass::Pointer, DeviceClass::Touch],
        SeatCapability::POINTER | SeatCapability::TOUCH
    )]
    #[case(
        &[DeviceClass::Touch, DeviceClass::Keyboard, DeviceClass::Pointer],
        SeatCapability::all()
    )]
    fn test_capabilities_are_union_of_classes(
        #[case] classes: &[DeviceClass],
        #[case] expected: SeatCapability,
    ) {
        let mut registry = DeviceRegistry::new();
        for (i, class) in classes.iter().enumerate() {
            registry.push(InputDevice::new(format!("dev{}", i), *class));
        }
        assert_eq!(registry.capabilities(), expected);
    }

    #[test]
    fn test_remove_frees_touch_slot() {
        let mut registry = DeviceRegistry::new();
        let touch = InputDevice::new("touchscreen", DeviceClass::Touch);
        registry.push(touch.clone());
        registry.allocate_touch_state(touch.id(), 8.0);
        assert!(registry.touch_state(touch.id()).is_some());
        assert_eq!(registry.touch_devices(), vec![touch.clone()]);

        let removed = registry.remove(touch.id()).expect("device present");
        assert_eq!(removed, touch);
        assert!(registry.touch_state(touch.id()).is_none());
        assert!(registry.touch_devices().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_device_handle_identity() {
        let a = InputDevice::new("mouse", DeviceClass::Pointer);
        let b = a.clone();
        assert_eq!(a, b);
        b.set_seat(Some(SeatId::from_raw(7)));
        assert_eq!(a.seat(), Some(SeatId::from_raw(7)));
        assert_ne!(a, InputDevice::new("mouse", DeviceClass::Pointer));
    }

    #[test]
    fn test_class_drives_cursor() {
        assert!(DeviceClass::Pointer.drives_cursor());
        assert!(DeviceClass::Touch.drives_cursor());
        assert!(!DeviceClass::Keyboard.drives_cursor());
    }
}
