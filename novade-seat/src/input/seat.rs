//! The seat aggregate: devices, cursor, focus and the collaborators a seat
//! talks to.
//!
//! A seat is created detached. [`Seat::create`] binds it to its protocol
//! object, at which point it becomes live: devices get their protocol-side
//! setup and capabilities are advertised. Event routing lives in
//! [`dispatch`](crate::input::dispatch).

use tracing::{debug, info, warn};

use crate::config::SeatConfig;
use crate::error::SeatError;
use crate::input::cursor::{Cursor, CursorImage};
use crate::input::device::{DeviceClass, DeviceRegistry, InputDevice, SeatCapability};
use crate::input::event::InputEvent;
use crate::input::filter::EventFilter;
use crate::input::focus::FocusManager;
use crate::input::keyboard::ModifiersState;
use crate::input::protocol::SeatProtocol;
use crate::input::ui::LocalUi;
use crate::types::{ClientId, Point, SeatId, SurfaceId, SurfaceRef, WindowId};

pub struct Seat {
    pub(super) id: SeatId,
    pub(super) config: SeatConfig,
    pub(super) devices: DeviceRegistry,
    pub(super) cursor: Option<Cursor>,
    pub(super) focus: FocusManager,
    pub(super) filter: Option<Box<dyn EventFilter>>,
    pub(super) ui: Option<Box<dyn LocalUi>>,
    pub(super) protocol: Option<Box<dyn SeatProtocol>>,
    pub(super) modifiers: ModifiersState,
    // Timestamp of the latest touch event, used for frames the runtime
    // reports without one.
    pub(super) touch_time: u32,
}

impl Seat {
    pub fn new(config: SeatConfig) -> Self {
        debug!("Seat '{}': Created (detached).", config.name);
        Self {
            id: SeatId::new_unique(),
            config,
            devices: DeviceRegistry::new(),
            cursor: None,
            focus: FocusManager::new(),
            filter: None,
            ui: None,
            protocol: None,
            modifiers: ModifiersState::default(),
            touch_time: 0,
        }
    }

    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &SeatConfig {
        &self.config
    }

    /// Whether the seat is bound to its protocol object.
    pub fn is_live(&self) -> bool {
        self.protocol.is_some()
    }

    /// Binds the seat to `protocol` and performs the protocol-side setup of
    /// every device registered so far.
    pub fn create(&mut self, protocol: Box<dyn SeatProtocol>) {
        if self.is_live() {
            warn!("Seat '{}': Already live; replacing its protocol binding.", self.name());
        }
        self.protocol = Some(protocol);

        let devices: Vec<InputDevice> = self.devices.iter().cloned().collect();
        for device in &devices {
            self.setup_device(device);
        }
        if let Some(cursor) = &self.cursor {
            bind_cursor_devices(cursor, &devices);
        }
        self.update_capabilities();
        info!(
            "Seat '{}': Live with {} device(s), capabilities {:?}.",
            self.name(),
            devices.len(),
            self.capabilities()
        );
    }

    /// Tears the seat down: every device is released, the cursor unbound and
    /// focus dropped without leave notifications.
    pub fn destroy(&mut self) {
        for device in self.devices.drain() {
            device.set_seat(None);
        }
        if let Some(cursor) = self.cursor.take() {
            for device in cursor.attached_devices() {
                cursor.detach_device(device);
            }
            cursor.set_seat(None);
        }
        self.focus.clear();
        self.protocol = None;
        info!("Seat '{}': Destroyed.", self.name());
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    /// Union of the capabilities of all attached devices.
    pub fn capabilities(&self) -> SeatCapability {
        self.devices.capabilities()
    }

    pub fn attach_device(&mut self, device: &InputDevice) -> Result<(), SeatError> {
        if let Some(seat) = device.seat() {
            return Err(SeatError::AlreadyAttached {
                device: device.id(),
                seat,
            });
        }

        device.set_seat(Some(self.id));
        self.devices.push(device.clone());
        if let Some(cursor) = &self.cursor {
            if device.class().drives_cursor() {
                cursor.attach_device(device.id());
            }
        }
        info!(
            "Seat '{}': Attached input device '{}' ({:?}).",
            self.name(),
            device.name(),
            device.class()
        );

        if self.is_live() {
            self.setup_device(device);
            self.update_capabilities();
        }
        Ok(())
    }

    /// Releases `device`. Pending touch state is discarded without trailing
    /// frame or cancel notifications.
    pub fn detach_device(&mut self, device: &InputDevice) -> Result<(), SeatError> {
        if self.devices.remove(device.id()).is_none() {
            return Err(SeatError::NotAttached {
                device: device.id(),
                seat: self.id,
            });
        }
        device.set_seat(None);
        if let Some(cursor) = &self.cursor {
            cursor.detach_device(device.id());
        }
        info!("Seat '{}': Detached input device '{}'.", self.name(), device.name());

        if self.is_live() {
            self.update_capabilities();
        }
        Ok(())
    }

    fn setup_device(&mut self, device: &InputDevice) {
        match device.class() {
            DeviceClass::Keyboard => {
                if let Some(protocol) = self.protocol.as_deref_mut() {
                    protocol.setup_keyboard(device.id(), &self.config.keyboard);
                }
            }
            DeviceClass::Touch => {
                self.devices
                    .allocate_touch_state(device.id(), self.config.touch.contact_size);
            }
            DeviceClass::Pointer => {}
        }
        debug!("Seat '{}': Set up device '{}'.", self.config.name, device.name());
    }

    fn update_capabilities(&mut self) {
        let capabilities = self.devices.capabilities();
        if let Some(protocol) = self.protocol.as_deref_mut() {
            protocol.set_capabilities(capabilities);
        }
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Binds `cursor` to the seat, or unbinds the current one with `None`.
    ///
    /// The previous cursor is detached from every device first.
    pub fn set_cursor(&mut self, cursor: Option<Cursor>) -> Result<(), SeatError> {
        if let Some(new) = &cursor {
            if let Some(owner) = new.seat() {
                if owner != self.id {
                    return Err(SeatError::CursorAlreadyBound { seat: owner });
                }
            }
            if self.cursor.as_ref().is_some_and(|c| c.ptr_eq(new)) {
                return Ok(());
            }
        }

        if let Some(old) = self.cursor.take() {
            for device in self.devices.iter() {
                old.detach_device(device.id());
            }
            old.set_seat(None);
        }

        if let Some(new) = cursor {
            new.set_seat(Some(self.id));
            let devices: Vec<InputDevice> = self.devices.iter().cloned().collect();
            bind_cursor_devices(&new, &devices);
            self.cursor = Some(new);
        }
        Ok(())
    }

    /// Installs the event filter, or removes it with `None`. Replacing an
    /// installed filter requires removing it first.
    pub fn set_event_filter(&mut self, filter: Option<Box<dyn EventFilter>>) -> Result<(), SeatError> {
        if filter.is_some() && self.filter.is_some() {
            return Err(SeatError::FilterAlreadySet);
        }
        self.filter = filter;
        Ok(())
    }

    pub fn has_event_filter(&self) -> bool {
        self.filter.is_some()
    }

    pub fn set_local_ui(&mut self, ui: Option<Box<dyn LocalUi>>) {
        self.ui = ui;
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    pub fn pointer_focus_surface(&self) -> Option<SurfaceRef> {
        self.focus.pointer_focus()
    }

    pub fn keyboard_focus_surface(&self) -> Option<SurfaceRef> {
        self.focus.keyboard_focus()
    }

    /// Moves keyboard focus to `surface`, or clears it with `None`.
    pub fn set_keyboard_focus_surface(&mut self, surface: Option<SurfaceRef>) {
        let protocol = self
            .protocol
            .as_deref_mut()
            .map(|p| p as &mut dyn SeatProtocol);
        self.focus.set_keyboard_focus(protocol, surface);
    }

    pub fn keyboard_focus_window(&self) -> Option<WindowId> {
        self.focus.focus_window()
    }

    /// Redirects key events to a local UI window. Protocol keyboard focus is
    /// left as it is.
    pub fn set_keyboard_focus_window(&mut self, window: Option<WindowId>) {
        self.focus.set_focus_window(window);
    }

    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Handles `wl_pointer.set_cursor` from `client`. Only the client owning
    /// pointer focus may change the image; `None` hides the cursor.
    pub fn request_set_cursor(&mut self, client: ClientId, surface: Option<SurfaceRef>, hotspot: Point) -> bool {
        let Some(cursor) = &self.cursor else {
            return false;
        };
        if self.focus.pointer_focus().map(|s| s.client) != Some(client) {
            debug!(
                "Seat '{}': Ignoring cursor image request from {:?} without pointer focus.",
                self.config.name, client
            );
            return false;
        }
        let image = match surface {
            Some(surface) => CursorImage::Surface { surface, hotspot },
            None => CursorImage::Hidden,
        };
        cursor.set_image(image);
        true
    }

    /// Forgets a destroyed surface. No protocol notification is sent, the
    /// client side of the surface is already gone.
    pub fn surface_destroyed(&mut self, surface: SurfaceId) {
        if self.focus.surface_destroyed(surface) {
            debug!("Seat '{}': Dropped focus on destroyed surface {:?}.", self.config.name, surface);
        }
        if let Some(cursor) = &self.cursor {
            if matches!(cursor.image(), CursorImage::Surface { surface: s, .. } if s.id == surface) {
                cursor.reset_image();
            }
        }
    }

    /// Gives the event filter first refusal on an event the local UI is
    /// about to deliver to `window`.
    pub fn filter_input_event(&mut self, window: WindowId, event: &mut InputEvent) -> bool {
        let Some(mut filter) = self.filter.take() else {
            return false;
        };
        let consumed = filter.filter_window_event(self, window, event);
        if self.filter.is_none() {
            self.filter = Some(filter);
        }
        consumed
    }
}

fn bind_cursor_devices(cursor: &Cursor, devices: &[InputDevice]) {
    for device in devices.iter().filter(|d| d.class().drives_cursor()) {
        cursor.attach_device(device.id());
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("live", &self.is_live())
            .field("devices", &self.devices.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}
