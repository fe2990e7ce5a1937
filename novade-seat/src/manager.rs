//! Seats of a compositor, by name.

use tracing::{debug, info};

use crate::config::SeatConfig;
use crate::error::SeatError;
use crate::input::device::InputDevice;
use crate::input::event::{DeviceEvent, InputEvent};
use crate::input::seat::Seat;
use crate::types::{SeatId, SurfaceRef, UiObjectId};

/// Owns every seat and routes events to the seat owning the device they
/// come from.
#[derive(Debug, Default)]
pub struct SeatManager {
    seats: Vec<Seat>,
}

impl SeatManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached seat from `config`.
    pub fn create_seat(&mut self, config: SeatConfig) -> Result<SeatId, SeatError> {
        config.validate()?;
        self.add_seat(Seat::new(config))
    }

    pub fn add_seat(&mut self, seat: Seat) -> Result<SeatId, SeatError> {
        if self.seat(seat.name()).is_some() {
            return Err(SeatError::DuplicateSeat(seat.name().to_string()));
        }
        let id = seat.id();
        info!("SeatManager: Added seat '{}' ({:?}).", seat.name(), id);
        self.seats.push(seat);
        Ok(id)
    }

    /// Destroys and removes the seat called `name`.
    pub fn remove_seat(&mut self, name: &str) -> Result<Seat, SeatError> {
        let index = self
            .seats
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| SeatError::SeatNotFound(name.to_string()))?;
        let mut seat = self.seats.remove(index);
        seat.destroy();
        info!("SeatManager: Removed seat '{}'.", name);
        Ok(seat)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    pub fn seat(&self, name: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.name() == name)
    }

    pub fn seat_mut(&mut self, name: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.name() == name)
    }

    pub fn seat_by_id_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id() == id)
    }

    pub fn seat_for_device_mut(&mut self, device: &InputDevice) -> Option<&mut Seat> {
        let id = device.seat()?;
        self.seat_by_id_mut(id)
    }

    /// Hands a raw device event to the seat owning `device`.
    pub fn dispatch(&mut self, device: &InputDevice, event: DeviceEvent) -> bool {
        match self.seat_for_device_mut(device) {
            Some(seat) => seat.dispatch(device, event),
            None => {
                debug!("SeatManager: Device '{}' has no seat; dropping {:?}.", device.name(), event);
                false
            }
        }
    }

    /// Routes a local UI event to the seat owning the event's device.
    pub fn send_event(&mut self, target: SurfaceRef, object: Option<UiObjectId>, event: &mut InputEvent) -> bool {
        let device = event.device().clone();
        match self.seat_for_device_mut(&device) {
            Some(seat) => seat.send_event(target, object, event),
            None => false,
        }
    }
}
