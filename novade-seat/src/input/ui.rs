//! Hook for the compositor's own UI layer.

use crate::input::event::InputEvent;
use crate::input::seat::Seat;
use crate::types::WindowId;

/// The compositor's own UI layer (shell windows and the items wrapping
/// client surfaces).
///
/// The seat hands it synthesized events for its windows. While delivering,
/// the UI decides where the pointer or touch points geometrically are and
/// reports that back through [`Seat::send_event`], which is why it receives
/// the seat mutably. The UI marks the event accepted when one of its own
/// items handled it; an unaccepted event falls through to the protocol.
pub trait LocalUi {
    fn send_event(&mut self, seat: &mut Seat, window: WindowId, event: &mut InputEvent);
}
