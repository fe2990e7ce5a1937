//! Event filters get first refusal on every event a seat routes.

use crate::input::event::InputEvent;
use crate::input::seat::Seat;
use crate::types::{SurfaceRef, UiObjectId, WindowId};

/// An interceptor consulted before the seat routes an event.
///
/// Returning `true` consumes the event: the seat stops there and no protocol
/// notification is issued. Both methods default to "not consumed" and leave
/// the event untouched.
pub trait EventFilter {
    /// Called for events headed to a client surface.
    fn filter_surface_event(
        &mut self,
        _seat: &Seat,
        _target: SurfaceRef,
        _object: Option<UiObjectId>,
        _event: &mut InputEvent,
    ) -> bool {
        false
    }

    /// Called for events the local UI is about to deliver to one of its
    /// own windows.
    fn filter_window_event(
        &mut self,
        _seat: &Seat,
        _window: WindowId,
        _event: &mut InputEvent,
    ) -> bool {
        false
    }
}

/// Several filters consulted in insertion order; the first one to consume
/// an event wins.
#[derive(Default)]
pub struct EventFilterChain {
    filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Box<dyn EventFilter>) {
        self.filters.push(filter);
    }

    pub fn with(mut self, filter: Box<dyn EventFilter>) -> Self {
        self.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl EventFilter for EventFilterChain {
    fn filter_surface_event(
        &mut self,
        seat: &Seat,
        target: SurfaceRef,
        object: Option<UiObjectId>,
        event: &mut InputEvent,
    ) -> bool {
        self.filters
            .iter_mut()
            .any(|f| f.filter_surface_event(seat, target, object, event))
    }

    fn filter_window_event(&mut self, seat: &Seat, window: WindowId, event: &mut InputEvent) -> bool {
        self.filters
            .iter_mut()
            .any(|f| f.filter_window_event(seat, window, event))
    }
}
