//! Test doubles for the collaborators of a seat.
//!
//! Each double keeps its record behind `Rc<RefCell<..>>`; the constructor
//! returns the handle so a test can inspect it after boxing the double into
//! the seat.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{KeyboardConfig, SeatConfig};
use crate::input::device::SeatCapability;
use crate::input::event::{InputEvent, InputEventKind};
use crate::input::filter::EventFilter;
use crate::input::keyboard::{KeyState, ModifiersState};
use crate::input::pointer::{AxisOrientation, AxisSource, ButtonState};
use crate::input::protocol::SeatProtocol;
use crate::input::seat::Seat;
use crate::input::ui::LocalUi;
use crate::types::{ClientId, DeviceId, Point, SurfaceId, SurfaceRef, UiObjectId, WindowId};

/// A fresh surface owned by a fresh client.
pub fn surface() -> SurfaceRef {
    SurfaceRef::new(SurfaceId::new_unique(), ClientId::new_unique())
}

/// A live seat with default configuration bound to a [`RecordingProtocol`].
pub fn live_seat() -> (Seat, CallLog) {
    let mut seat = Seat::new(SeatConfig::default());
    let (protocol, log) = RecordingProtocol::new();
    seat.create(Box::new(protocol));
    log.borrow_mut().clear();
    (seat, log)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolCall {
    SetCapabilities(SeatCapability),
    SetupKeyboard(DeviceId),
    PointerEnter(SurfaceRef, Point),
    PointerClearFocus,
    PointerMotion(u32, Point),
    PointerButton(u32, u32, ButtonState),
    PointerAxis {
        time: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        source: AxisSource,
    },
    PointerFrame,
    KeyboardEnter(SurfaceRef),
    KeyboardClearFocus,
    Key(u32, u32, KeyState),
    Modifiers(ModifiersState),
    TouchDown(SurfaceRef, u32, i32, Point),
    TouchMotion(u32, i32, Point),
    TouchUp(u32, i32),
    TouchCancel(SurfaceRef),
    TouchFrame,
}

pub type CallLog = Rc<RefCell<Vec<ProtocolCall>>>;

pub struct RecordingProtocol {
    log: CallLog,
}

impl RecordingProtocol {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self { log: log.clone() }, log)
    }

    fn record(&self, call: ProtocolCall) {
        self.log.borrow_mut().push(call);
    }
}

impl SeatProtocol for RecordingProtocol {
    fn set_capabilities(&mut self, capabilities: SeatCapability) {
        self.record(ProtocolCall::SetCapabilities(capabilities));
    }

    fn setup_keyboard(&mut self, device: DeviceId, _config: &KeyboardConfig) {
        self.record(ProtocolCall::SetupKeyboard(device));
    }

    fn pointer_notify_enter(&mut self, surface: SurfaceRef, position: Point) {
        self.record(ProtocolCall::PointerEnter(surface, position));
    }

    fn pointer_notify_clear_focus(&mut self) {
        self.record(ProtocolCall::PointerClearFocus);
    }

    fn pointer_notify_motion(&mut self, time: u32, position: Point) {
        self.record(ProtocolCall::PointerMotion(time, position));
    }

    fn pointer_notify_button(&mut self, time: u32, button: u32, state: ButtonState) {
        self.record(ProtocolCall::PointerButton(time, button, state));
    }

    fn pointer_notify_axis(
        &mut self,
        time: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        source: AxisSource,
    ) {
        self.record(ProtocolCall::PointerAxis {
            time,
            orientation,
            delta,
            delta_discrete,
            source,
        });
    }

    fn pointer_notify_frame(&mut self) {
        self.record(ProtocolCall::PointerFrame);
    }

    fn keyboard_notify_enter(&mut self, surface: SurfaceRef) {
        self.record(ProtocolCall::KeyboardEnter(surface));
    }

    fn keyboard_clear_focus(&mut self) {
        self.record(ProtocolCall::KeyboardClearFocus);
    }

    fn keyboard_notify_key(&mut self, time: u32, keycode: u32, state: KeyState) {
        self.record(ProtocolCall::Key(time, keycode, state));
    }

    fn keyboard_notify_modifiers(&mut self, modifiers: ModifiersState) {
        self.record(ProtocolCall::Modifiers(modifiers));
    }

    fn touch_notify_down(&mut self, surface: SurfaceRef, time: u32, id: i32, position: Point) {
        self.record(ProtocolCall::TouchDown(surface, time, id, position));
    }

    fn touch_notify_motion(&mut self, time: u32, id: i32, position: Point) {
        self.record(ProtocolCall::TouchMotion(time, id, position));
    }

    fn touch_notify_up(&mut self, time: u32, id: i32) {
        self.record(ProtocolCall::TouchUp(time, id));
    }

    fn touch_notify_cancel(&mut self, surface: SurfaceRef) {
        self.record(ProtocolCall::TouchCancel(surface));
    }

    fn touch_notify_frame(&mut self) {
        self.record(ProtocolCall::TouchFrame);
    }
}

/// What the scripted UI does with every event it receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiBehavior {
    /// Leave the event unaccepted.
    Ignore,
    /// Handle the event with a UI item.
    Accept,
    /// Hand the event to the seat for `SurfaceRef`.
    RouteTo(SurfaceRef),
    /// Hand the event to the seat, then un-accept it the way item delivery
    /// frameworks sometimes do.
    RouteToThenIgnore(SurfaceRef),
}

#[derive(Debug)]
pub struct UiRecord {
    pub behavior: UiBehavior,
    pub events: Vec<(WindowId, InputEventKind)>,
}

pub type UiLog = Rc<RefCell<UiRecord>>;

pub struct ScriptedUi {
    record: UiLog,
}

impl ScriptedUi {
    pub fn new(behavior: UiBehavior) -> (Self, UiLog) {
        let record = Rc::new(RefCell::new(UiRecord {
            behavior,
            events: Vec::new(),
        }));
        (Self { record: record.clone() }, record)
    }
}

impl LocalUi for ScriptedUi {
    fn send_event(&mut self, seat: &mut Seat, window: WindowId, event: &mut InputEvent) {
        let behavior = {
            let mut record = self.record.borrow_mut();
            record.events.push((window, event.kind().clone()));
            record.behavior
        };
        match behavior {
            UiBehavior::Ignore => {}
            UiBehavior::Accept => event.accept(),
            UiBehavior::RouteTo(target) => {
                seat.send_event(target, None, event);
            }
            UiBehavior::RouteToThenIgnore(target) => {
                seat.send_event(target, None, event);
                event.ignore();
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FilterRecord {
    pub consume: bool,
    pub surface_calls: usize,
    pub window_calls: usize,
}

/// Counts the events it sees and consumes them when told to.
pub struct CountingFilter {
    record: Rc<RefCell<FilterRecord>>,
}

impl CountingFilter {
    pub fn new(consume: bool) -> (Self, Rc<RefCell<FilterRecord>>) {
        let record = Rc::new(RefCell::new(FilterRecord {
            consume,
            ..Default::default()
        }));
        (Self { record: record.clone() }, record)
    }
}

impl EventFilter for CountingFilter {
    fn filter_surface_event(
        &mut self,
        _seat: &Seat,
        _target: SurfaceRef,
        _object: Option<UiObjectId>,
        _event: &mut InputEvent,
    ) -> bool {
        let mut record = self.record.borrow_mut();
        record.surface_calls += 1;
        record.consume
    }

    fn filter_window_event(&mut self, _seat: &Seat, _window: WindowId, _event: &mut InputEvent) -> bool {
        let mut record = self.record.borrow_mut();
        record.window_calls += 1;
        record.consume
    }
}
